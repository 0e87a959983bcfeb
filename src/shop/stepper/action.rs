//! Actions for the quantity stepper.

use crate::runtime::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepperAction {
    /// Plus button.
    Increment,

    /// Minus button. Never goes below zero.
    Decrement,
}

impl Action for StepperAction {}
