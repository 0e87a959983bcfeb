//! Actions for one product row.

use crate::runtime::Action;
use crate::shop::stepper::StepperAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductAction {
    /// Forwarded to the row's add-to-cart stepper.
    Stepper(StepperAction),
}

impl Action for ProductAction {}
