//! State for the quantity stepper.

use crate::runtime::FeatureState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepperState {
    pub count: u32,
}

impl FeatureState for StepperState {}
