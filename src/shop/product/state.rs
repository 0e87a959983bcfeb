//! State for one product row.

use uuid::Uuid;

use crate::runtime::{FeatureState, Identifiable};
use crate::shop::models::Product;
use crate::shop::stepper::StepperState;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductState {
    id: Uuid,
    pub product: Product,
    pub stepper: StepperState,
}

impl ProductState {
    pub fn new(id: Uuid, product: Product) -> Self {
        Self {
            id,
            product,
            stepper: StepperState::default(),
        }
    }

    /// Quantity selected for the cart.
    pub fn count(&self) -> u32 {
        self.stepper.count
    }

    pub fn set_count(&mut self, count: u32) {
        self.stepper.count = count;
    }
}

impl Identifiable for ProductState {
    type Id = Uuid;

    fn id(&self) -> &Uuid {
        &self.id
    }
}

impl FeatureState for ProductState {}
