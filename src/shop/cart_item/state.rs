//! State for one cart line.

use uuid::Uuid;

use crate::runtime::{FeatureState, Identifiable};
use crate::shop::models::CartLine;

#[derive(Debug, Clone, PartialEq)]
pub struct CartItemState {
    id: Uuid,
    pub line: CartLine,
}

impl CartItemState {
    pub fn new(id: Uuid, line: CartLine) -> Self {
        Self { id, line }
    }
}

impl Identifiable for CartItemState {
    type Id = Uuid;

    fn id(&self) -> &Uuid {
        &self.id
    }
}

impl FeatureState for CartItemState {}
