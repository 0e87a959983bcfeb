//! Reducer for one cart line.

use crate::runtime::{Effect, Reducer};

use super::action::CartItemAction;
use super::state::CartItemState;

/// Deletion is handled by the parents; the line itself stays unchanged.
pub struct CartItemReducer;

impl Reducer for CartItemReducer {
    type State = CartItemState;
    type Action = CartItemAction;

    fn reduce(&self, _state: &mut CartItemState, action: CartItemAction) -> Effect<CartItemAction> {
        match action {
            CartItemAction::Delete { .. } => Effect::none(),
        }
    }
}
