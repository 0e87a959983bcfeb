//! State for the cart sheet.

use crate::runtime::{FeatureState, IdentifiedVec};
use crate::shop::cart_item::CartItemState;
use crate::shop::models::{CartLine, DataLoadingStatus};
use crate::shop::prompt::Prompt;

use super::action::CartListAction;

#[derive(Debug, Clone, PartialEq)]
pub struct CartListState {
    /// Progress of the order submission.
    pub status: DataLoadingStatus,
    pub cart_items: IdentifiedVec<CartItemState>,
    /// Sum of price × quantity over all lines.
    pub total_price: f64,
    pub is_pay_button_disabled: bool,
    pub confirmation_prompt: Option<Prompt<CartListAction>>,
    pub error_prompt: Option<Prompt<CartListAction>>,
    pub success_prompt: Option<Prompt<CartListAction>>,
}

impl CartListState {
    /// A cart holding `cart_items`, with its total already computed.
    pub fn new(cart_items: IdentifiedVec<CartItemState>) -> Self {
        let mut state = Self {
            status: DataLoadingStatus::NotStarted,
            cart_items,
            total_price: 0.0,
            is_pay_button_disabled: true,
            confirmation_prompt: None,
            error_prompt: None,
            success_prompt: None,
        };
        state.recompute_total();
        state
    }

    pub(crate) fn recompute_total(&mut self) {
        self.total_price = self
            .cart_items
            .iter()
            .fold(0.0, |total, item| total + item.line.subtotal());
        self.is_pay_button_disabled = self.total_price == 0.0;
    }

    /// Total rounded to cents, e.g. `$21.00`.
    pub fn total_price_label(&self) -> String {
        format!("${:.2}", self.total_price)
    }

    pub fn lines(&self) -> Vec<CartLine> {
        self.cart_items.iter().map(|item| item.line.clone()).collect()
    }

    pub fn is_request_in_process(&self) -> bool {
        self.status.is_loading()
    }
}

impl Default for CartListState {
    fn default() -> Self {
        Self::new(IdentifiedVec::new())
    }
}

impl FeatureState for CartListState {}
