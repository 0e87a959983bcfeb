//! Actions for the cart sheet.

use uuid::Uuid;

use crate::dependencies::ApiError;
use crate::runtime::Action;
use crate::shop::cart_item::CartItemAction;

#[derive(Debug, Clone, PartialEq)]
pub enum CartListAction {
    /// Close button; handled by the presenting product list.
    CloseButtonTapped,

    /// Forwarded to the line with the given id.
    CartItem(Uuid, CartItemAction),

    /// Recompute the total and the pay button state.
    GetTotalPrice,

    /// Pay button: ask for confirmation.
    RequestPurchase,

    /// Confirmation accepted: submit the order.
    ConfirmPurchase,

    /// Confirmation dismissed.
    CancelConfirmation,

    /// Outcome of the order submission.
    PurchaseResult(Result<String, ApiError>),

    DismissSuccessPrompt,

    DismissErrorPrompt,
}

impl Action for CartListAction {}
