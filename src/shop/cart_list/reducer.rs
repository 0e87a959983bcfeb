//! Reducer for the cart sheet.

use crate::dependencies::ApiClient;
use crate::runtime::{Effect, ElementCase, Lens, Reducer, ReducerExt};
use crate::shop::cart_item::{CartItemAction, CartItemReducer};
use crate::shop::models::DataLoadingStatus;
use crate::shop::prompt::{Prompt, PromptButton};

use super::action::CartListAction;
use super::state::CartListState;

/// Cancellation id of the in-flight order submission. Scoped to the cart;
/// parents stop it by dismissing the cart.
const SUBMIT_ORDER: &str = "submit_order";

/// Body of the cart sheet: totals and the purchase flow.
pub struct CartListReducer {
    api: ApiClient,
}

impl CartListReducer {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn confirmation_prompt(total: &str) -> Prompt<CartListAction> {
        Prompt::new(
            "Confirm your purchase",
            format!("Do you want to proceed with your purchase of {}?", total),
        )
        .button(PromptButton::primary(
            format!("Pay {}", total),
            CartListAction::ConfirmPurchase,
        ))
        .button(PromptButton::cancel(
            "Cancel",
            CartListAction::CancelConfirmation,
        ))
    }
}

impl Reducer for CartListReducer {
    type State = CartListState;
    type Action = CartListAction;

    fn reduce(&self, state: &mut CartListState, action: CartListAction) -> Effect<CartListAction> {
        match action {
            CartListAction::CloseButtonTapped => Effect::none(),

            CartListAction::CartItem(id, CartItemAction::Delete { .. }) => {
                state.cart_items.remove(&id);
                Effect::send(CartListAction::GetTotalPrice)
            }

            CartListAction::GetTotalPrice => {
                state.recompute_total();
                Effect::none()
            }

            CartListAction::RequestPurchase => {
                let total = state.total_price_label();
                state.confirmation_prompt = Some(Self::confirmation_prompt(&total));
                Effect::none()
            }

            CartListAction::ConfirmPurchase => {
                state.confirmation_prompt = None;
                state.status = DataLoadingStatus::Loading;

                let lines = state.lines();
                let api = self.api.clone();
                tracing::debug!(lines = lines.len(), total = state.total_price, "Submitting order");
                Effect::future(async move {
                    CartListAction::PurchaseResult(api.submit_order(lines).await)
                })
                .cancellable(SUBMIT_ORDER, true)
            }

            CartListAction::CancelConfirmation => {
                state.confirmation_prompt = None;
                Effect::none()
            }

            CartListAction::PurchaseResult(Ok(message)) => {
                tracing::info!(message = %message, "Order submitted");
                state.status = DataLoadingStatus::Success;
                state.success_prompt = Some(
                    Prompt::new("Thank you!", "Your order is in process.").button(
                        PromptButton::primary("Done", CartListAction::DismissSuccessPrompt),
                    ),
                );
                Effect::none()
            }

            CartListAction::PurchaseResult(Err(err)) => {
                tracing::warn!(error = %err, "Order submission failed");
                state.status = DataLoadingStatus::Error;
                state.error_prompt = Some(
                    Prompt::new("Oops!", "Unable to send order, try again later.").button(
                        PromptButton::primary("Done", CartListAction::DismissErrorPrompt),
                    ),
                );
                Effect::none()
            }

            CartListAction::DismissSuccessPrompt => {
                state.success_prompt = None;
                Effect::none()
            }

            CartListAction::DismissErrorPrompt => {
                state.error_prompt = None;
                Effect::none()
            }
        }
    }
}

/// The cart sheet with every line's reducer attached.
pub fn cart_list(api: ApiClient) -> impl Reducer<State = CartListState, Action = CartListAction> {
    CartListReducer::new(api).for_each(
        Lens::new("cart_items", |state: &mut CartListState| &mut state.cart_items),
        ElementCase::new(
            |action: &CartListAction| match action {
                CartListAction::CartItem(id, action) => Some((*id, action.clone())),
                _ => None,
            },
            CartListAction::CartItem,
        ),
        CartItemReducer,
    )
}
