//! Reducer for the product catalogue screen.

use crate::dependencies::{ApiClient, IdGenerator};
use crate::runtime::{Case, Effect, ElementCase, IdentifiedVec, Lens, Reducer, ReducerExt};
use crate::shop::cart_item::{CartItemAction, CartItemState};
use crate::shop::cart_list::{cart_list, CartListAction, CartListState};
use crate::shop::models::{CartLine, DataLoadingStatus};
use crate::shop::product::{product, ProductState};

use super::action::ProductListAction;
use super::state::ProductListState;

/// Body of the catalogue screen: loading, and reacting to the cart sheet.
pub struct ProductListReducer {
    api: ApiClient,
    ids: IdGenerator,
}

impl ProductListReducer {
    pub fn new(api: ApiClient, ids: IdGenerator) -> Self {
        Self { api, ids }
    }

    fn open_cart(&self, state: &mut ProductListState) {
        let cart_items: IdentifiedVec<CartItemState> = state
            .products
            .iter()
            .filter(|row| row.count() > 0)
            .map(|row| {
                CartItemState::new(
                    self.ids.generate(),
                    CartLine {
                        product: row.product.clone(),
                        quantity: row.count(),
                    },
                )
            })
            .collect();

        tracing::debug!(lines = cart_items.len(), "Opening cart");
        state.should_open_cart = true;
        state.cart = Some(CartListState::new(cart_items));
    }

    fn close_cart(state: &mut ProductListState) {
        state.should_open_cart = false;
        state.cart = None;
    }
}

impl Reducer for ProductListReducer {
    type State = ProductListState;
    type Action = ProductListAction;

    fn reduce(
        &self,
        state: &mut ProductListState,
        action: ProductListAction,
    ) -> Effect<ProductListAction> {
        match action {
            ProductListAction::FetchProducts => {
                if matches!(
                    state.status,
                    DataLoadingStatus::Loading | DataLoadingStatus::Success
                ) {
                    return Effect::none();
                }

                state.status = DataLoadingStatus::Loading;
                let api = self.api.clone();
                Effect::future(async move {
                    ProductListAction::ProductsResponse(api.fetch_products().await)
                })
            }

            ProductListAction::ProductsResponse(Ok(products)) => {
                tracing::info!(count = products.len(), "Products loaded");
                state.status = DataLoadingStatus::Success;
                state.products = products
                    .into_iter()
                    .map(|product| ProductState::new(self.ids.generate(), product))
                    .collect();
                Effect::none()
            }

            ProductListAction::ProductsResponse(Err(err)) => {
                tracing::warn!(error = %err, "Error getting products");
                state.status = DataLoadingStatus::Error;
                Effect::none()
            }

            ProductListAction::SetCartView(true) => {
                self.open_cart(state);
                Effect::none()
            }

            ProductListAction::SetCartView(false) | ProductListAction::CloseCart => {
                Self::close_cart(state);
                Effect::none()
            }

            ProductListAction::Cart(CartListAction::CloseButtonTapped) => {
                Self::close_cart(state);
                Effect::none()
            }

            ProductListAction::Cart(CartListAction::DismissSuccessPrompt) => {
                for row in state.products.iter_mut() {
                    row.set_count(0);
                }
                Effect::send(ProductListAction::CloseCart)
            }

            ProductListAction::Cart(CartListAction::CartItem(_, CartItemAction::Delete { product })) => {
                Effect::send(ProductListAction::ResetProduct { product })
            }

            ProductListAction::Cart(_) => Effect::none(),

            ProductListAction::ResetProduct { product } => {
                match state
                    .products
                    .iter_mut()
                    .find(|row| row.product.id == product.id)
                {
                    Some(row) => row.set_count(0),
                    None => tracing::debug!(product = product.id, "No row to reset"),
                }
                Effect::none()
            }

            ProductListAction::Product(..) => Effect::none(),
        }
    }
}

/// The catalogue screen with its rows and the cart sheet attached.
pub fn product_list(
    api: ApiClient,
    ids: IdGenerator,
) -> impl Reducer<State = ProductListState, Action = ProductListAction> {
    ProductListReducer::new(api.clone(), ids)
        .for_each(
            Lens::new("products", |state: &mut ProductListState| &mut state.products),
            ElementCase::new(
                |action: &ProductListAction| match action {
                    ProductListAction::Product(id, action) => Some((*id, action.clone())),
                    _ => None,
                },
                ProductListAction::Product,
            ),
            product(),
        )
        .if_let(
            Lens::new("cart", |state: &mut ProductListState| &mut state.cart),
            Case::new(
                |action: &ProductListAction| match action {
                    ProductListAction::Cart(action) => Some(action.clone()),
                    _ => None,
                },
                ProductListAction::Cart,
            ),
            cart_list(api),
        )
}
