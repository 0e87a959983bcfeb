mod common;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use shopflow::dependencies::{ApiClient, ApiError, IdGenerator};
use shopflow::runtime::{IdentifiedVec, Store, TestStore};
use shopflow::shop::cart_item::{CartItemAction, CartItemState};
use shopflow::shop::cart_list::{CartListAction, CartListState};
use shopflow::shop::models::{CartLine, DataLoadingStatus};
use shopflow::shop::product::{ProductAction, ProductState};
use shopflow::shop::product_list::{product_list, ProductListAction, ProductListState};
use shopflow::shop::stepper::StepperAction;
use tokio::sync::oneshot;

use common::{demo_products, uuid, Recording};

/// Two rows: 10.50 with quantity 2, 99.99 with quantity 0.
fn stocked_list() -> ProductListState {
    let products = demo_products();
    let mut first = ProductState::new(uuid(100), products[0].clone());
    first.set_count(2);
    let second = ProductState::new(uuid(101), products[1].clone());
    ProductListState {
        status: DataLoadingStatus::Success,
        products: vec![first, second].into(),
        ..ProductListState::default()
    }
}

fn gated_submit() -> (ApiClient, oneshot::Sender<()>) {
    let (tx, rx) = oneshot::channel::<()>();
    let gate = Arc::new(Mutex::new(Some(rx)));
    let api = ApiClient::unimplemented().with_submit_order(move |_lines| {
        let gate = gate.lock().take();
        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok("OK".to_string())
        }
    });
    (api, tx)
}

#[tokio::test]
async fn fetch_builds_rows_with_injected_ids() {
    let products = demo_products();
    let api = {
        let products = products.clone();
        ApiClient::unimplemented().with_fetch_products(move || {
            let products = products.clone();
            async move { Ok(products) }
        })
    };
    let mut store = TestStore::new(
        ProductListState::default(),
        product_list(api, IdGenerator::incrementing()),
    );

    store.send(ProductListAction::FetchProducts, |state| {
        state.status = DataLoadingStatus::Loading;
    });
    assert!(store.state().is_loading());
    store
        .receive(ProductListAction::ProductsResponse(Ok(products.clone())), |state| {
            state.status = DataLoadingStatus::Success;
            state.products = vec![
                ProductState::new(uuid(0), products[0].clone()),
                ProductState::new(uuid(1), products[1].clone()),
            ]
            .into();
        })
        .await;

    // Already loaded: no refetch.
    store.send(ProductListAction::FetchProducts, |_| {});
    store.finish().await;
}

#[tokio::test]
async fn fetch_failure_shows_error() {
    let api = ApiClient::unimplemented()
        .with_fetch_products(|| async { Err(ApiError::Status { status: 500 }) });
    let mut store = TestStore::new(
        ProductListState::default(),
        product_list(api, IdGenerator::incrementing()),
    );

    store.send(ProductListAction::FetchProducts, |state| {
        state.status = DataLoadingStatus::Loading;
    });
    store
        .receive(
            ProductListAction::ProductsResponse(Err(ApiError::Status { status: 500 })),
            |state| state.status = DataLoadingStatus::Error,
        )
        .await;

    assert!(store.state().should_show_error());
    store.finish().await;
}

#[tokio::test]
async fn stepper_actions_reach_the_addressed_row() {
    let mut store = TestStore::new(
        stocked_list(),
        product_list(ApiClient::unimplemented(), IdGenerator::incrementing()),
    );

    store.send(
        ProductListAction::Product(uuid(101), ProductAction::Stepper(StepperAction::Increment)),
        |state| {
            if let Some(row) = state.products.get_mut(&uuid(101)) {
                row.set_count(1);
            }
        },
    );
    store.send(
        ProductListAction::Product(uuid(999), ProductAction::Stepper(StepperAction::Increment)),
        |_| {},
    );
    store.finish().await;
}

#[tokio::test]
async fn opening_cart_then_deleting_its_only_line() {
    let products = demo_products();
    let mut store = TestStore::new(
        stocked_list(),
        product_list(ApiClient::unimplemented(), IdGenerator::incrementing()),
    );

    store.send(ProductListAction::SetCartView(true), |state| {
        state.should_open_cart = true;
        state.cart = Some(CartListState::new(
            vec![CartItemState::new(
                uuid(0),
                CartLine {
                    product: products[0].clone(),
                    quantity: 2,
                },
            )]
            .into(),
        ));
    });

    let cart = store.state().cart.clone().unwrap();
    assert_eq!(cart.cart_items.len(), 1);
    assert_eq!(cart.total_price, 21.0);
    assert_eq!(cart.total_price_label(), "$21.00");
    assert!(!cart.is_pay_button_disabled);

    store.send(
        ProductListAction::Cart(CartListAction::CartItem(
            uuid(0),
            CartItemAction::Delete {
                product: products[0].clone(),
            },
        )),
        |state| {
            if let Some(cart) = state.cart.as_mut() {
                cart.cart_items = IdentifiedVec::new();
            }
        },
    );
    store
        .receive(ProductListAction::Cart(CartListAction::GetTotalPrice), |state| {
            if let Some(cart) = state.cart.as_mut() {
                cart.total_price = 0.0;
                cart.is_pay_button_disabled = true;
            }
        })
        .await;
    store
        .receive(
            ProductListAction::ResetProduct {
                product: products[0].clone(),
            },
            |state| {
                if let Some(row) = state.products.get_mut(&uuid(100)) {
                    row.set_count(0);
                }
            },
        )
        .await;

    assert_eq!(store.state().cart.as_ref().map(|cart| cart.total_price_label()), Some("$0.00".to_string()));
    store.finish().await;
}

#[tokio::test]
async fn dismissing_success_resets_rows_and_closes_cart() {
    let mut store = TestStore::new(
        stocked_list(),
        product_list(ApiClient::unimplemented(), IdGenerator::incrementing()),
    );
    store.send(ProductListAction::SetCartView(true), |state| {
        state.should_open_cart = true;
        state.cart = Some(CartListState::new(
            vec![CartItemState::new(
                uuid(0),
                CartLine {
                    product: demo_products()[0].clone(),
                    quantity: 2,
                },
            )]
            .into(),
        ));
    });

    store.send(
        ProductListAction::Cart(CartListAction::DismissSuccessPrompt),
        |state| {
            for row in state.products.iter_mut() {
                row.set_count(0);
            }
        },
    );
    store
        .receive(ProductListAction::CloseCart, |state| {
            state.should_open_cart = false;
            state.cart = None;
        })
        .await;
    store.finish().await;
}

#[tokio::test]
async fn cart_actions_without_cart_are_dropped() {
    let mut store = TestStore::new(
        stocked_list(),
        product_list(ApiClient::unimplemented(), IdGenerator::incrementing()),
    );

    store.send(ProductListAction::Cart(CartListAction::RequestPurchase), |_| {});
    store.send(ProductListAction::Cart(CartListAction::ConfirmPurchase), |_| {});
    store.finish().await;
}

#[tokio::test]
async fn closing_cart_cancels_pending_submit() {
    let (api, gate) = gated_submit();
    let mut store = TestStore::new(stocked_list(), product_list(api, IdGenerator::incrementing()));

    store.send(ProductListAction::SetCartView(true), |state| {
        state.should_open_cart = true;
        state.cart = Some(CartListState::new(
            vec![CartItemState::new(
                uuid(0),
                CartLine {
                    product: demo_products()[0].clone(),
                    quantity: 2,
                },
            )]
            .into(),
        ));
    });
    store.send(ProductListAction::Cart(CartListAction::ConfirmPurchase), |state| {
        if let Some(cart) = state.cart.as_mut() {
            cart.status = DataLoadingStatus::Loading;
        }
    });
    store.send(ProductListAction::Cart(CartListAction::CloseButtonTapped), |state| {
        state.should_open_cart = false;
        state.cart = None;
    });

    let _ = gate.send(());
    store.finish().await;
}

#[tokio::test]
async fn store_never_observes_result_of_cancelled_submit() {
    let (api, gate) = gated_submit();
    let (reducer, log) = Recording::new(product_list(api, IdGenerator::incrementing()));
    let store = Store::new(stocked_list(), reducer).unwrap();

    store.dispatch(ProductListAction::SetCartView(true));
    store.dispatch(ProductListAction::Cart(CartListAction::ConfirmPurchase));
    tokio::task::yield_now().await;
    store.dispatch(ProductListAction::Cart(CartListAction::CloseButtonTapped));
    assert_eq!(store.in_flight_effects(), 0);

    let _ = gate.send(());
    tokio::time::sleep(Duration::from_millis(30)).await;

    let results = log
        .lock()
        .iter()
        .filter(|action| {
            matches!(
                action,
                ProductListAction::Cart(CartListAction::PurchaseResult(_))
            )
        })
        .count();
    assert_eq!(results, 0);
    assert_eq!(store.state().cart, None);
}
