//! Shared fixtures and helpers for integration tests.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use shopflow::runtime::{Effect, Reducer};
use shopflow::shop::models::Product;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("shopflow=debug"))
        .with_test_writer()
        .try_init();
}

pub fn uuid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn product(id: u64, title: &str, price: f64) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
        description: format!("{} description", title),
        category: "demo".to_string(),
        image_url: format!("https://example.test/{}.png", id),
    }
}

/// Two products priced 10.50 and 99.99.
pub fn demo_products() -> Vec<Product> {
    vec![
        product(1, "ProductDemo", 10.50),
        product(2, "AnotherProduct", 99.99),
    ]
}

/// Poll `check` until it holds, yielding to the runtime in between.
pub async fn eventually(mut check: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while !check() {
        assert!(Instant::now() < deadline, "Condition not met within 2s");
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
}

/// Observer that appends every snapshot it sees.
pub fn recorder<S, T>(
    project: impl Fn(&S) -> T + Send + Sync + 'static,
) -> (Arc<Mutex<Vec<T>>>, impl Fn(&S) + Send + Sync + 'static)
where
    S: 'static,
    T: Send + 'static,
{
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |state: &S| sink.lock().push(project(state)))
}

/// Wraps a reducer and logs every action it is handed.
pub struct Recording<R: Reducer> {
    inner: R,
    log: Arc<Mutex<Vec<R::Action>>>,
}

impl<R: Reducer> Recording<R> {
    pub fn new(inner: R) -> (Self, Arc<Mutex<Vec<R::Action>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                inner,
                log: Arc::clone(&log),
            },
            log,
        )
    }
}

impl<R: Reducer> Reducer for Recording<R> {
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: &mut R::State, action: R::Action) -> Effect<R::Action> {
        self.log.lock().push(action.clone());
        self.inner.reduce(state, action)
    }
}
