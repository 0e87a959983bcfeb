use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;

use crate::shop::models::{CartLine, Product, UserProfile};

/// Failure reported by an [`ApiClient`] port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("transport failure: {message}")]
    Transport { message: String },

    #[error("unexpected status {status}")]
    Status { status: u16 },

    #[error("malformed payload: {message}")]
    Decode { message: String },

    #[error("{port} is not implemented")]
    Unimplemented { port: &'static str },
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode {
            message: err.to_string(),
        }
    }
}

pub type PortFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send>>;

type FetchProducts = Arc<dyn Fn() -> PortFuture<Vec<Product>> + Send + Sync>;
type SubmitOrder = Arc<dyn Fn(Vec<CartLine>) -> PortFuture<String> + Send + Sync>;
type FetchUserProfile = Arc<dyn Fn() -> PortFuture<UserProfile> + Send + Sync>;

/// Async endpoints of the store backend.
///
/// Every port can be replaced individually with the `with_*` builders.
#[derive(Clone)]
pub struct ApiClient {
    fetch_products: FetchProducts,
    submit_order: SubmitOrder,
    fetch_user_profile: FetchUserProfile,
}

impl ApiClient {
    /// A client whose every port fails with [`ApiError::Unimplemented`].
    ///
    /// Tests start from this and override only the ports they expect to hit.
    pub fn unimplemented() -> Self {
        Self {
            fetch_products: Arc::new(|| -> PortFuture<Vec<Product>> {
                Box::pin(async {
                    Err(ApiError::Unimplemented {
                        port: "fetch_products",
                    })
                })
            }),
            submit_order: Arc::new(|_lines: Vec<CartLine>| -> PortFuture<String> {
                Box::pin(async {
                    Err(ApiError::Unimplemented {
                        port: "submit_order",
                    })
                })
            }),
            fetch_user_profile: Arc::new(|| -> PortFuture<UserProfile> {
                Box::pin(async {
                    Err(ApiError::Unimplemented {
                        port: "fetch_user_profile",
                    })
                })
            }),
        }
    }

    /// A client answering from bundled sample data.
    pub fn demo() -> Self {
        Self::unimplemented()
            .with_fetch_products(|| async { Ok(Product::samples()) })
            .with_submit_order(|lines| async move {
                tracing::debug!(lines = lines.len(), "Demo order accepted");
                Ok("Status: 200".to_string())
            })
            .with_fetch_user_profile(|| async { Ok(UserProfile::sample()) })
    }

    pub fn with_fetch_products<F, Fut>(mut self, port: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<Product>, ApiError>> + Send + 'static,
    {
        self.fetch_products = Arc::new(move || -> PortFuture<Vec<Product>> { Box::pin(port()) });
        self
    }

    pub fn with_submit_order<F, Fut>(mut self, port: F) -> Self
    where
        F: Fn(Vec<CartLine>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ApiError>> + Send + 'static,
    {
        self.submit_order =
            Arc::new(move |lines: Vec<CartLine>| -> PortFuture<String> { Box::pin(port(lines)) });
        self
    }

    pub fn with_fetch_user_profile<F, Fut>(mut self, port: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<UserProfile, ApiError>> + Send + 'static,
    {
        self.fetch_user_profile =
            Arc::new(move || -> PortFuture<UserProfile> { Box::pin(port()) });
        self
    }

    pub fn fetch_products(&self) -> PortFuture<Vec<Product>> {
        (self.fetch_products)()
    }

    pub fn submit_order(&self, lines: Vec<CartLine>) -> PortFuture<String> {
        (self.submit_order)(lines)
    }

    pub fn fetch_user_profile(&self) -> PortFuture<UserProfile> {
        (self.fetch_user_profile)()
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}
