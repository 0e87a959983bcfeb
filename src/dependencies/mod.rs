//! Ports through which features reach the outside world.
//!
//! Reducers never call these directly: they capture a clone of the port in
//! the effect they return, so tests can swap in deterministic versions.

mod api_client;
mod identifier;

pub use api_client::{ApiClient, ApiError, PortFuture};
pub use identifier::IdGenerator;
