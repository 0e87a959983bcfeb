//! TOML configuration for the runtime, the test harness and logging.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, HarnessConfig, LoggingConfig, StoreConfig};
