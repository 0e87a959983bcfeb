use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::runtime::StoreSettings;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub harness: HarnessConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings applied to every `Store`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Transitions slower than this are logged as warnings (default: 16).
    #[serde(default = "default_slow_transition_ms")]
    pub slow_transition_ms: u64,
}

/// Settings for `TestStore`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// How long `receive` and `finish` wait for effects (default: 1000).
    #[serde(default = "default_receive_timeout_ms")]
    pub receive_timeout_ms: u64,
}

/// Tracing subscriber settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, overridden by `RUST_LOG` (default: "info").
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_true")]
    pub with_target: bool,
    #[serde(default = "default_true")]
    pub ansi: bool,
}

fn default_slow_transition_ms() -> u64 {
    16
}

fn default_receive_timeout_ms() -> u64 {
    1000
}

fn default_filter() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slow_transition_ms: default_slow_transition_ms(),
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            receive_timeout_ms: default_receive_timeout_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            with_target: true,
            ansi: true,
        }
    }
}

impl HarnessConfig {
    pub fn receive_timeout(&self) -> Duration {
        Duration::from_millis(self.receive_timeout_ms)
    }
}

impl From<&StoreConfig> for StoreSettings {
    fn from(config: &StoreConfig) -> Self {
        Self {
            slow_transition: Duration::from_millis(config.slow_transition_ms),
        }
    }
}
