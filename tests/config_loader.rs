use std::time::Duration;

use shopflow::config::{Config, ConfigError, HarnessConfig, LoggingConfig, StoreConfig};
use shopflow::runtime::{Action, Effect, FeatureState, Reduce, Reducer, StoreSettings, TestStore};

#[derive(Debug, Clone, Default, PartialEq)]
struct Idle;

impl FeatureState for Idle {}

#[derive(Debug, Clone, PartialEq)]
enum Wait {
    Forever,
}

impl Action for Wait {}

fn waiting() -> impl Reducer<State = Idle, Action = Wait> {
    Reduce::new(|_: &mut Idle, action: Wait| match action {
        Wait::Forever => Effect::run(|_emitter| std::future::pending::<()>()),
    })
}

fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

/// Test that Config::default() produces the documented values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.store.slow_transition_ms, 16);
    assert_eq!(config.harness.receive_timeout_ms, 1000);
    assert_eq!(config.logging.filter, "info");
    assert!(config.logging.with_target);
    assert!(config.logging.ansi);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("shopflow/config.toml"));
}

#[test]
fn test_partial_file_fills_defaults() {
    let (_dir, path) = write_config(
        r#"
[store]
slow_transition_ms = 40

[logging]
filter = "shopflow=debug"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.store.slow_transition_ms, 40);
    assert_eq!(config.harness, HarnessConfig::default());
    assert_eq!(config.logging.filter, "shopflow=debug");
    assert!(config.logging.ansi);
}

#[test]
fn test_empty_file_is_default() {
    let (_dir, path) = write_config("");
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_zero_slow_transition_rejected() {
    let (_dir, path) = write_config("[store]\nslow_transition_ms = 0\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(
        matches!(&err, ConfigError::ValidationError { message } if message.contains("slow_transition_ms")),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_zero_receive_timeout_rejected() {
    let config = Config {
        harness: HarnessConfig {
            receive_timeout_ms: 0,
        },
        ..Config::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("receive_timeout_ms"));
}

#[test]
fn test_invalid_filter_rejected() {
    let config = Config {
        logging: LoggingConfig {
            filter: "shopflow=loud".to_string(),
            ..LoggingConfig::default()
        },
        ..Config::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("Invalid logging filter 'shopflow=loud'"));
}

#[test]
fn test_parse_invalid_toml() {
    let (_dir, path) = write_config("[store\nslow_transition_ms = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_wrong_type_is_parse_error() {
    let (_dir, path) = write_config("[harness]\nreceive_timeout_ms = \"soon\"\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = Config::load_from(&path).unwrap_err();
    match err {
        ConfigError::ReadError { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ReadError, got {:?}", other),
    }
}

#[test]
fn test_config_roundtrip() {
    let config = Config {
        store: StoreConfig {
            slow_transition_ms: 5,
        },
        harness: HarnessConfig {
            receive_timeout_ms: 250,
        },
        logging: LoggingConfig {
            filter: "warn".to_string(),
            with_target: false,
            ansi: false,
        },
    };
    let text = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_sections_convert_to_runtime_settings() {
    let settings = StoreSettings::from(&StoreConfig {
        slow_transition_ms: 40,
    });
    assert_eq!(settings.slow_transition, Duration::from_millis(40));
    assert_eq!(StoreSettings::from(&StoreConfig::default()), StoreSettings::default());

    let harness = HarnessConfig {
        receive_timeout_ms: 250,
    };
    assert_eq!(harness.receive_timeout(), Duration::from_millis(250));
}

#[tokio::test]
#[should_panic(expected = "still in flight after 25ms")]
async fn test_harness_section_sets_test_store_timeout() {
    let (_dir, path) = write_config("[harness]\nreceive_timeout_ms = 25\n");
    let config = Config::load_from(&path).unwrap();

    let mut store = TestStore::new(Idle, waiting()).with_config(&config.harness);
    store.send(Wait::Forever, |_| {});
    store.finish().await;
}
