//! Global subscriber installation.

use lindy_telemetry::{init_logging, LogConfig, LogFormat, TelemetryError};

#[test]
fn test_second_initialization_is_an_error() {
    let config = LogConfig {
        level: "warn".to_string(),
        format: LogFormat::Pretty,
        ..LogConfig::default()
    };

    init_logging(&config).expect("first initialization succeeds");
    tracing::warn!(route = "GET /", "subscriber installed");

    let err = init_logging(&LogConfig::default()).unwrap_err();
    assert!(matches!(err, TelemetryError::LoggingInit(_)));
}
