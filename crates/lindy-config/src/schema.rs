//! Configuration section types.

use lindy_telemetry::{LogConfig, LogFormat};
use serde::{Deserialize, Serialize};

/// API documentation metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DocsSection {
    /// API title.
    #[serde(default = "default_title")]
    pub title: String,

    /// API version.
    #[serde(default = "default_version")]
    pub version: String,

    /// API description.
    #[serde(default)]
    pub description: Option<String>,

    /// Host serving the API.
    #[serde(default)]
    pub host: Option<String>,

    /// Base path prefixed to every documented path.
    #[serde(default)]
    pub base_path: Option<String>,
}

impl Default for DocsSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            version: default_version(),
            description: None,
            host: None,
            base_path: None,
        }
    }
}

fn default_title() -> String {
    "API".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Request pipeline behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Output format for routes that never select one.
    #[serde(default = "default_output")]
    pub default_output: String,

    /// Whether fault messages reach the client. When false they are
    /// replaced by a generic text.
    #[serde(default = "default_true")]
    pub expose_fault_messages: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_output: default_output(),
            expose_fault_messages: true,
        }
    }
}

fn default_output() -> String {
    "json".to_string()
}

fn default_true() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Converts to the settings consumed by `lindy_telemetry::init_logging`.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            format: self.format,
            span_events: self.format == LogFormat::Pretty,
            ..LogConfig::default()
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
