//! Root configuration type.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, DocsSection, LoggingConfig, PipelineConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Complete Lindy configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use lindy_config::LindyConfig;
///
/// let config = LindyConfig::default();
/// assert_eq!(config.pipeline.default_output, "json");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct LindyConfig {
    /// Documentation metadata.
    #[serde(default)]
    pub docs: DocsSection,

    /// Request pipeline behavior.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LindyConfig {
    /// Checks cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.default_output.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "pipeline.default_output",
                "must not be empty",
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                format!(
                    "unknown level '{}', expected one of {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            ));
        }

        if let Some(base_path) = &self.docs.base_path {
            if !base_path.starts_with('/') {
                return Err(ConfigError::invalid_value(
                    "docs.base_path",
                    format!("must start with '/': {base_path}"),
                ));
            }
        }

        Ok(())
    }

    /// Development preset: pretty `debug` logs, fault messages exposed.
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.logging.level = "debug".to_string();
        config.logging.format = lindy_telemetry::LogFormat::Pretty;
        config.pipeline.expose_fault_messages = true;
        config
    }

    /// Production preset: JSON `info` logs, fault messages hidden.
    ///
    /// # Example
    ///
    /// ```
    /// use lindy_config::LindyConfig;
    ///
    /// let config = LindyConfig::production();
    /// assert!(!config.pipeline.expose_fault_messages);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.logging.level = "info".to_string();
        config.logging.format = lindy_telemetry::LogFormat::Json;
        config.pipeline.expose_fault_messages = false;
        config
    }
}
