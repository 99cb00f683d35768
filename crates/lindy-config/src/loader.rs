//! Layered configuration loading.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use lindy_telemetry::LogFormat;

use crate::{ConfigError, LindyConfig};

/// Configuration loader with layered approach.
///
/// Later layers override earlier ones:
/// 1. Default values (or a preset)
/// 2. Configuration file or string (TOML or JSON)
/// 3. Environment variables (`PREFIX__SECTION__KEY`)
///
/// # Example
///
/// ```no_run
/// use lindy_config::ConfigLoader;
///
/// # fn main() -> Result<(), lindy_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_defaults()
///     .with_file("lindy.toml")?
///     .with_dotenv()?
///     .with_env_prefix("LINDY")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: LindyConfig,
    env_prefix: Option<String>,
    file_loaded: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: LindyConfig::default(),
            env_prefix: None,
            file_loaded: false,
        }
    }

    /// Start with default configuration values.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = LindyConfig::default();
        self
    }

    /// Start with the development preset.
    ///
    /// # Example
    ///
    /// ```
    /// use lindy_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = LindyConfig::development();
        self
    }

    /// Start with the production preset.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = LindyConfig::production();
        self
    }

    /// Load configuration from a file. The format follows the extension
    /// (`.toml` or `.json`).
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        self.config = Self::parse_file(&content, path)?;
        self.file_loaded = true;

        Ok(self)
    }

    /// Load configuration from a file if it exists.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string in `toml` or `json` format.
    ///
    /// # Example
    ///
    /// ```
    /// use lindy_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [docs]
    ///     title = "Pets"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.docs.title, "Pets");
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => return Err(ConfigError::UnsupportedFormat(format.to_string())),
        };
        Ok(self)
    }

    /// Set environment variable prefix for overrides.
    ///
    /// With prefix `LINDY`:
    /// - `LINDY__DOCS__TITLE=Pets`
    /// - `LINDY__PIPELINE__DEFAULT_OUTPUT=html`
    /// - `LINDY__LOGGING__LEVEL=debug`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load a `.env` file into the process environment, if present.
    ///
    /// A missing file is skipped; a malformed one is an error.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        self.skip_missing_dotenv(dotenvy::dotenv().map(drop))
    }

    /// Load a specific `.env`-style file into the process environment, if
    /// present.
    pub fn with_dotenv_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        self.skip_missing_dotenv(dotenvy::from_path(path.as_ref()))
    }

    fn skip_missing_dotenv(self, loaded: Result<(), dotenvy::Error>) -> Result<Self, ConfigError> {
        match loaded {
            Ok(()) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a configuration file was loaded.
    pub fn file_loaded(&self) -> bool {
        self.file_loaded
    }

    /// Applies environment overrides, validates and returns the configuration.
    pub fn load(mut self) -> Result<LindyConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;

        Ok(self.config)
    }

    /// Returns the configuration without env overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> LindyConfig {
        self.config
    }

    fn parse_file(content: &str, path: &Path) -> Result<LindyConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let marker = format!("{prefix}__");
        let env_vars: HashMap<String, String> =
            env::vars().filter(|(k, _)| k.starts_with(&marker)).collect();

        for (key, value) in env_vars {
            self.apply_env_var(&key, &value, &marker)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, marker: &str) -> Result<(), ConfigError> {
        let key_without_prefix = key
            .strip_prefix(marker)
            .ok_or_else(|| ConfigError::env_parse_error(key, "invalid key format"))?;

        let parts: Vec<&str> = key_without_prefix.split("__").collect();

        match parts.as_slice() {
            ["DOCS", "TITLE"] => self.config.docs.title = value.to_string(),
            ["DOCS", "VERSION"] => self.config.docs.version = value.to_string(),
            ["DOCS", "DESCRIPTION"] => self.config.docs.description = Some(value.to_string()),
            ["DOCS", "HOST"] => self.config.docs.host = Some(value.to_string()),
            ["DOCS", "BASE_PATH"] => self.config.docs.base_path = Some(value.to_string()),

            ["PIPELINE", "DEFAULT_OUTPUT"] => {
                self.config.pipeline.default_output = value.to_string();
            }
            ["PIPELINE", "EXPOSE_FAULT_MESSAGES"] => {
                self.config.pipeline.expose_fault_messages = parse_bool(key, value)?;
            }

            ["LOGGING", "ENABLED"] => self.config.logging.enabled = parse_bool(key, value)?,
            ["LOGGING", "LEVEL"] => self.config.logging.level = value.to_string(),
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = LogFormat::parse(value).ok_or_else(|| {
                    ConfigError::env_parse_error(key, "expected 'json' or 'pretty'")
                })?;
            }

            // Unknown keys are ignored so unrelated variables sharing the prefix do not break loading.
            _ => {}
        }

        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::env_parse_error(key, "expected boolean")),
    }
}
