//! Typed configuration for Lindy services.
//!
//! [`LindyConfig`] has three sections:
//!
//! - [`DocsSection`]: metadata placed in the generated Swagger document
//! - [`PipelineConfig`]: default output format and fault message exposure
//! - [`LoggingConfig`]: settings for `lindy_telemetry::init_logging`
//!
//! Unknown fields are rejected in every section.
//!
//! # Configuration File Format
//!
//! ```toml
//! [docs]
//! title = "Pet Store"
//! version = "1.2.0"
//! base_path = "/api"
//!
//! [pipeline]
//! default_output = "json"
//! expose_fault_messages = false
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Every key can be overridden as `PREFIX__SECTION__KEY`, for example
//! `LINDY__PIPELINE__DEFAULT_OUTPUT=html` or `LINDY__LOGGING__ENABLED=false`.

#![doc(html_root_url = "https://docs.rs/lindy-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::LindyConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use lindy_telemetry::LogFormat;
pub use schema::{DocsSection, LoggingConfig, PipelineConfig};
