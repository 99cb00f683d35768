//! Structured logging for Lindy services.
//!
//! Lindy crates emit events through the [`tracing`] facade and never install a
//! subscriber themselves. Call [`init_logging`] once during process
//! bootstrapping to route those events to stdout as JSON or as human-readable
//! text.
//!
//! # Example
//!
//! ```rust,ignore
//! use lindy_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::info!(route = "GET /pets", "route bound");
//! ```

#![doc(html_root_url = "https://docs.rs/lindy-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
