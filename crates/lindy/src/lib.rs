//! # Lindy
//!
//! **Declarative HTTP request pipelines**
//!
//! Lindy binds routes onto an existing HTTP transport. Each route declares:
//!
//! - **Middlewares** – named steps that may populate parameters or reject the request
//! - **Parameters** – typed rules that read, coerce and check request fields
//! - **Output** – the named format that serializes results and errors alike
//!
//! Every route is also described in a Swagger 2.0 document built from the
//! same declarations.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lindy::prelude::*;
//! use serde_json::json;
//!
//! let hop = Hop::new(transport);
//! hop.register_middleware("auth", FnMiddleware::new(|request, _, _, params| {
//!     let user = request.header("authorization").ok_or_else(|| Rejection::forbidden("Login required"))?;
//!     params.insert("user".to_string(), user.clone());
//!     Ok(())
//! }));
//!
//! hop.router("/pets")
//!     .post("/", "Creates a pet")
//!     .middlewares(["auth"])
//!     .params(|v| {
//!         v.string("name", "Pet name").trim().not_empty();
//!         v.number("age", "Age in years").optional().min(0.0);
//!     })
//!     .run(|params| async move { Ok::<_, Failure>(json!({ "created": params["name"] })) })?;
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! Request → Middlewares (in order) → Parameter rules (concurrently) → Handler
//!                                                                       ↓
//! Response ← Output format (or redirect) ←──────────────────────────────┘
//! ```
//!
//! Any failure along the way is rendered through the route's output format
//! with its status.

#![doc(html_root_url = "https://docs.rs/lindy/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use lindy_core as core;

// Re-export validation types
pub use lindy_validate as validate;

// Re-export middleware types
pub use lindy_middleware as middleware;

// Re-export output formats
pub use lindy_output as output;

// Re-export documentation types
pub use lindy_docs as docs;

// Re-export route binding
pub use lindy_server as server;

// Re-export configuration
pub use lindy_config as config;

// Re-export logging setup
pub use lindy_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust,ignore
/// use lindy::prelude::*;
/// ```
pub mod prelude {
    pub use lindy_core::{
        ErrorKind, Failure, FieldError, Params, Redirect, Rejection, Reply, Request, Response,
    };

    pub use lindy_validate::{NumberRuleExt, RuleKind, StringRuleExt, ValidatorSet};

    pub use lindy_middleware::{FnMiddleware, Middleware};

    pub use lindy_output::{FnOutput, HtmlOutput, Output, TemplateRenderer};

    pub use lindy_docs::SwaggerDoc;

    pub use lindy_server::{Hop, RequestHandler, RouteBuilder, RouteError, Router, Transport};

    pub use lindy_config::{ConfigLoader, LindyConfig};

    pub use lindy_telemetry::init_logging;
}
