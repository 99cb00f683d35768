//! # Lindy Server
//!
//! Declarative route binding over a pluggable HTTP transport.
//!
//! A [`Hop`] owns the validator, middleware and output registries. Routers
//! created from it declare routes fluently:
//!
//! ```rust,ignore
//! use lindy_core::Failure;
//! use lindy_server::Hop;
//! use lindy_validate::{NumberRuleExt, StringRuleExt};
//! use serde_json::json;
//!
//! let hop = Hop::new(transport);
//! hop.router("/pets")
//!     .get("/", "Lists pets")
//!     .middleware("auth", json!({ "scope": "pets:read" }))
//!     .params(|v| {
//!         v.string("species", "Filter by species").optional().lower_case();
//!         v.number("limit", "Page size").optional().default(20).min(1.0).max(100.0);
//!     })
//!     .outputs("json", json!({ "pretty": true }))
//!     .run(|params| async move { Ok::<_, Failure>(list_pets(params).await) })?;
//!
//! let swagger = hop.docs()?.to_json()?;
//! ```
//!
//! The request pipeline is described in [`Route`].

#![doc(html_root_url = "https://docs.rs/lindy-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod hop;
mod route;
mod router;
mod transport;

pub use error::RouteError;
pub use hop::Hop;
pub use route::Route;
pub use router::{RouteBuilder, Router};
pub use transport::{RequestHandler, Transport};
