//! # Lindy Middleware
//!
//! Named, route-configurable steps that run before parameter validation.
//!
//! Unlike a wrapping middleware stack, Lindy middlewares do not call a
//! `next` continuation: the route runs them in declared order, awaiting
//! each one, and stops at the first failure.
//!
//! ```text
//! mw[0] → mw[1] → … → mw[n-1] → validation → handler → output
//!   └─ Err ──────────────────────────────────────────→ error output
//! ```
//!
//! Implementations are looked up by name in a [`MiddlewareRegistry`] on every
//! request.

#![doc(html_root_url = "https://docs.rs/lindy-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chain;
pub mod middleware;
mod registry;

pub use chain::{MiddlewareChain, MiddlewareStep};
pub use middleware::{BoxedMiddleware, FnMiddleware, Middleware};
pub use registry::MiddlewareRegistry;
