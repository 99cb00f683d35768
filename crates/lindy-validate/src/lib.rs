//! # Lindy Validate
//!
//! Declarative per-field validation for Lindy routes.
//!
//! A route's parameters are described by a [`ValidatorSet`]: one [`Rule`] per
//! field, each backed by a [`RuleKind`] looked up by type name in a
//! [`ValidatorRegistry`]. Once declaration finishes the set is frozen into
//! [`Rules`], which evaluates every rule concurrently against a request and
//! collects all field errors instead of stopping at the first.
//!
//! ## Example
//!
//! ```
//! use http::Method;
//! use lindy_core::{Params, Request};
//! use lindy_validate::{NumberRuleExt, StringRuleExt, ValidatorRegistry, ValidatorSet};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let mut set = ValidatorSet::new(ValidatorRegistry::new());
//! set.string("name", "User name").trim().lower_case();
//! set.number("limit", "Page size").min(1.0).max(100.0).optional().default(20);
//! let rules = set.finish().unwrap();
//!
//! let mut query = Params::new();
//! query.insert("name".into(), json!("  Alice "));
//! let request = Request::new(Method::GET, "/users").with_query(query);
//!
//! let mut params = Params::new();
//! let errors = rules.evaluate(&request, &mut params).await;
//! assert!(errors.is_empty());
//! assert_eq!(params["name"], json!("alice"));
//! assert_eq!(params["limit"], json!(20));
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/lindy-validate/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod kinds;
mod registry;
mod rule;
mod set;
mod source;

pub use error::RuleConfigError;
pub use kinds::{NumberRule, NumberRuleExt, RuleKind, StringRule, StringRuleExt};
pub use registry::ValidatorRegistry;
pub use rule::{Rule, RuleBuilder};
pub use set::{Rules, ValidatorSet};
pub use source::Source;
