//! Route configuration errors.

use lindy_validate::RuleConfigError;
use thiserror::Error;

/// Errors raised while declaring a route, before it is bound.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A rule in the route's `.params()` builder was misconfigured.
    #[error("invalid parameter rule on route {route}: {source}")]
    InvalidRule {
        /// Route identity, `"<METHOD> <path>"`.
        route: String,
        /// The first configuration error recorded.
        #[source]
        source: RuleConfigError,
    },
}
