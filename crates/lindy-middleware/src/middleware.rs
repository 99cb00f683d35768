//! Core middleware trait and types.
//!
//! A middleware is a named step that runs before parameter validation. It
//! sees the request, the response being assembled, the options the route
//! configured for it, and the shared params accumulator. Steps run one at a
//! time in the order the route declares them; returning `Err` aborts the
//! request.
//!
//! # Example
//!
//! ```
//! use lindy_core::{BoxFuture, LindyResult, Params, Request, Response};
//! use lindy_middleware::Middleware;
//! use serde_json::{json, Value};
//!
//! struct Pagination;
//!
//! impl Middleware for Pagination {
//!     fn process<'a>(
//!         &'a self,
//!         request: &'a Request,
//!         _response: &'a mut Response,
//!         options: &'a Value,
//!         params: &'a mut Params,
//!     ) -> BoxFuture<'a, LindyResult<()>> {
//!         Box::pin(async move {
//!             let limit = options.get("limit").cloned().unwrap_or(json!(20));
//!             params.insert("limit".to_string(), limit);
//!             params.insert(
//!                 "offset".to_string(),
//!                 request.query().get("offset").cloned().unwrap_or(json!(0)),
//!             );
//!             Ok(())
//!         })
//!     }
//! }
//! ```

use lindy_core::{BoxFuture, LindyResult, Params, Request, Response};
use serde_json::Value;
use std::sync::Arc;

/// A type-erased middleware that can be stored in a registry.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// A pre-validation step.
///
/// # Invariants
///
/// - A step may write into `params`; validated fields declared on the route
///   are inserted afterwards and win on key collisions.
/// - A step MUST NOT assume any other step ran unless the route lists it
///   earlier.
pub trait Middleware: Send + Sync + 'static {
    /// Runs this step.
    fn process<'a>(
        &'a self,
        request: &'a Request,
        response: &'a mut Response,
        options: &'a Value,
        params: &'a mut Params,
    ) -> BoxFuture<'a, LindyResult<()>>;
}

/// A middleware created from a synchronous closure.
///
/// # Example
///
/// ```
/// use lindy_core::Rejection;
/// use lindy_middleware::FnMiddleware;
///
/// let auth = FnMiddleware::new(|request, _response, _options, params| {
///     let Some(token) = request.header("authorization") else {
///         return Err(Rejection::forbidden("missing credentials").into());
///     };
///     params.insert("token".to_string(), token.clone());
///     Ok(())
/// });
/// # let _ = auth;
/// ```
pub struct FnMiddleware<F> {
    func: F,
}

impl<F> FnMiddleware<F>
where
    F: Fn(&Request, &mut Response, &Value, &mut Params) -> LindyResult<()> + Send + Sync + 'static,
{
    /// Creates a new function-based middleware.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(&Request, &mut Response, &Value, &mut Params) -> LindyResult<()> + Send + Sync + 'static,
{
    fn process<'a>(
        &'a self,
        request: &'a Request,
        response: &'a mut Response,
        options: &'a Value,
        params: &'a mut Params,
    ) -> BoxFuture<'a, LindyResult<()>> {
        let outcome = (self.func)(request, response, options, params);
        Box::pin(async move { outcome })
    }
}
