//! The seam between the pipeline and an HTTP server.
//!
//! A transport owns path matching and request decoding. The pipeline only
//! asks it to call a handler for a `(method, path pattern)` pair.

use http::Method;
use lindy_core::{BoxFuture, Request, Response};
use std::sync::Arc;

/// A bound request handler.
pub type RequestHandler = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// Registers handlers with an underlying router.
///
/// Path patterns use `{name}` segments; matched segments must be exposed
/// through [`Request::path_params`](lindy_core::Request::path_params).
pub trait Transport: Send + Sync {
    /// Routes requests matching `method` and `path` to `handler`.
    fn register(&self, method: Method, path: &str, handler: RequestHandler);
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn register(&self, method: Method, path: &str, handler: RequestHandler) {
        (**self).register(method, path, handler);
    }
}
