//! The output trait and its closure adapter.

use lindy_core::{BoxFuture, LindyResult, Request, Response};
use serde_json::Value;
use std::sync::Arc;

/// A type-erased output that can be stored in a registry.
pub type BoxedOutput = Arc<dyn Output>;

/// Serializes handler results and error payloads into the response body.
///
/// The content type and status are already set when `render` runs; an
/// output used for an error reads the status to pick its representation.
pub trait Output: Send + Sync + 'static {
    /// Writes `data` into `response`.
    fn render<'a>(
        &'a self,
        request: &'a Request,
        response: &'a mut Response,
        data: &'a Value,
        options: &'a Value,
    ) -> BoxFuture<'a, LindyResult<()>>;
}

/// An output created from a synchronous closure.
///
/// # Example
///
/// ```
/// use lindy_output::FnOutput;
///
/// let csv = FnOutput::new(|_request, response, data, _options| {
///     let rows = data.as_array().cloned().unwrap_or_default();
///     let body: Vec<String> = rows.iter().map(ToString::to_string).collect();
///     response.write(body.join("\n"));
///     Ok(())
/// });
/// # let _ = csv;
/// ```
pub struct FnOutput<F> {
    func: F,
}

impl<F> FnOutput<F>
where
    F: Fn(&Request, &mut Response, &Value, &Value) -> LindyResult<()> + Send + Sync + 'static,
{
    /// Creates a new function-based output.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Output for FnOutput<F>
where
    F: Fn(&Request, &mut Response, &Value, &Value) -> LindyResult<()> + Send + Sync + 'static,
{
    fn render<'a>(
        &'a self,
        request: &'a Request,
        response: &'a mut Response,
        data: &'a Value,
        options: &'a Value,
    ) -> BoxFuture<'a, LindyResult<()>> {
        let outcome = (self.func)(request, response, data, options);
        Box::pin(async move { outcome })
    }
}
