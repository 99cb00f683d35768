//! A bound route and the per-request pipeline.
//!
//! Every request runs the same stages in order:
//!
//! 1. Middlewares, one at a time, in declared order.
//! 2. Parameter rules, all concurrently.
//! 3. If any rule failed, one aggregate 400 rejection listing every failure.
//! 4. The handler, with the assembled params.
//! 5. A redirect, or the route's output format.
//!
//! A failure in any stage skips the remaining ones. The failure is
//! normalized into a status and payload and rendered through the same output
//! format. Faults and panics become a generic 500 `InternalError`.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use http::{header, HeaderValue, Method};
use lindy_core::{
    BoxFuture, ErrorKind, Failure, FieldError, LindyResult, Params, Rejection, Reply, Request, Response,
};
use lindy_docs::{ParamDoc, ParameterIn, RouteDoc};
use lindy_middleware::MiddlewareChain;
use lindy_output::RegisteredOutput;
use lindy_telemetry::{log_request_complete, log_request_fault};
use lindy_validate::{Rules, Source};
use serde_json::{json, Value};
use tracing::Instrument;

use crate::hop::PipelineContext;

/// A type-erased route handler.
pub(crate) type BoxedHandler =
    Arc<dyn Fn(Params) -> BoxFuture<'static, LindyResult<Reply>> + Send + Sync>;

/// A route bound to the transport. Immutable once bound.
///
/// [`Route::handle`] runs middlewares sequentially, then every parameter
/// rule concurrently, then the handler, then the output format. Failed
/// parameters are reported together in one 400 `ValidationError`; any other
/// failure stops the pipeline where it happened.
pub struct Route {
    pub(crate) id: String,
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) description: String,
    pub(crate) middlewares: MiddlewareChain,
    pub(crate) rules: Rules,
    pub(crate) output: String,
    pub(crate) output_options: Value,
    pub(crate) handler: BoxedHandler,
    pub(crate) context: Arc<PipelineContext>,
}

impl Route {
    /// `"<METHOD> <path>"`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Full path pattern, mount included.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Middleware steps, in execution order.
    pub fn middlewares(&self) -> &MiddlewareChain {
        &self.middlewares
    }

    /// Parameter rules.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Output format name.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Output options.
    pub fn output_options(&self) -> &Value {
        &self.output_options
    }

    /// Static documentation for this route.
    pub fn doc(&self) -> RouteDoc {
        let parameters = self
            .rules
            .iter()
            .map(|rule| ParamDoc {
                name: rule.field().to_string(),
                location: documented_location(rule.source()),
                required: !rule.is_optional(),
                description: rule.description().to_string(),
                schema_type: rule.schema_type().to_string(),
                array: rule.is_array(),
                default: rule.default_value(),
            })
            .collect();

        RouteDoc {
            method: self.method.clone(),
            path: self.path.clone(),
            summary: self.description.clone(),
            parameters,
            produces: self.context.outputs.mime(&self.output),
        }
    }

    /// Runs the pipeline for one request.
    ///
    /// Never fails: every failure, panics included, is rendered as an error
    /// response.
    pub async fn handle(&self, request: Request) -> Response {
        let span = tracing::debug_span!("request", method = %self.method, route = %self.path);
        async move {
            let mut response = Response::new();

            let outcome = AssertUnwindSafe(self.execute(&request, &mut response))
                .catch_unwind()
                .await;
            let failure = match outcome {
                Ok(Ok(())) => None,
                Ok(Err(failure)) => Some(failure),
                Err(panic) => Some(panic_failure(panic.as_ref())),
            };

            if let Some(failure) = failure {
                self.render_failure(&request, &mut response, failure).await;
            }

            log_request_complete!(self.id, response.status().as_u16());
            response
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, request: &Request, response: &mut Response) -> LindyResult<()> {
        let mut params = Params::new();

        self.middlewares
            .run(&self.context.middlewares, request, response, &mut params)
            .await?;

        let errors = self.rules.evaluate(request, &mut params).await;
        if !errors.is_empty() {
            tracing::debug!(route = %self.id, failed_fields = errors.len(), "parameters rejected");
            return Err(validation_rejection(&errors).into());
        }

        match (self.handler)(params).await? {
            Reply::Redirect(redirect) => response
                .redirect(&redirect.url, redirect.permanent)
                .map_err(Failure::fault),
            Reply::Data(data) => {
                let output = self.lookup_output()?;
                output
                    .render(request, response, &data, &self.output_options)
                    .await
            }
        }
    }

    fn lookup_output(&self) -> LindyResult<RegisteredOutput> {
        self.context.outputs.get(&self.output).ok_or_else(|| {
            tracing::warn!(route = %self.id, output = %self.output, "output format not registered");
            Rejection::internal_error(json!({
                "error": ErrorKind::InternalError.as_str(),
                "message": format!("Output '{}' not found", self.output),
                "output": self.output,
            }))
            .into()
        })
    }

    async fn render_failure(&self, request: &Request, response: &mut Response, failure: Failure) {
        if failure.is_fault() {
            log_request_fault!(self.id, failure);
        }
        let (status, payload) = failure.into_parts(self.context.expose_fault_messages);
        response.set_status(status);
        response.headers_mut().remove(header::LOCATION);

        let Some(output) = self.context.outputs.get(&self.output) else {
            write_json(response, &payload);
            return;
        };

        let rendered = AssertUnwindSafe(output.render(request, response, &payload, &self.output_options))
            .catch_unwind()
            .await;
        match rendered {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                tracing::error!(route = %self.id, output = %self.output, error = %error, "error rendering failed");
                write_json(response, &payload);
            }
            Err(panic) => {
                tracing::error!(
                    route = %self.id,
                    output = %self.output,
                    error = %panic_message(panic.as_ref()),
                    "error rendering panicked"
                );
                write_json(response, &payload);
            }
        }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("description", &self.description)
            .field("middlewares", &self.middlewares)
            .field("rules", &self.rules)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// Builds the aggregate rejection for failed parameter rules.
pub(crate) fn validation_rejection(errors: &[FieldError]) -> Rejection {
    let message = match errors {
        [single] => single.message.clone(),
        _ => format!("{} parameters are invalid", errors.len()),
    };
    Rejection::bad_request(json!({
        "error": "ValidationError",
        "message": message,
        "errors": errors.iter().map(FieldError::to_value).collect::<Vec<_>>(),
    }))
}

fn documented_location(source: Source) -> Option<ParameterIn> {
    match source {
        Source::Auto => None,
        Source::Query => Some(ParameterIn::Query),
        Source::Header => Some(ParameterIn::Header),
        Source::Path => Some(ParameterIn::Path),
        Source::Body => Some(ParameterIn::FormData),
    }
}

fn panic_failure(payload: &(dyn Any + Send)) -> Failure {
    Failure::fault(anyhow::anyhow!("handler panicked: {}", panic_message(payload)))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Writes `payload` as JSON, bypassing the output registry.
fn write_json(response: &mut Response, payload: &Value) {
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response.write(payload.to_string());
}
