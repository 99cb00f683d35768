//! The ordered middleware steps of one route.

use crate::MiddlewareRegistry;
use lindy_core::{LindyResult, Params, Rejection, Request, Response};
use serde_json::{json, Value};

/// One configured step: a middleware name plus its options.
#[derive(Debug, Clone, PartialEq)]
pub struct MiddlewareStep {
    /// Registered middleware name.
    pub name: String,
    /// Options handed to the middleware on every call.
    pub options: Value,
}

/// The declared middleware steps of a route.
///
/// Steps resolve by name at request time. They run strictly one after the
/// other; the first failure stops the chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MiddlewareChain {
    steps: Vec<MiddlewareStep>,
}

impl MiddlewareChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    pub fn push(&mut self, name: impl Into<String>, options: Value) {
        self.steps.push(MiddlewareStep {
            name: name.into(),
            options,
        });
    }

    /// The configured steps, in order.
    pub fn steps(&self) -> &[MiddlewareStep] {
        &self.steps
    }

    /// Returns `true` when no steps are configured.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs every step in order.
    ///
    /// A step whose name is not registered fails the chain with a 500
    /// `InternalError` naming it; later steps do not run.
    pub async fn run(
        &self,
        registry: &MiddlewareRegistry,
        request: &Request,
        response: &mut Response,
        params: &mut Params,
    ) -> LindyResult<()> {
        for step in &self.steps {
            let Some(middleware) = registry.get(&step.name) else {
                tracing::warn!(middleware = %step.name, "middleware not registered");
                return Err(missing(&step.name).into());
            };
            tracing::trace!(middleware = %step.name, "running middleware");
            middleware
                .process(request, response, &step.options, params)
                .await?;
        }
        Ok(())
    }
}

fn missing(name: &str) -> Rejection {
    Rejection::internal_error(json!({
        "error": "InternalError",
        "message": format!("Middleware '{name}' not found"),
        "middleware": name,
    }))
}
