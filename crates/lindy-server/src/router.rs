//! Routers and the fluent route builder.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use http::Method;
use lindy_core::{BoxFuture, LindyResult, Params, Reply, Request, Response};
use lindy_docs::{DocsGenerator, DocsResult, RouteDoc, SwaggerDoc};
use lindy_middleware::MiddlewareChain;
use lindy_validate::{Rules, ValidatorSet};
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::RouteError;
use crate::hop::Shared;
use crate::route::{BoxedHandler, Route};

/// The routes bound under one mount path.
pub(crate) struct Mounted {
    mount: String,
    routes: RwLock<Vec<Arc<Route>>>,
}

impl Mounted {
    pub(crate) fn new(mount: String) -> Self {
        Self {
            mount,
            routes: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn route_docs(&self) -> Vec<RouteDoc> {
        self.routes.read().iter().map(|route| route.doc()).collect()
    }
}

/// Groups routes under a mount path.
///
/// Created by [`Hop::router`](crate::Hop::router). Clones share the same
/// route list.
#[derive(Clone)]
pub struct Router {
    shared: Arc<Shared>,
    mounted: Arc<Mounted>,
}

impl Router {
    pub(crate) fn new(shared: Arc<Shared>, mounted: Arc<Mounted>) -> Self {
        Self { shared, mounted }
    }

    /// The mount path.
    pub fn mount(&self) -> &str {
        &self.mounted.mount
    }

    /// Starts a GET route.
    pub fn get(&self, path: &str, description: impl Into<String>) -> RouteBuilder {
        self.route(Method::GET, path, description)
    }

    /// Starts a POST route.
    pub fn post(&self, path: &str, description: impl Into<String>) -> RouteBuilder {
        self.route(Method::POST, path, description)
    }

    /// Starts a PUT route.
    pub fn put(&self, path: &str, description: impl Into<String>) -> RouteBuilder {
        self.route(Method::PUT, path, description)
    }

    /// Starts a DELETE route.
    pub fn delete(&self, path: &str, description: impl Into<String>) -> RouteBuilder {
        self.route(Method::DELETE, path, description)
    }

    /// Alias of [`Router::delete`].
    pub fn del(&self, path: &str, description: impl Into<String>) -> RouteBuilder {
        self.delete(path, description)
    }

    /// Starts a PATCH route.
    pub fn patch(&self, path: &str, description: impl Into<String>) -> RouteBuilder {
        self.route(Method::PATCH, path, description)
    }

    /// Starts a route for any method.
    pub fn route(&self, method: Method, path: &str, description: impl Into<String>) -> RouteBuilder {
        RouteBuilder {
            shared: Arc::clone(&self.shared),
            mounted: Arc::clone(&self.mounted),
            path: join_paths(&self.mounted.mount, path),
            method,
            description: description.into(),
            middlewares: MiddlewareChain::new(),
            validators: None,
            output: self.shared.default_output.clone(),
            output_options: Value::Null,
        }
    }

    /// The routes bound through this router, in binding order.
    pub fn routes(&self) -> Vec<Arc<Route>> {
        self.mounted.routes.read().clone()
    }

    /// Documentation descriptors of this router's routes.
    pub fn route_docs(&self) -> Vec<RouteDoc> {
        self.mounted.route_docs()
    }

    /// Builds a Swagger document holding this router's routes only.
    pub fn docs(&self) -> DocsResult<SwaggerDoc> {
        let mut generator = DocsGenerator::new()
            .title(self.shared.docs.title.clone())
            .version(self.shared.docs.version.clone());
        generator.extend(self.route_docs());
        generator.build()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("mount", &self.mounted.mount)
            .field("routes", &self.mounted.routes.read().len())
            .finish()
    }
}

/// Declares one route. Nothing is bound until [`RouteBuilder::run`].
#[must_use = "a route is only bound when `run` is called"]
pub struct RouteBuilder {
    shared: Arc<Shared>,
    mounted: Arc<Mounted>,
    method: Method,
    path: String,
    description: String,
    middlewares: MiddlewareChain,
    validators: Option<ValidatorSet>,
    output: String,
    output_options: Value,
}

impl RouteBuilder {
    /// Appends a named middleware step with its options.
    pub fn middleware(mut self, name: impl Into<String>, options: Value) -> Self {
        self.middlewares.push(name, options);
        self
    }

    /// Appends several named middleware steps without options.
    pub fn middlewares<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.middlewares.push(name, Value::Null);
        }
        self
    }

    /// Declares parameter rules.
    ///
    /// Validator types are resolved against the registry as it is now.
    /// Calling this more than once adds to the same set.
    pub fn params(mut self, build: impl FnOnce(&mut ValidatorSet)) -> Self {
        let set = self
            .validators
            .get_or_insert_with(|| ValidatorSet::new(self.shared.validators.read().clone()));
        build(set);
        self
    }

    /// Selects the output format and its options.
    pub fn outputs(mut self, format: impl Into<String>, options: Value) -> Self {
        self.output = format.into();
        self.output_options = options;
        self
    }

    /// Binds the route to the transport.
    ///
    /// Fails without binding anything if a parameter rule was misconfigured.
    pub fn run<H, Fut, R>(self, handler: H) -> Result<Arc<Route>, RouteError>
    where
        H: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = LindyResult<R>> + Send + 'static,
        R: Into<Reply> + 'static,
    {
        let id = format!("{} {}", self.method, self.path);

        let rules = match self.validators {
            Some(set) => set.finish().map_err(|source| RouteError::InvalidRule {
                route: id.clone(),
                source,
            })?,
            None => Rules::default(),
        };

        let handler: BoxedHandler = Arc::new(move |params: Params| {
            let pending = handler(params);
            Box::pin(async move { pending.await.map(Into::into) })
                as BoxFuture<'static, LindyResult<Reply>>
        });

        let route = Arc::new(Route {
            id,
            method: self.method,
            path: self.path,
            description: self.description,
            middlewares: self.middlewares,
            rules,
            output: self.output,
            output_options: self.output_options,
            handler,
            context: Arc::clone(&self.shared.context),
        });

        let bound = Arc::clone(&route);
        self.shared.transport.register(
            route.method().clone(),
            route.path(),
            Arc::new(move |request: Request| {
                let route = Arc::clone(&bound);
                Box::pin(async move { route.handle(request).await }) as BoxFuture<'static, Response>
            }),
        );
        self.mounted.routes.write().push(Arc::clone(&route));

        tracing::debug!(
            route = %route.id(),
            middlewares = route.middlewares().steps().len(),
            rules = route.rules().len(),
            output = %route.output(),
            "route bound"
        );

        Ok(route)
    }
}

impl fmt::Debug for RouteBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteBuilder")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// Joins a mount path and a route path with exactly one `/` between them.
pub(crate) fn join_paths(mount: &str, path: &str) -> String {
    let mount = mount.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    match (mount.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{path}"),
        (false, true) => ensure_leading_slash(mount),
        (false, false) => format!("{}/{path}", ensure_leading_slash(mount)),
    }
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
