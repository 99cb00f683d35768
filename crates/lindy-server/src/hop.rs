//! The top-level owner of registries and routers.

use std::fmt;
use std::sync::Arc;

use lindy_config::{DocsSection, LindyConfig};
use lindy_docs::{DocsGenerator, DocsResult, SwaggerDoc};
use lindy_middleware::{Middleware, MiddlewareRegistry};
use lindy_output::{Output, OutputRegistry};
use lindy_validate::{RuleKind, ValidatorRegistry};
use parking_lot::RwLock;

use crate::router::{Mounted, Router};
use crate::transport::Transport;

/// Registries consulted by bound routes at request time.
pub(crate) struct PipelineContext {
    pub(crate) middlewares: MiddlewareRegistry,
    pub(crate) outputs: OutputRegistry,
    pub(crate) expose_fault_messages: bool,
}

pub(crate) struct Shared {
    pub(crate) validators: RwLock<ValidatorRegistry>,
    pub(crate) context: Arc<PipelineContext>,
    pub(crate) routers: RwLock<Vec<Arc<Mounted>>>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) default_output: String,
    pub(crate) docs: DocsSection,
}

/// Owns the validator, middleware and output registries and every router
/// created through it.
///
/// Registries are configured before serving. Middlewares and outputs are
/// resolved by name on every request, so re-registering one changes the
/// behavior of routes that are already bound. Validator types are resolved
/// when a route's `.params()` runs.
///
/// `Hop` is cheap to clone; clones share the same state.
///
/// # Example
///
/// ```rust,ignore
/// use lindy_server::Hop;
/// use lindy_validate::StringRuleExt;
///
/// let hop = Hop::new(transport);
/// hop.router("/api")
///     .get("/hello", "Greets someone")
///     .params(|v| {
///         v.string("name", "Who to greet").trim().not_empty();
///     })
///     .run(|params| async move { Ok::<_, Failure>(json!({ "hello": params["name"] })) })?;
/// ```
#[derive(Clone)]
pub struct Hop {
    shared: Arc<Shared>,
}

impl Hop {
    /// Creates a hop with default settings.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::with_config(transport, &LindyConfig::default())
    }

    /// Creates a hop using the `pipeline` and `docs` sections of `config`.
    pub fn with_config(transport: impl Transport + 'static, config: &LindyConfig) -> Self {
        let context = PipelineContext {
            middlewares: MiddlewareRegistry::new(),
            outputs: OutputRegistry::new(),
            expose_fault_messages: config.pipeline.expose_fault_messages,
        };
        Self {
            shared: Arc::new(Shared {
                validators: RwLock::new(ValidatorRegistry::new()),
                context: Arc::new(context),
                routers: RwLock::new(Vec::new()),
                transport: Arc::new(transport),
                default_output: config.pipeline.default_output.clone(),
                docs: config.docs.clone(),
            }),
        }
    }

    /// Creates a router mounted at `mount`.
    pub fn router(&self, mount: impl Into<String>) -> Router {
        let mounted = Arc::new(Mounted::new(mount.into()));
        self.shared.routers.write().push(Arc::clone(&mounted));
        Router::new(Arc::clone(&self.shared), mounted)
    }

    /// Registers a validator type, replacing any previous one with that name.
    pub fn register_validator<K, F>(&self, type_name: impl Into<String>, factory: F)
    where
        K: RuleKind,
        F: Fn() -> K + Send + Sync + 'static,
    {
        self.shared.validators.write().register(type_name, factory);
    }

    /// Registers a middleware, replacing any previous one with that name.
    pub fn register_middleware(&self, name: impl Into<String>, middleware: impl Middleware) {
        self.shared.context.middlewares.register(name, middleware);
    }

    /// Registers an output format, replacing any previous one with that name.
    pub fn register_output(
        &self,
        format: impl Into<String>,
        mime: impl Into<String>,
        output: impl Output,
    ) {
        self.shared.context.outputs.register(format, mime, output);
    }

    /// A snapshot of the validator registry.
    pub fn validators(&self) -> ValidatorRegistry {
        self.shared.validators.read().clone()
    }

    /// The middleware registry.
    pub fn middlewares(&self) -> &MiddlewareRegistry {
        &self.shared.context.middlewares
    }

    /// The output registry.
    pub fn outputs(&self) -> &OutputRegistry {
        &self.shared.context.outputs
    }

    /// Builds the Swagger document for every router.
    pub fn docs(&self) -> DocsResult<SwaggerDoc> {
        let section = &self.shared.docs;
        let mut generator = DocsGenerator::new()
            .title(section.title.clone())
            .version(section.version.clone());
        if let Some(description) = &section.description {
            generator = generator.description(description.clone());
        }
        if let Some(host) = &section.host {
            generator = generator.host(host.clone());
        }
        if let Some(base_path) = &section.base_path {
            generator = generator.base_path(base_path.clone());
        }

        let routers = self.shared.routers.read().clone();
        for mounted in routers {
            generator.extend(mounted.route_docs());
        }
        generator.build()
    }
}

impl fmt::Debug for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hop")
            .field("routers", &self.shared.routers.read().len())
            .field("default_output", &self.shared.default_output)
            .finish_non_exhaustive()
    }
}
