//! Process-wide middleware registry.

use crate::middleware::{BoxedMiddleware, Middleware};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Maps middleware names to implementations.
///
/// Lookups happen per request, so re-registering a name changes the
/// behavior of routes that were bound earlier. Concurrent registration while
/// serving is last-writer-wins.
#[derive(Default)]
pub struct MiddlewareRegistry {
    entries: RwLock<HashMap<String, BoxedMiddleware>>,
}

impl MiddlewareRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a middleware, replacing any previous one with that name.
    pub fn register(&self, name: impl Into<String>, middleware: impl Middleware) {
        self.register_arc(name, Arc::new(middleware));
    }

    /// Registers an already shared middleware.
    pub fn register_arc(&self, name: impl Into<String>, middleware: BoxedMiddleware) {
        let name = name.into();
        tracing::debug!(middleware = %name, "registering middleware");
        self.entries.write().insert(name, middleware);
    }

    /// Returns the middleware registered under `name`.
    pub fn get(&self, name: &str) -> Option<BoxedMiddleware> {
        self.entries.read().get(name).cloned()
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Returns the registered names.
    pub fn names(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }
}

impl fmt::Debug for MiddlewareRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareRegistry")
            .field("names", &self.names())
            .finish()
    }
}
