//! Validator registry: type name to rule-kind factory.

use crate::{NumberRule, RuleKind, StringRule};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type KindFactory = Arc<dyn Fn() -> Box<dyn RuleKind> + Send + Sync>;

/// Maps validator type names to factories producing fresh rule kinds.
///
/// Registering an existing name replaces it. Cloning is cheap: factories are
/// shared.
///
/// # Example
///
/// ```
/// use lindy_validate::{StringRule, ValidatorRegistry};
///
/// let mut registry = ValidatorRegistry::new();
/// assert!(registry.contains("string"));
/// assert!(registry.contains("number"));
///
/// registry.register("slug", || StringRule {
///     trim: true,
///     lower_case: true,
///     ..StringRule::default()
/// });
/// assert!(registry.create("slug").is_some());
/// assert!(registry.create("email").is_none());
/// ```
#[derive(Clone)]
pub struct ValidatorRegistry {
    factories: HashMap<String, KindFactory>,
}

impl ValidatorRegistry {
    /// Creates a registry holding the built-in `string` and `number` types.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("string", StringRule::default);
        registry.register("number", NumberRule::default);
        registry
    }

    /// Creates a registry without built-ins.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a factory under a type name, replacing any previous one.
    pub fn register<K, F>(&mut self, type_name: impl Into<String>, factory: F)
    where
        K: RuleKind,
        F: Fn() -> K + Send + Sync + 'static,
    {
        let type_name = type_name.into();
        tracing::debug!(validator = %type_name, "registering validator type");
        self.factories.insert(
            type_name,
            Arc::new(move || Box::new(factory()) as Box<dyn RuleKind>),
        );
    }

    /// Instantiates a fresh rule kind.
    pub fn create(&self, type_name: &str) -> Option<Box<dyn RuleKind>> {
        self.factories.get(type_name).map(|factory| factory())
    }

    /// Returns `true` if the type name is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Returns all registered type names.
    pub fn type_names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
