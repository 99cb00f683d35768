//! The ordered rule collection of one route.

use crate::{Rule, RuleBuilder, RuleConfigError, ValidatorRegistry};
use futures_util::stream::{FuturesUnordered, StreamExt};
use lindy_core::{FieldError, Params, Request};

/// The rules declared for one route, in declaration order.
///
/// Rule types are resolved against the registry snapshot the set was created
/// with. Configuration mistakes are recorded rather than panicking and can be
/// inspected with [`ValidatorSet::config_errors`].
///
/// # Example
///
/// ```
/// use lindy_validate::{NumberRuleExt, StringRuleExt, ValidatorRegistry, ValidatorSet};
///
/// let mut set = ValidatorSet::new(ValidatorRegistry::new());
/// set.string("name", "User name").trim().not_empty();
/// set.number("age", "Age in years").min(0.0).optional();
/// set.rule("uuid", "id", "Identifier");
///
/// assert_eq!(set.rules().len(), 2);
/// assert_eq!(set.config_errors().len(), 1);
/// ```
#[derive(Debug)]
pub struct ValidatorSet {
    registry: ValidatorRegistry,
    rules: Vec<Rule>,
    errors: Vec<RuleConfigError>,
}

impl ValidatorSet {
    /// Creates an empty set resolving types against `registry`.
    pub fn new(registry: ValidatorRegistry) -> Self {
        Self {
            registry,
            rules: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Declares a rule of any registered type.
    pub fn rule(
        &mut self,
        type_name: &str,
        field: impl Into<String>,
        description: impl Into<String>,
    ) -> RuleBuilder<'_> {
        let field = field.into();
        match self.registry.create(type_name) {
            Some(kind) => {
                self.rules.push(Rule::new(field, description, kind));
                RuleBuilder::new(self.rules.last_mut(), &mut self.errors)
            }
            None => {
                tracing::warn!(validator = %type_name, field = %field, "unknown validator type");
                self.errors.push(RuleConfigError::UnknownType {
                    type_name: type_name.to_string(),
                    field,
                });
                RuleBuilder::new(None, &mut self.errors)
            }
        }
    }

    /// Declares a `string` rule.
    pub fn string(&mut self, field: impl Into<String>, description: impl Into<String>) -> RuleBuilder<'_> {
        self.rule("string", field, description)
    }

    /// Declares a `number` rule.
    pub fn number(&mut self, field: impl Into<String>, description: impl Into<String>) -> RuleBuilder<'_> {
        self.rule("number", field, description)
    }

    /// The declared rules.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Configuration errors recorded while declaring rules.
    pub fn config_errors(&self) -> &[RuleConfigError] {
        &self.errors
    }

    /// Consumes the set and returns the recorded configuration errors.
    pub(crate) fn into_parts(self) -> (Vec<Rule>, Vec<RuleConfigError>) {
        (self.rules, self.errors)
    }

    /// Returns `true` when no rules are declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Freezes the set once declaration is complete.
    ///
    /// Fails with the first recorded configuration error.
    pub fn finish(self) -> Result<Rules, RuleConfigError> {
        let (rules, mut errors) = self.into_parts();
        if errors.is_empty() {
            Ok(Rules { rules })
        } else {
            Err(errors.swap_remove(0))
        }
    }
}

/// A frozen, validated rule list ready to evaluate requests.
#[derive(Debug, Default)]
pub struct Rules {
    rules: Vec<Rule>,
}

impl Rules {
    /// The rules, in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates every rule concurrently against `request`.
    ///
    /// Validated values are inserted into `params` under each rule's output
    /// key. One field's failure never stops the others. Errors are returned
    /// in settlement order.
    pub async fn evaluate(&self, request: &Request, params: &mut Params) -> Vec<FieldError> {
        let mut pending: FuturesUnordered<_> = self
            .rules
            .iter()
            .map(|rule| async move { (rule, rule.evaluate(request).await) })
            .collect();

        let mut errors = Vec::new();
        while let Some((rule, outcome)) = pending.next().await {
            match outcome {
                Ok(Some(value)) => {
                    params.insert(rule.output_key().to_string(), value);
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::trace!(field = %rule.field(), error = %error, "field rejected");
                    errors.push(error);
                }
            }
        }
        errors
    }
}

impl<'a> IntoIterator for &'a Rules {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NumberRuleExt, StringRuleExt};
    use http::Method;
    use lindy_core::ErrorKind;
    use serde_json::{json, Value};

    fn post(body: Value) -> Request {
        let Value::Object(body) = body else {
            unreachable!()
        };
        Request::new(Method::POST, "/").with_body(body)
    }

    fn frozen(build: impl FnOnce(&mut ValidatorSet)) -> Rules {
        let mut set = ValidatorSet::new(ValidatorRegistry::new());
        build(&mut set);
        set.finish().unwrap()
    }

    #[tokio::test]
    async fn test_collects_all_errors() {
        let rules = frozen(|v| {
            v.string("name", "");
            v.number("age", "").max(120.0);
            v.string("nick", "").optional();
        });

        let mut params = Params::new();
        let errors = rules.evaluate(&post(json!({"age": "200"})), &mut params).await;

        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.kind == ErrorKind::FieldMissing && e.field.as_deref() == Some("name")));
        assert!(errors.iter().any(|e| e.kind == ErrorKind::ConstraintViolation && e.field.as_deref() == Some("age")));
        assert!(params.is_empty());
    }

    #[tokio::test]
    async fn test_keeps_falsy_values_and_renames() {
        let rules = frozen(|v| {
            v.number("count", "").as_("total");
            v.string("label", "");
        });

        let mut params = Params::new();
        let errors = rules
            .evaluate(&post(json!({"count": 0, "label": ""})), &mut params)
            .await;

        assert!(errors.is_empty());
        assert_eq!(params.get("total"), Some(&json!(0)));
        assert_eq!(params.get("label"), Some(&json!("")));
        assert!(params.get("count").is_none());
    }

    #[tokio::test]
    async fn test_preserves_existing_params() {
        let rules = frozen(|v| {
            v.string("q", "").trim();
        });

        let mut params = Params::new();
        params.insert("limit".to_string(), json!(20));
        let errors = rules.evaluate(&post(json!({"q": " hi "})), &mut params).await;

        assert!(errors.is_empty());
        assert_eq!(params.get("limit"), Some(&json!(20)));
        assert_eq!(params.get("q"), Some(&json!("hi")));
    }

    #[test]
    fn test_finish_reports_config_errors() {
        let mut set = ValidatorSet::new(ValidatorRegistry::new());
        set.string("a", "").in_("nowhere");
        set.number("b", "").not_empty();

        assert_eq!(set.config_errors().len(), 2);
        let err = set.finish().unwrap_err();
        assert!(matches!(err, RuleConfigError::InvalidLocation { .. }));
    }

    #[test]
    fn test_unknown_type_builder_is_inert() {
        let mut set = ValidatorSet::new(ValidatorRegistry::new());
        set.rule("email", "to", "").optional().trim().as_("recipient");

        assert!(set.is_empty());
        assert_eq!(
            set.config_errors(),
            &[RuleConfigError::UnknownType {
                type_name: "email".to_string(),
                field: "to".to_string(),
            }]
        );
    }
}
