//! A single field's rule and its fluent builder.

use crate::{RuleConfigError, RuleKind, Source};
use futures_util::future::try_join_all;
use lindy_core::{FieldError, Request};
use serde_json::Value;
use std::fmt;

/// One field's validation contract plus its metadata.
///
/// Rules are created through a [`ValidatorSet`](crate::ValidatorSet) and
/// configured with a [`RuleBuilder`]; once the route is bound they are only
/// read.
pub struct Rule {
    field: String,
    description: String,
    optional: bool,
    default: Option<Value>,
    rename: Option<String>,
    array: bool,
    source: Source,
    kind: Box<dyn RuleKind>,
}

impl Rule {
    /// Creates a required rule reading from the method-dependent source.
    pub fn new(field: impl Into<String>, description: impl Into<String>, kind: Box<dyn RuleKind>) -> Self {
        Self {
            field: field.into(),
            description: description.into(),
            optional: false,
            default: None,
            rename: None,
            array: false,
            source: Source::Auto,
            kind,
        }
    }

    /// The request field this rule reads.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The rule's registered type name.
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// The primitive type used in documentation.
    pub fn schema_type(&self) -> &'static str {
        self.kind.schema_type()
    }

    /// Whether absence is allowed.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The value used when an optional field is absent.
    ///
    /// Array rules wrap a scalar default in a one-element array, matching
    /// the shape of validated values.
    pub fn default_value(&self) -> Option<Value> {
        match &self.default {
            Some(scalar) if self.array && !scalar.is_array() => Some(Value::Array(vec![scalar.clone()])),
            other => other.clone(),
        }
    }

    /// The key the validated value is stored under.
    pub fn output_key(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.field)
    }

    /// Whether each element is validated independently.
    pub fn is_array(&self) -> bool {
        self.array
    }

    /// The configured source.
    pub fn source(&self) -> Source {
        self.source
    }

    /// Evaluates this rule against a request.
    ///
    /// Returns `Ok(None)` when an optional field without default is absent.
    /// `null` counts as absent. Defaults are used as-is, without validation.
    pub async fn evaluate(&self, request: &Request) -> Result<Option<Value>, FieldError> {
        let raw = self
            .source
            .lookup(request, &self.field)
            .filter(|value| !value.is_null());

        let Some(raw) = raw else {
            if !self.optional {
                return Err(FieldError::missing(&self.field));
            }
            return Ok(self.default_value());
        };

        if !self.array {
            return self.kind.validate(&self.field, raw).await.map(Some);
        }

        let elements = match raw {
            Value::Array(items) => items.iter().collect::<Vec<_>>(),
            scalar => vec![scalar],
        };
        let validated = try_join_all(
            elements
                .into_iter()
                .map(|element| self.kind.validate(&self.field, element)),
        )
        .await?;
        Ok(Some(Value::Array(validated)))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("field", &self.field)
            .field("type", &self.kind.type_name())
            .field("optional", &self.optional)
            .field("default", &self.default)
            .field("rename", &self.rename)
            .field("array", &self.array)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Fluent configuration of a newly declared [`Rule`].
///
/// A builder for a rule that could not be created (unknown type name) accepts
/// every call and does nothing; the failure is already recorded on the set.
pub struct RuleBuilder<'a> {
    rule: Option<&'a mut Rule>,
    errors: &'a mut Vec<RuleConfigError>,
}

impl<'a> RuleBuilder<'a> {
    pub(crate) fn new(rule: Option<&'a mut Rule>, errors: &'a mut Vec<RuleConfigError>) -> Self {
        Self { rule, errors }
    }

    /// Absence is not an error.
    pub fn optional(mut self) -> Self {
        if let Some(rule) = self.rule.as_deref_mut() {
            rule.optional = true;
        }
        self
    }

    /// Value used when the field is absent. Only applies to optional rules.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        if let Some(rule) = self.rule.as_deref_mut() {
            rule.default = Some(value.into());
        }
        self
    }

    /// Stores the validated value under another key.
    pub fn as_(mut self, name: impl Into<String>) -> Self {
        if let Some(rule) = self.rule.as_deref_mut() {
            rule.rename = Some(name.into());
        }
        self
    }

    /// Validates each element; scalars are wrapped in a one-element array.
    pub fn array(mut self) -> Self {
        if let Some(rule) = self.rule.as_deref_mut() {
            rule.array = true;
        }
        self
    }

    /// Reads the raw value from a named location: `query`, `header`,
    /// `path`, `body` or `formData`.
    pub fn in_(mut self, location: &str) -> Self {
        match location.parse::<Source>() {
            Ok(source) => self.located(source),
            Err(location) => {
                if let Some(rule) = self.rule.as_deref_mut() {
                    tracing::debug!(field = %rule.field, location = %location, "invalid rule location");
                    self.errors.push(RuleConfigError::InvalidLocation {
                        location,
                        field: rule.field.clone(),
                    });
                }
                self
            }
        }
    }

    /// Reads the raw value from the given source.
    pub fn located(mut self, source: Source) -> Self {
        if let Some(rule) = self.rule.as_deref_mut() {
            rule.source = source;
        }
        self
    }

    /// Applies type-specific configuration.
    ///
    /// Records a configuration error when the rule is not of kind `K`.
    pub fn with<K: RuleKind>(mut self, configure: impl FnOnce(&mut K)) -> Self {
        if let Some(rule) = self.rule.as_deref_mut() {
            let actual = rule.kind.type_name();
            match rule.kind.as_any_mut().downcast_mut::<K>() {
                Some(kind) => configure(kind),
                None => self.errors.push(RuleConfigError::KindMismatch {
                    field: rule.field.clone(),
                    expected: short_type_name::<K>().to_string(),
                    actual: actual.to_string(),
                }),
            }
        }
        self
    }
}

fn short_type_name<K>() -> &'static str {
    let full = std::any::type_name::<K>();
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NumberRule, StringRule};
    use http::Method;
    use lindy_core::ErrorKind;
    use serde_json::json;

    fn get(query: Value) -> Request {
        let Value::Object(query) = query else {
            unreachable!()
        };
        Request::new(Method::GET, "/").with_query(query)
    }

    fn string_rule(field: &str) -> Rule {
        Rule::new(field, "", Box::new(StringRule::default()))
    }

    #[tokio::test]
    async fn test_missing_required_field() {
        let rule = string_rule("foo");
        let err = rule.evaluate(&get(json!({}))).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::FieldMissing);
        assert_eq!(err.message, "'foo' is mandatory");
    }

    #[tokio::test]
    async fn test_null_counts_as_absent() {
        let rule = string_rule("foo");
        let err = rule.evaluate(&get(json!({"foo": null}))).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::FieldMissing);
    }

    #[tokio::test]
    async fn test_optional_default_applies_only_when_absent() {
        let mut rule = string_rule("foo");
        rule.optional = true;
        rule.default = Some(json!("bar"));

        assert_eq!(rule.evaluate(&get(json!({}))).await.unwrap(), Some(json!("bar")));
        assert_eq!(rule.evaluate(&get(json!({"foo": ""}))).await.unwrap(), Some(json!("")));
    }

    #[tokio::test]
    async fn test_array_default_is_wrapped() {
        let mut rule = string_rule("tags");
        rule.optional = true;
        rule.array = true;
        rule.default = Some(json!("x"));
        assert_eq!(rule.evaluate(&get(json!({}))).await.unwrap(), Some(json!(["x"])));

        rule.default = Some(json!(["a", "b"]));
        assert_eq!(rule.evaluate(&get(json!({}))).await.unwrap(), Some(json!(["a", "b"])));
    }

    #[tokio::test]
    async fn test_optional_without_default_is_skipped() {
        let mut rule = string_rule("foo");
        rule.optional = true;
        assert_eq!(rule.evaluate(&get(json!({}))).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_array_wraps_scalars() {
        let mut rule = string_rule("foo");
        rule.array = true;

        assert_eq!(rule.evaluate(&get(json!({"foo": "foo"}))).await.unwrap(), Some(json!(["foo"])));
        assert_eq!(
            rule.evaluate(&get(json!({"foo": ["foo", "bar"]}))).await.unwrap(),
            Some(json!(["foo", "bar"]))
        );
    }

    #[tokio::test]
    async fn test_array_validates_each_element() {
        let mut rule = Rule::new("ids", "", Box::new(NumberRule::default()));
        rule.array = true;

        let ok = rule.evaluate(&get(json!({"ids": ["1", "2"]}))).await.unwrap();
        assert_eq!(ok, Some(json!([1, 2])));

        let err = rule.evaluate(&get(json!({"ids": ["1", "x"]}))).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_builder_records_invalid_location() {
        let mut rule = string_rule("foo");
        let mut errors = Vec::new();
        let _ = RuleBuilder::new(Some(&mut rule), &mut errors).in_("cookie");
        assert_eq!(
            errors,
            vec![RuleConfigError::InvalidLocation {
                location: "cookie".to_string(),
                field: "foo".to_string(),
            }]
        );
        assert_eq!(rule.source(), Source::Auto);
    }

    #[test]
    fn test_builder_records_kind_mismatch() {
        let mut rule = string_rule("foo");
        let mut errors = Vec::new();
        let _ = RuleBuilder::new(Some(&mut rule), &mut errors).with::<NumberRule>(|k| k.min = Some(1.0));
        assert!(matches!(
            &errors[..],
            [RuleConfigError::KindMismatch { expected, actual, .. }] if expected == "NumberRule" && actual == "string"
        ));
    }

    #[test]
    fn test_output_key_uses_rename() {
        let mut rule = string_rule("foo");
        let mut errors = Vec::new();
        let _ = RuleBuilder::new(Some(&mut rule), &mut errors).as_("bar");
        assert_eq!(rule.output_key(), "bar");
        assert!(errors.is_empty());
    }
}
