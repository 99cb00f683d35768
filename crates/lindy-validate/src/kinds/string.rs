use super::{received, RuleKind};
use crate::RuleBuilder;
use async_trait::async_trait;
use lindy_core::FieldError;
use serde_json::Value;
use std::any::Any;

/// The built-in `string` rule.
///
/// Transforms apply in a fixed order: trim, then the `not_empty` check, then
/// case folding. Non-string raw values fail with `TypeMismatch`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringRule {
    /// Strip surrounding whitespace.
    pub trim: bool,
    /// Reject empty strings (checked after trimming).
    pub not_empty: bool,
    /// Lower-case the value.
    pub lower_case: bool,
    /// Upper-case the value.
    pub upper_case: bool,
}

impl StringRule {
    /// Applies the transforms to a string value.
    pub fn apply(&self, field: &str, value: &str) -> Result<String, FieldError> {
        let mut value = if self.trim {
            value.trim().to_string()
        } else {
            value.to_string()
        };

        if self.not_empty && value.is_empty() {
            return Err(FieldError::constraint(
                field,
                format!("'{field}' must not be empty. Received '{value}'"),
            ));
        }

        if self.lower_case {
            value = value.to_lowercase();
        }
        if self.upper_case {
            value = value.to_uppercase();
        }
        Ok(value)
    }
}

#[async_trait]
impl RuleKind for StringRule {
    fn type_name(&self) -> &'static str {
        "string"
    }

    async fn validate(&self, field: &str, raw: &Value) -> Result<Value, FieldError> {
        match raw {
            Value::String(s) => self.apply(field, s).map(Value::String),
            other => Err(FieldError::type_mismatch(
                field,
                format!("'{field}' must be a string. Received '{}'", received(other)),
            )),
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Fluent `string` options on a [`RuleBuilder`].
pub trait StringRuleExt: Sized {
    /// Strip surrounding whitespace.
    fn trim(self) -> Self;
    /// Lower-case the value.
    fn lower_case(self) -> Self;
    /// Upper-case the value.
    fn upper_case(self) -> Self;
    /// Reject empty values.
    fn not_empty(self) -> Self;
}

impl StringRuleExt for RuleBuilder<'_> {
    fn trim(self) -> Self {
        self.with::<StringRule>(|k| k.trim = true)
    }

    fn lower_case(self) -> Self {
        self.with::<StringRule>(|k| k.lower_case = true)
    }

    fn upper_case(self) -> Self {
        self.with::<StringRule>(|k| k.upper_case = true)
    }

    fn not_empty(self) -> Self {
        self.with::<StringRule>(|k| k.not_empty = true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lindy_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_trim_not_empty_lower_case() {
        let rule = StringRule {
            trim: true,
            not_empty: true,
            lower_case: true,
            upper_case: false,
        };
        assert_eq!(rule.apply("foo", "  FooBar  ").unwrap(), "foobar");

        let err = rule.apply("foo", "   ").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ConstraintViolation);
        assert_eq!(err.message, "'foo' must not be empty. Received ''");
    }

    #[test]
    fn test_untrimmed_whitespace_is_not_empty() {
        let rule = StringRule {
            not_empty: true,
            ..StringRule::default()
        };
        assert_eq!(rule.apply("foo", "  ").unwrap(), "  ");
    }

    #[test]
    fn test_upper_case() {
        let rule = StringRule {
            upper_case: true,
            ..StringRule::default()
        };
        assert_eq!(rule.apply("foo", "abc").unwrap(), "ABC");
    }

    #[tokio::test]
    async fn test_rejects_non_strings() {
        let err = StringRule::default()
            .validate("foo", &json!(42))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
        assert_eq!(err.field.as_deref(), Some("foo"));
        assert_eq!(err.message, "'foo' must be a string. Received '42'");
    }

    #[tokio::test]
    async fn test_empty_string_passes_without_not_empty() {
        let value = StringRule::default().validate("foo", &json!("")).await.unwrap();
        assert_eq!(value, json!(""));
    }
}
