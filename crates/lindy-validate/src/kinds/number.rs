use super::{received, RuleKind};
use crate::RuleBuilder;
use async_trait::async_trait;
use lindy_core::FieldError;
use serde_json::{Number, Value};
use std::any::Any;

/// The built-in `number` rule.
///
/// Accepts JSON numbers and numeric strings. Bounds are inclusive and only
/// checked when configured.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberRule {
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
}

impl NumberRule {
    /// Parses a raw value into a finite number.
    fn parse(raw: &Value) -> Option<f64> {
        let parsed = match raw {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    s.parse::<f64>().ok()
                }
            }
            _ => None,
        };
        parsed.filter(|n| n.is_finite())
    }

    /// Integral values that fit `i64` are emitted as integers.
    fn to_value(n: f64) -> Value {
        if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
            Value::from(n as i64)
        } else {
            Number::from_f64(n).map_or(Value::Null, Value::Number)
        }
    }
}

#[async_trait]
impl RuleKind for NumberRule {
    fn type_name(&self) -> &'static str {
        "number"
    }

    fn schema_type(&self) -> &'static str {
        "number"
    }

    async fn validate(&self, field: &str, raw: &Value) -> Result<Value, FieldError> {
        let shown = received(raw);
        let Some(n) = Self::parse(raw) else {
            return Err(FieldError::type_mismatch(
                field,
                format!("'{field}' must be a number. Received '{shown}'"),
            ));
        };

        if let Some(min) = self.min {
            if n < min {
                return Err(FieldError::constraint(
                    field,
                    format!("'{field}' must be greater or equal to {min}. Received '{shown}'"),
                )
                .with_extra("min", min));
            }
        }
        if let Some(max) = self.max {
            if n > max {
                return Err(FieldError::constraint(
                    field,
                    format!("'{field}' must be lower or equal to {max}. Received '{shown}'"),
                )
                .with_extra("max", max));
            }
        }

        Ok(Self::to_value(n))
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Fluent `number` options on a [`RuleBuilder`].
pub trait NumberRuleExt: Sized {
    /// Inclusive lower bound.
    fn min(self, min: f64) -> Self;
    /// Inclusive upper bound.
    fn max(self, max: f64) -> Self;
}

impl NumberRuleExt for RuleBuilder<'_> {
    fn min(self, min: f64) -> Self {
        self.with::<NumberRule>(|k| k.min = Some(min))
    }

    fn max(self, max: f64) -> Self {
        self.with::<NumberRule>(|k| k.max = Some(max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lindy_core::ErrorKind;
    use serde_json::json;

    fn bounded(min: f64, max: f64) -> NumberRule {
        NumberRule {
            min: Some(min),
            max: Some(max),
        }
    }

    #[tokio::test]
    async fn test_coerces_numeric_strings() {
        let rule = NumberRule::default();
        assert_eq!(rule.validate("n", &json!("42")).await.unwrap(), json!(42));
        assert_eq!(rule.validate("n", &json!(" 2.5 ")).await.unwrap(), json!(2.5));
        assert_eq!(rule.validate("n", &json!(7)).await.unwrap(), json!(7));
        assert_eq!(rule.validate("n", &json!("0")).await.unwrap(), json!(0));
    }

    #[tokio::test]
    async fn test_rejects_non_numbers() {
        let rule = NumberRule::default();
        for raw in [json!("abc"), json!(""), json!("inf"), json!("NaN"), json!(true)] {
            let err = rule.validate("n", &raw).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::TypeMismatch, "raw = {raw}");
        }

        let err = rule.validate("n", &json!("abc")).await.unwrap_err();
        assert_eq!(err.message, "'n' must be a number. Received 'abc'");
    }

    #[tokio::test]
    async fn test_bounds_are_inclusive() {
        let rule = bounded(1.0, 10.0);
        assert_eq!(rule.validate("n", &json!("1")).await.unwrap(), json!(1));
        assert_eq!(rule.validate("n", &json!("10")).await.unwrap(), json!(10));

        let err = rule.validate("n", &json!("0")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ConstraintViolation);
        assert_eq!(err.message, "'n' must be greater or equal to 1. Received '0'");

        let err = rule.validate("n", &json!("11")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ConstraintViolation);
        assert_eq!(err.message, "'n' must be lower or equal to 10. Received '11'");
    }

    #[tokio::test]
    async fn test_only_configured_bounds_apply() {
        let rule = NumberRule {
            min: Some(0.0),
            max: None,
        };
        assert_eq!(rule.validate("n", &json!(1e9)).await.unwrap(), json!(1_000_000_000));
    }
}
