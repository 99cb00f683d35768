//! Rule kinds: the type-specific half of a rule.
//!
//! A [`RuleKind`] validates and coerces one raw value. The built-in kinds are
//! [`StringRule`] and [`NumberRule`]; extension kinds implement the same
//! trait and are registered by type name in a
//! [`ValidatorRegistry`](crate::ValidatorRegistry).

mod number;
mod string;

use async_trait::async_trait;
use lindy_core::FieldError;
use serde_json::Value;
use std::any::Any;

pub use number::{NumberRule, NumberRuleExt};
pub use string::{StringRule, StringRuleExt};

/// The validation contract of one rule type.
///
/// `validate` receives a single present raw value (never `null`) and either
/// returns the coerced value or a [`FieldError`]. Lookups that reject with a
/// [`Rejection`](lindy_core::Rejection) convert it with
/// [`FieldError::from_rejection`].
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use lindy_core::{FieldError, Rejection};
/// use lindy_validate::RuleKind;
/// use serde_json::{json, Value};
/// use std::any::Any;
///
/// #[derive(Default)]
/// struct UserRule;
///
/// #[async_trait]
/// impl RuleKind for UserRule {
///     fn type_name(&self) -> &'static str {
///         "user"
///     }
///
///     async fn validate(&self, field: &str, raw: &Value) -> Result<Value, FieldError> {
///         match raw.as_str() {
///             Some("1") => Ok(json!({"id": 1, "name": "alice"})),
///             _ => Err(FieldError::from_rejection(
///                 field,
///                 Rejection::not_found(format!("{field} not found")),
///             )),
///         }
///     }
///
///     fn as_any_mut(&mut self) -> &mut dyn Any {
///         self
///     }
/// }
/// ```
#[async_trait]
pub trait RuleKind: Any + Send + Sync {
    /// The registered type name.
    fn type_name(&self) -> &'static str;

    /// The primitive type reported in generated documentation.
    fn schema_type(&self) -> &'static str {
        "string"
    }

    /// Validates and coerces one raw value.
    async fn validate(&self, field: &str, raw: &Value) -> Result<Value, FieldError>;

    /// Gives typed access for type-specific configuration.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Renders a raw value the way validation messages quote it.
pub(crate) fn received(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
