//! Error types for Lindy.
//!
//! Request-time failures come in three shapes:
//!
//! | Type | Produced by | Surfaces as |
//! |------|-------------|-------------|
//! | [`FieldError`] | A rule's `validate` | One entry of the aggregated 400 |
//! | [`Rejection`] | Middlewares, handlers, outputs | Its own status and payload |
//! | [`Failure`] | Any pipeline stage | Normalized by [`Failure::into_parts`] |
//!
//! The taxonomy in [`ErrorKind`] maps every failure class onto a transport
//! status code:
//!
//! | `ErrorKind` | Status |
//! |---|---|
//! | `FieldMissing` | 400 |
//! | `TypeMismatch` | 400 |
//! | `ConstraintViolation` | 400 |
//! | `NotFound` | 404 |
//! | `Forbidden` | 403 |
//! | `InternalError` | 500 |

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use thiserror::Error;

/// Result type alias using [`Failure`].
pub type LindyResult<T> = Result<T, Failure>;

/// The fixed error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A required field is absent from the request.
    FieldMissing,
    /// The raw value cannot be coerced to the declared type.
    TypeMismatch,
    /// The coerced value violates a declared bound or shape constraint.
    ConstraintViolation,
    /// An extension validator's lookup found nothing.
    NotFound,
    /// Reserved for access-control extensions.
    Forbidden,
    /// Missing registration, unexpected fault, or unrecognized rejection.
    InternalError,
}

impl ErrorKind {
    /// Returns the HTTP status code for this error kind.
    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::FieldMissing | Self::TypeMismatch | Self::ConstraintViolation => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the wire name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FieldMissing => "FieldMissing",
            Self::TypeMismatch => "TypeMismatch",
            Self::ConstraintViolation => "ConstraintViolation",
            Self::NotFound => "NotFound",
            Self::Forbidden => "Forbidden",
            Self::InternalError => "InternalError",
        }
    }

    /// Parses a wire name back into a kind.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "FieldMissing" => Some(Self::FieldMissing),
            "TypeMismatch" => Some(Self::TypeMismatch),
            "ConstraintViolation" => Some(Self::ConstraintViolation),
            "NotFound" => Some(Self::NotFound),
            "Forbidden" => Some(Self::Forbidden),
            "InternalError" => Some(Self::InternalError),
            _ => None,
        }
    }

    /// Classifies a bare status code.
    ///
    /// 400-class statuses without a more specific mapping are treated as
    /// constraint violations.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::FORBIDDEN => Self::Forbidden,
            s if s.is_client_error() => Self::ConstraintViolation,
            _ => Self::InternalError,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field's validation failure.
///
/// Serialized as `{"error": <kind>, "field": ..., "message": ..., ...extra}`.
///
/// # Example
///
/// ```
/// use lindy_core::{ErrorKind, FieldError};
///
/// let err = FieldError::missing("email");
/// assert_eq!(err.kind, ErrorKind::FieldMissing);
/// assert_eq!(err.field.as_deref(), Some("email"));
/// assert_eq!(err.message, "'email' is mandatory");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct FieldError {
    /// The error class.
    #[serde(rename = "error")]
    pub kind: ErrorKind,
    /// The field that failed, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// Arbitrary extra payload, flattened into the entry.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldError {
    /// Creates a field error of the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
            extra: Map::new(),
        }
    }

    /// Creates a `FieldMissing` error for a required field.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(ErrorKind::FieldMissing, format!("'{field}' is mandatory")).with_field(field)
    }

    /// Creates a `TypeMismatch` error.
    #[must_use]
    pub fn type_mismatch(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch, message).with_field(field)
    }

    /// Creates a `ConstraintViolation` error.
    #[must_use]
    pub fn constraint(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConstraintViolation, message).with_field(field)
    }

    /// Creates a `NotFound` error.
    #[must_use]
    pub fn not_found(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message).with_field(field)
    }

    /// Sets the field name.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds an extra payload entry.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Converts a rejection raised by an extension validator into a field error.
    ///
    /// The kind comes from the payload's `error` label when it names a known
    /// kind, otherwise from the rejection's status. Unknown payload keys are
    /// kept as extra entries.
    #[must_use]
    pub fn from_rejection(field: impl Into<String>, rejection: Rejection) -> Self {
        let status = rejection.status();
        match rejection.into_payload() {
            Value::Object(mut map) => {
                let kind = map
                    .get("error")
                    .and_then(Value::as_str)
                    .and_then(ErrorKind::from_name)
                    .unwrap_or_else(|| ErrorKind::from_status(status));
                let message = match map.remove("message") {
                    Some(Value::String(message)) => message,
                    Some(other) => other.to_string(),
                    None => status.canonical_reason().unwrap_or("Rejected").to_string(),
                };
                map.remove("error");
                map.remove("field");
                Self {
                    kind,
                    field: Some(field.into()),
                    message,
                    extra: map,
                }
            }
            Value::String(message) => {
                Self::new(ErrorKind::from_status(status), message).with_field(field)
            }
            other => Self::new(ErrorKind::from_status(status), other.to_string()).with_field(field),
        }
    }

    /// Returns the JSON form of this error.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("error".to_string(), Value::from(self.kind.as_str()));
        if let Some(field) = &self.field {
            map.insert("field".to_string(), Value::from(field.as_str()));
        }
        map.insert("message".to_string(), Value::from(self.message.as_str()));
        for (key, value) in &self.extra {
            map.entry(key.clone()).or_insert_with(|| value.clone());
        }
        Value::Object(map)
    }
}

/// The body of a rejection: either a bare message or a structured payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionBody {
    /// A message, auto-labelled with the status name.
    Message(String),
    /// A structured payload, used as-is.
    Payload(Value),
}

impl From<&str> for RejectionBody {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<String> for RejectionBody {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<Value> for RejectionBody {
    fn from(payload: Value) -> Self {
        Self::Payload(payload)
    }
}

impl From<FieldError> for RejectionBody {
    fn from(error: FieldError) -> Self {
        Self::Payload(error.to_value())
    }
}

/// A tagged failure carrying a status class and a payload.
///
/// The status code is metadata: it selects the response status and is never
/// part of the serialized payload.
///
/// # Example
///
/// ```
/// use lindy_core::Rejection;
/// use http::StatusCode;
///
/// let rejection = Rejection::not_found("user not found");
/// assert_eq!(rejection.status(), StatusCode::NOT_FOUND);
/// assert_eq!(rejection.payload()["error"], "NotFound");
/// assert_eq!(rejection.payload()["message"], "user not found");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("rejected with status {status}: {payload}")]
pub struct Rejection {
    status: StatusCode,
    payload: Value,
}

impl Rejection {
    /// Creates a rejection with an arbitrary status.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<RejectionBody>) -> Self {
        let payload = match body.into() {
            RejectionBody::Message(message) => json!({
                "error": Self::label_for(status),
                "message": message,
            }),
            RejectionBody::Payload(payload) => payload,
        };
        Self { status, payload }
    }

    /// Creates a rejection from an explicit label and message pair.
    #[must_use]
    pub fn labelled(status: StatusCode, label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            payload: json!({
                "error": label.into(),
                "message": message.into(),
            }),
        }
    }

    /// 400 Bad Request.
    #[must_use]
    pub fn bad_request(body: impl Into<RejectionBody>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, body)
    }

    /// 403 Forbidden.
    #[must_use]
    pub fn forbidden(body: impl Into<RejectionBody>) -> Self {
        Self::new(StatusCode::FORBIDDEN, body)
    }

    /// 404 Not Found.
    #[must_use]
    pub fn not_found(body: impl Into<RejectionBody>) -> Self {
        Self::new(StatusCode::NOT_FOUND, body)
    }

    /// 500 Internal Error.
    #[must_use]
    pub fn internal_error(body: impl Into<RejectionBody>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, body)
    }

    /// Returns the status code carried by this rejection.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the payload.
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Consumes the rejection and returns the payload.
    #[must_use]
    pub fn into_payload(self) -> Value {
        self.payload
    }

    /// The label used for message-only rejections.
    fn label_for(status: StatusCode) -> String {
        match status {
            StatusCode::BAD_REQUEST => "BadRequest".to_string(),
            StatusCode::FORBIDDEN => "Forbidden".to_string(),
            StatusCode::NOT_FOUND => "NotFound".to_string(),
            StatusCode::INTERNAL_SERVER_ERROR => "InternalError".to_string(),
            other => other
                .canonical_reason()
                .unwrap_or("Error")
                .replace(' ', ""),
        }
    }
}

/// A failed pipeline stage.
///
/// The three variants correspond to the three normalization rules applied
/// before an error response is rendered:
///
/// - [`Failure::Rejected`] keeps its status and payload.
/// - [`Failure::Fault`] is logged and replaced by a generic `InternalError`.
/// - [`Failure::Value`] passes through unchanged with status 500.
#[derive(Debug, Error)]
pub enum Failure {
    /// A tagged rejection.
    #[error(transparent)]
    Rejected(Rejection),

    /// An unexpected fault. The source is logged, never sent to clients.
    #[error("fault: {0}")]
    Fault(anyhow::Error),

    /// A plain rejected value without a status tag.
    #[error("rejected with value {0}")]
    Value(Value),
}

impl Failure {
    /// Wraps any error as a fault.
    pub fn fault(error: impl Into<anyhow::Error>) -> Self {
        Self::Fault(error.into())
    }

    /// Wraps a plain value.
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Returns the status this failure will be reported with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Rejected(rejection) => rejection.status(),
            Self::Fault(_) | Self::Value(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns `true` for unexpected faults.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    /// Normalizes this failure into a status code and a client-safe payload.
    ///
    /// When `expose_fault_messages` is false the fault's message is replaced
    /// by a generic one. Log faults before calling this; the error chain is
    /// dropped here.
    #[must_use]
    pub fn into_parts(self, expose_fault_messages: bool) -> (StatusCode, Value) {
        match self {
            Self::Rejected(rejection) => (rejection.status, rejection.payload),
            Self::Fault(error) => {
                let message = if expose_fault_messages {
                    error.to_string()
                } else {
                    "An internal error occurred".to_string()
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": ErrorKind::InternalError.as_str(), "message": message }),
                )
            }
            Self::Value(value) => (StatusCode::INTERNAL_SERVER_ERROR, value),
        }
    }
}

impl From<Rejection> for Failure {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected(rejection)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(error: anyhow::Error) -> Self {
        Self::Fault(error)
    }
}
