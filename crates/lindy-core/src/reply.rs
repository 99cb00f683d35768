//! Handler results.

use crate::Params;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The redirect marker.
///
/// A handler returning a `Redirect` bypasses output serialization; the
/// pipeline answers with 301 (permanent) or 302 and a `Location` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    /// Target URL.
    pub url: String,
    /// Whether the redirect is permanent (301) or temporary (302).
    #[serde(default)]
    pub permanent: bool,
}

impl Redirect {
    /// A temporary (302) redirect.
    #[must_use]
    pub fn to(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            permanent: false,
        }
    }

    /// A permanent (301) redirect.
    #[must_use]
    pub fn permanent(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            permanent: true,
        }
    }
}

/// What a handler produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Data to serialize through the route's output format.
    Data(Value),
    /// A redirect marker.
    Redirect(Redirect),
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        Self::Data(value)
    }
}

impl From<Params> for Reply {
    fn from(params: Params) -> Self {
        Self::Data(Value::Object(params))
    }
}

impl From<Redirect> for Reply {
    fn from(redirect: Redirect) -> Self {
        Self::Redirect(redirect)
    }
}
