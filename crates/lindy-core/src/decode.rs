//! Standard decoders for request sections.
//!
//! Transports use these to turn a raw query string or body into the JSON maps
//! exposed by [`Request`](crate::Request). Repeated query keys become arrays,
//! matching what common body-parsing middlewares produce.

use crate::Params;
use serde_json::Value;
use thiserror::Error;

/// Errors produced while decoding a request section.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The url-encoded input is malformed.
    #[error("invalid url-encoded data: {0}")]
    UrlEncoded(#[from] serde_urlencoded::de::Error),

    /// The JSON body is malformed.
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON body is valid but not an object.
    #[error("JSON body must be an object")]
    NotAnObject,

    /// The body's content type has no decoder.
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
}

/// Decodes a url-encoded query string (without the leading `?`).
///
/// # Example
///
/// ```
/// use lindy_core::decode::parse_query;
/// use serde_json::json;
///
/// let query = parse_query("tag=a&tag=b&limit=10").unwrap();
/// assert_eq!(query["tag"], json!(["a", "b"]));
/// assert_eq!(query["limit"], json!("10"));
/// ```
pub fn parse_query(input: &str) -> Result<Params, DecodeError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(input)?;
    let mut params = Params::new();
    for (key, value) in pairs {
        match params.get_mut(&key) {
            Some(Value::Array(values)) => values.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                params.insert(key, Value::String(value));
            }
        }
    }
    Ok(params)
}

/// Decodes a request body according to its content type.
///
/// An empty body decodes to an empty map regardless of content type. JSON
/// bodies must be objects; url-encoded bodies follow [`parse_query`].
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Params, DecodeError> {
    if body.is_empty() {
        return Ok(Params::new());
    }

    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .unwrap_or_else(|| "application/json".to_string());

    match mime.as_str() {
        "application/json" => match serde_json::from_slice(body)? {
            Value::Object(map) => Ok(map),
            _ => Err(DecodeError::NotAnObject),
        },
        "application/x-www-form-urlencoded" => {
            let text = String::from_utf8_lossy(body);
            parse_query(&text)
        }
        _ => Err(DecodeError::UnsupportedContentType(mime)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_empty_query() {
        assert!(parse_query("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_query_repeated_keys() {
        let query = parse_query("a=1&a=2&a=3&b=x").unwrap();
        assert_eq!(query["a"], json!(["1", "2", "3"]));
        assert_eq!(query["b"], json!("x"));
    }

    #[test]
    fn test_parse_query_decodes_escapes() {
        let query = parse_query("name=J%C3%BCrgen+M&empty=").unwrap();
        assert_eq!(query["name"], json!("Jürgen M"));
        assert_eq!(query["empty"], json!(""));
    }

    #[test]
    fn test_parse_json_body() {
        let body = parse_body(Some("application/json; charset=utf-8"), br#"{"a":1}"#).unwrap();
        assert_eq!(body["a"], json!(1));
    }

    #[test]
    fn test_parse_json_body_must_be_object() {
        let err = parse_body(Some("application/json"), b"[1,2]").unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject));
    }

    #[test]
    fn test_parse_form_body() {
        let body = parse_body(Some("application/x-www-form-urlencoded"), b"x=1&y=2").unwrap();
        assert_eq!(body["x"], json!("1"));
        assert_eq!(body["y"], json!("2"));
    }

    #[test]
    fn test_parse_body_unsupported() {
        let err = parse_body(Some("text/csv"), b"a,b").unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedContentType(ct) if ct == "text/csv"));
    }

    #[test]
    fn test_parse_empty_body() {
        assert!(parse_body(Some("text/csv"), b"").unwrap().is_empty());
    }
}
