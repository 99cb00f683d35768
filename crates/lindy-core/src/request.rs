//! Transport-neutral request view.
//!
//! The [`Request`] is what middlewares, rules and outputs see of an incoming
//! HTTP request. The transport is responsible for decoding the query string,
//! the body and the headers into JSON maps before the pipeline runs; see
//! [`decode`](crate::decode) for the standard decoders.

use http::Method;
use serde_json::{Map, Value};

/// A map of named JSON values.
///
/// Used for each request section and for the params accumulator handed to
/// handlers.
pub type Params = Map<String, Value>;

/// A decoded HTTP request.
///
/// # Example
///
/// ```
/// use lindy_core::{Params, Request};
/// use http::Method;
/// use serde_json::json;
///
/// let mut query = Params::new();
/// query.insert("limit".to_string(), json!("10"));
///
/// let request = Request::new(Method::GET, "/users").with_query(query);
///
/// assert_eq!(request.method(), &Method::GET);
/// assert_eq!(request.query().get("limit"), Some(&json!("10")));
/// assert!(request.body().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    query: Params,
    body: Params,
    headers: Params,
    path_params: Params,
}

impl Request {
    /// Creates a request with empty sections.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Params::new(),
            body: Params::new(),
            headers: Params::new(),
            path_params: Params::new(),
        }
    }

    /// Sets the decoded query section.
    #[must_use]
    pub fn with_query(mut self, query: Params) -> Self {
        self.query = query;
        self
    }

    /// Sets the decoded body section.
    #[must_use]
    pub fn with_body(mut self, body: Params) -> Self {
        self.body = body;
        self
    }

    /// Sets the header section. Names are lower-cased.
    #[must_use]
    pub fn with_headers(mut self, headers: Params) -> Self {
        self.headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        self
    }

    /// Sets the path parameters extracted by the transport's matcher.
    #[must_use]
    pub fn with_path_params(mut self, path_params: Params) -> Self {
        self.path_params = path_params;
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns `true` for methods whose parameters default to the query string.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        is_read_only(&self.method)
    }

    /// Returns the query section.
    #[must_use]
    pub fn query(&self) -> &Params {
        &self.query
    }

    /// Returns the body section.
    #[must_use]
    pub fn body(&self) -> &Params {
        &self.body
    }

    /// Returns the header section.
    #[must_use]
    pub fn headers(&self) -> &Params {
        &self.headers
    }

    /// Returns a header by name, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&Value> {
        self.headers.get(&name.to_ascii_lowercase())
    }

    /// Returns the path parameters.
    #[must_use]
    pub fn path_params(&self) -> &Params {
        &self.path_params
    }
}

/// Returns `true` for GET and DELETE, whose parameters come from the query.
#[must_use]
pub fn is_read_only(method: &Method) -> bool {
    *method == Method::GET || *method == Method::DELETE
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headers_are_lower_cased() {
        let mut headers = Params::new();
        headers.insert("X-Api-Key".to_string(), json!("secret"));

        let request = Request::new(Method::GET, "/").with_headers(headers);
        assert_eq!(request.headers().get("x-api-key"), Some(&json!("secret")));
        assert_eq!(request.header("X-API-KEY"), Some(&json!("secret")));
    }

    #[test]
    fn test_read_only_methods() {
        assert!(Request::new(Method::GET, "/").is_read_only());
        assert!(Request::new(Method::DELETE, "/").is_read_only());
        assert!(!Request::new(Method::POST, "/").is_read_only());
        assert!(!Request::new(Method::PUT, "/").is_read_only());
        assert!(!Request::new(Method::PATCH, "/").is_read_only());
    }

    #[test]
    fn test_sections_are_independent() {
        let mut body = Params::new();
        body.insert("name".to_string(), json!("alice"));
        let mut path_params = Params::new();
        path_params.insert("id".to_string(), json!("7"));

        let request = Request::new(Method::POST, "/users/7")
            .with_body(body)
            .with_path_params(path_params);

        assert_eq!(request.path(), "/users/7");
        assert!(request.query().get("name").is_none());
        assert_eq!(request.body().get("name"), Some(&json!("alice")));
        assert_eq!(request.path_params().get("id"), Some(&json!("7")));
    }
}
