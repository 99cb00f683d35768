//! Test client for in-memory requests.

use bytes::Bytes;
use http::{header, Method};
use lindy_core::decode::{parse_body, parse_query};
use lindy_core::{Params, Request};
use serde::Serialize;
use serde_json::Value;

use crate::error::TestError;
use crate::response::TestResponse;
use crate::transport::MemoryTransport;

/// A client that sends requests straight to a [`MemoryTransport`].
///
/// Query strings and bodies are decoded the way an HTTP server would before
/// the pipeline sees them: query values are strings (repeated keys become
/// lists), JSON bodies keep their types, and form bodies decode like queries.
///
/// # Example
///
/// ```rust,ignore
/// let client = TestClient::new(transport);
///
/// let response = client
///     .post("/users")
///     .json(&json!({ "name": "Alice" }))
///     .send()
///     .await?;
///
/// assert_eq!(response.status_code(), 200);
/// ```
#[derive(Debug, Clone)]
pub struct TestClient {
    transport: MemoryTransport,
    default_headers: Vec<(String, String)>,
}

impl TestClient {
    /// Creates a client for `transport`.
    pub fn new(transport: MemoryTransport) -> Self {
        Self {
            transport,
            default_headers: Vec::new(),
        }
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// The underlying transport.
    pub fn transport(&self) -> &MemoryTransport {
        &self.transport
    }

    /// Creates a GET request builder.
    pub fn get(&self, uri: impl AsRef<str>) -> TestRequestBuilder<'_> {
        self.request(Method::GET, uri)
    }

    /// Creates a POST request builder.
    pub fn post(&self, uri: impl AsRef<str>) -> TestRequestBuilder<'_> {
        self.request(Method::POST, uri)
    }

    /// Creates a PUT request builder.
    pub fn put(&self, uri: impl AsRef<str>) -> TestRequestBuilder<'_> {
        self.request(Method::PUT, uri)
    }

    /// Creates a PATCH request builder.
    pub fn patch(&self, uri: impl AsRef<str>) -> TestRequestBuilder<'_> {
        self.request(Method::PATCH, uri)
    }

    /// Creates a DELETE request builder.
    pub fn delete(&self, uri: impl AsRef<str>) -> TestRequestBuilder<'_> {
        self.request(Method::DELETE, uri)
    }

    /// Creates a request builder with any method.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> TestRequestBuilder<'_> {
        let mut builder = TestRequestBuilder {
            client: self,
            method,
            uri: uri.as_ref().to_string(),
            extra_query: Vec::new(),
            headers: Vec::new(),
            body: None,
            error: None,
        };
        for (name, value) in &self.default_headers {
            builder = builder.header(name, value);
        }
        builder
    }
}

/// Builder for one test request.
#[must_use = "requests are only sent by `send`"]
pub struct TestRequestBuilder<'a> {
    client: &'a TestClient,
    method: Method,
    uri: String,
    extra_query: Vec<String>,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
    error: Option<TestError>,
}

impl TestRequestBuilder<'_> {
    /// Sets a header, replacing any previous value for that name.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let name = name.as_ref().to_ascii_lowercase();
        self.headers.retain(|(existing, _)| *existing != name);
        self.headers.push((name, value.as_ref().to_string()));
        self
    }

    /// Sets the Content-Type header.
    pub fn content_type(self, content_type: impl AsRef<str>) -> Self {
        self.header(header::CONTENT_TYPE.as_str(), content_type)
    }

    /// Appends url-encoded pairs to the query string.
    ///
    /// Accepts anything `serde_urlencoded` can encode, such as a struct, a
    /// map, or a slice of pairs (which may repeat a key).
    pub fn query<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_urlencoded::to_string(value) {
            Ok(encoded) if !encoded.is_empty() => self.extra_query.push(encoded),
            Ok(_) => {}
            Err(e) => self.fail(TestError::RequestBuild(format!("Invalid query: {e}"))),
        }
        self
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the request body as JSON.
    ///
    /// This also sets the `Content-Type` header to `application/json`.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.body = Some(Bytes::from(bytes)),
            Err(e) => self.fail(TestError::Json(e)),
        }
        self.content_type("application/json")
    }

    /// Sets the request body as form-urlencoded.
    ///
    /// This also sets the `Content-Type` header to
    /// `application/x-www-form-urlencoded`.
    pub fn form<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_urlencoded::to_string(value) {
            Ok(encoded) => self.body = Some(Bytes::from(encoded)),
            Err(e) => self.fail(TestError::RequestBuild(format!("Invalid form: {e}"))),
        }
        self.content_type("application/x-www-form-urlencoded")
    }

    fn fail(&mut self, error: TestError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Decodes the request the way a server would.
    pub fn build(self) -> Result<Request, TestError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let (path, inline_query) = match self.uri.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (self.uri.clone(), None),
        };
        let query_string = inline_query
            .into_iter()
            .chain(self.extra_query)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("&");
        let query = parse_query(&query_string)
            .map_err(|e| TestError::RequestBuild(format!("Invalid query: {e}")))?;

        let content_type = self
            .headers
            .iter()
            .find(|(name, _)| name == header::CONTENT_TYPE.as_str())
            .map(|(_, value)| value.as_str());
        let body = match &self.body {
            Some(bytes) => parse_body(content_type, bytes)
                .map_err(|e| TestError::RequestBuild(format!("Invalid body: {e}")))?,
            None => Params::new(),
        };

        let headers: Params = self
            .headers
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect();

        Ok(Request::new(self.method, path)
            .with_query(query)
            .with_body(body)
            .with_headers(headers))
    }

    /// Sends the request and returns the response.
    pub async fn send(self) -> Result<TestResponse, TestError> {
        let transport = self.client.transport.clone();
        let request = self.build()?;
        let response = transport.dispatch(request).await;
        Ok(TestResponse::from_response(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> TestClient {
        TestClient::new(MemoryTransport::new())
    }

    #[test]
    fn test_query_merging() {
        let client = client();
        let request = client
            .get("/tags?tag=a")
            .query(&[("tag", "b"), ("limit", "5")])
            .build()
            .unwrap();

        assert_eq!(request.path(), "/tags");
        assert_eq!(request.query()["tag"], json!(["a", "b"]));
        assert_eq!(request.query()["limit"], "5");
    }

    #[test]
    fn test_json_body() {
        let client = client();
        let request = client
            .post("/users")
            .json(&json!({ "name": "Alice", "age": 30 }))
            .build()
            .unwrap();

        assert_eq!(request.body()["age"], 30);
        assert_eq!(request.header("Content-Type").unwrap(), "application/json");
    }

    #[test]
    fn test_form_body() {
        let client = client();
        let request = client
            .post("/users")
            .form(&[("name", "Bob")])
            .build()
            .unwrap();

        assert_eq!(request.body()["name"], "Bob");
    }

    #[test]
    fn test_default_headers() {
        let client = client().with_default_header("X-Api-Key", "secret");
        let request = client.get("/").header("x-api-key", "override").build().unwrap();
        assert_eq!(request.header("x-api-key").unwrap(), "override");
        assert_eq!(request.headers().len(), 1);
    }

    #[test]
    fn test_invalid_json_body() {
        let client = client();
        let result = client
            .post("/users")
            .content_type("application/json")
            .body("{not json")
            .build();
        assert!(matches!(result, Err(TestError::RequestBuild(_))));
    }
}
