//! Mutable response handle.
//!
//! Middlewares and outputs write into a [`Response`]; the transport converts
//! it into an `http::Response` once the pipeline finishes.

use bytes::Bytes;
use http::header::{self, HeaderName, HeaderValue, InvalidHeaderValue};
use http::{HeaderMap, StatusCode};
use http_body_util::Full;

/// The HTTP response being assembled for a request.
///
/// # Example
///
/// ```
/// use lindy_core::Response;
/// use http::StatusCode;
///
/// let mut response = Response::new();
/// response.set_status(StatusCode::CREATED);
/// response.set_content_type("application/json").unwrap();
/// response.write(r#"{"ok":true}"#);
///
/// let http = response.into_http();
/// assert_eq!(http.status(), StatusCode::CREATED);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Creates an empty `200 OK` response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Sets the status code.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Returns the headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the headers mutably.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Sets a header, replacing any previous value.
    pub fn set_header(&mut self, name: HeaderName, value: &str) -> Result<(), InvalidHeaderValue> {
        let value = HeaderValue::from_str(value)?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Sets the `Content-Type` header.
    pub fn set_content_type(&mut self, mime: &str) -> Result<(), InvalidHeaderValue> {
        self.set_header(header::CONTENT_TYPE, mime)
    }

    /// Returns the `Content-Type` header, if set.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Issues a redirect: 301 when permanent, 302 otherwise.
    ///
    /// The body is cleared.
    pub fn redirect(&mut self, url: &str, permanent: bool) -> Result<(), InvalidHeaderValue> {
        self.set_header(header::LOCATION, url)?;
        self.status = if permanent {
            StatusCode::MOVED_PERMANENTLY
        } else {
            StatusCode::FOUND
        };
        self.body = Bytes::new();
        Ok(())
    }

    /// Returns the `Location` header when this response is a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        if !self.status.is_redirection() {
            return None;
        }
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    /// Writes the raw body, replacing any previous body.
    pub fn write(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Converts this response into an `http::Response`.
    #[must_use]
    pub fn into_http(self) -> http::Response<Full<Bytes>> {
        let mut response = http::Response::new(Full::new(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
