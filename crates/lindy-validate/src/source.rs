//! Request sections a rule reads its raw value from.

use lindy_core::Request;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Where a rule finds its raw value.
///
/// `Auto` resolves per request method: the query string for GET and DELETE,
/// the body otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Source {
    /// Method-dependent default.
    #[default]
    Auto,
    /// The query string.
    Query,
    /// A request header (matched case-insensitively).
    Header,
    /// A path parameter.
    Path,
    /// The decoded body.
    Body,
}

impl Source {
    /// Resolves `Auto` against a request method.
    #[must_use]
    pub fn resolve(self, method: &http::Method) -> Self {
        match self {
            Self::Auto if lindy_core::is_read_only(method) => Self::Query,
            Self::Auto => Self::Body,
            other => other,
        }
    }

    /// Looks up a field's raw value in the resolved section.
    #[must_use]
    pub fn lookup<'r>(self, request: &'r Request, field: &str) -> Option<&'r Value> {
        match self.resolve(request.method()) {
            Self::Query => request.query().get(field),
            Self::Header => request.header(field),
            Self::Path => request.path_params().get(field),
            Self::Body | Self::Auto => request.body().get(field),
        }
    }

    /// Returns the location name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Query => "query",
            Self::Header => "header",
            Self::Path => "path",
            Self::Body => "body",
        }
    }
}

impl FromStr for Source {
    type Err = String;

    /// Parses `query`, `header`, `path`, `body` or `formData`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "query" => Ok(Self::Query),
            "header" => Ok(Self::Header),
            "path" => Ok(Self::Path),
            "body" | "formData" => Ok(Self::Body),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use lindy_core::Params;
    use serde_json::json;

    fn section(key: &str, value: &str) -> Params {
        let mut params = Params::new();
        params.insert(key.to_string(), json!(value));
        params
    }

    #[test]
    fn test_parse_locations() {
        assert_eq!("query".parse::<Source>(), Ok(Source::Query));
        assert_eq!("header".parse::<Source>(), Ok(Source::Header));
        assert_eq!("path".parse::<Source>(), Ok(Source::Path));
        assert_eq!("body".parse::<Source>(), Ok(Source::Body));
        assert_eq!("formData".parse::<Source>(), Ok(Source::Body));
        assert_eq!("cookie".parse::<Source>(), Err("cookie".to_string()));
    }

    #[test]
    fn test_auto_resolution() {
        assert_eq!(Source::Auto.resolve(&Method::GET), Source::Query);
        assert_eq!(Source::Auto.resolve(&Method::DELETE), Source::Query);
        assert_eq!(Source::Auto.resolve(&Method::POST), Source::Body);
        assert_eq!(Source::Auto.resolve(&Method::PATCH), Source::Body);
        assert_eq!(Source::Header.resolve(&Method::GET), Source::Header);
    }

    #[test]
    fn test_lookup_sections() {
        let request = Request::new(Method::POST, "/")
            .with_query(section("q", "from-query"))
            .with_body(section("q", "from-body"))
            .with_headers(section("X-Token", "abc"))
            .with_path_params(section("id", "7"));

        assert_eq!(Source::Auto.lookup(&request, "q"), Some(&json!("from-body")));
        assert_eq!(Source::Query.lookup(&request, "q"), Some(&json!("from-query")));
        assert_eq!(Source::Header.lookup(&request, "X-Token"), Some(&json!("abc")));
        assert_eq!(Source::Path.lookup(&request, "id"), Some(&json!("7")));
        assert_eq!(Source::Path.lookup(&request, "q"), None);
    }
}
