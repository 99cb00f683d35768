//! An in-memory [`Transport`] that dispatches without sockets.

use std::fmt;
use std::sync::Arc;

use http::{header, HeaderValue, Method, StatusCode};
use lindy_core::{Params, Request, Response};
use lindy_server::{RequestHandler, Transport};
use parking_lot::RwLock;
use serde_json::{json, Value};

/// A route pattern split into segments.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

impl PathPattern {
    fn parse(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|segment| {
                match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) => Segment::Param(name.to_string()),
                    None => Segment::Static(segment.to_string()),
                }
            })
            .collect();
        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    /// Matches `path`, returning the captured parameters.
    fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = split_path(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) if expected == part => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    // Segments that are not valid UTF-8 once decoded are kept raw.
                    let value = urlencoding::decode(part)
                        .map_or_else(|_| part.to_owned(), |decoded| decoded.into_owned());
                    params.insert(name.clone(), Value::from(value));
                }
            }
        }
        Some(params)
    }

    /// Number of static segments; static matches win over parameters.
    fn specificity(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Static(_)))
            .count()
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

struct Registered {
    method: Method,
    pattern: PathPattern,
    handler: RequestHandler,
}

/// A transport that keeps its routes in memory.
///
/// Clones share the same route table, so one clone can be handed to
/// [`Hop::new`](lindy_server::Hop::new) while another dispatches requests.
/// Registering the same method and pattern twice replaces the first handler.
///
/// # Example
///
/// ```rust,ignore
/// let transport = MemoryTransport::new();
/// let hop = Hop::new(transport.clone());
/// // declare routes...
/// let response = transport.dispatch(Request::new(Method::GET, "/pets")).await;
/// ```
#[derive(Clone, Default)]
pub struct MemoryTransport {
    routes: Arc<RwLock<Vec<Registered>>>,
}

impl MemoryTransport {
    /// Creates an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.read().len()
    }

    /// Returns `true` when no route is registered.
    pub fn is_empty(&self) -> bool {
        self.routes.read().is_empty()
    }

    /// Registered `(method, pattern)` pairs, in registration order.
    pub fn patterns(&self) -> Vec<(Method, String)> {
        self.routes
            .read()
            .iter()
            .map(|route| (route.method.clone(), route.pattern.raw.clone()))
            .collect()
    }

    /// Routes `request` to the most specific matching handler.
    ///
    /// Unmatched requests get a 404 JSON response.
    pub async fn dispatch(&self, request: Request) -> Response {
        let matched = {
            let routes = self.routes.read();
            routes
                .iter()
                .filter(|route| route.method == *request.method())
                .filter_map(|route| {
                    route
                        .pattern
                        .matches(request.path())
                        .map(|params| (route.pattern.specificity(), params, Arc::clone(&route.handler)))
                })
                .max_by_key(|(specificity, _, _)| *specificity)
        };

        match matched {
            Some((_, path_params, handler)) => handler(request.with_path_params(path_params)).await,
            None => not_found(&request),
        }
    }
}

impl Transport for MemoryTransport {
    fn register(&self, method: Method, path: &str, handler: RequestHandler) {
        let pattern = PathPattern::parse(path);
        let mut routes = self.routes.write();
        if let Some(existing) = routes
            .iter_mut()
            .find(|route| route.method == method && route.pattern == pattern)
        {
            existing.handler = handler;
        } else {
            routes.push(Registered {
                method,
                pattern,
                handler,
            });
        }
    }
}

impl fmt::Debug for MemoryTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTransport")
            .field("routes", &self.patterns())
            .finish()
    }
}

fn not_found(request: &Request) -> Response {
    let mut response = Response::new();
    response.set_status(StatusCode::NOT_FOUND);
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response.write(
        json!({
            "error": "NotFound",
            "message": format!("No route for {} {}", request.method(), request.path()),
        })
        .to_string(),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use lindy_core::BoxFuture;

    fn echo(label: &'static str) -> RequestHandler {
        Arc::new(move |request: Request| {
            Box::pin(async move {
                let mut response = Response::new();
                response.write(
                    json!({ "label": label, "params": request.path_params() }).to_string(),
                );
                response
            }) as BoxFuture<'static, Response>
        })
    }

    fn body(response: &Response) -> Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    #[test]
    fn test_pattern_matching() {
        let pattern = PathPattern::parse("/users/{id}/posts/{post}");
        let params = pattern.matches("/users/42/posts/7").unwrap();
        assert_eq!(params["id"], "42");
        assert_eq!(params["post"], "7");

        assert!(pattern.matches("/users/42/posts").is_none());
        assert!(pattern.matches("/users/42/comments/7").is_none());
        assert_eq!(pattern.specificity(), 2);
    }

    #[test]
    fn test_captured_segments_are_percent_decoded() {
        let pattern = PathPattern::parse("/users/{name}");
        let params = pattern.matches("/users/a%20b").unwrap();
        assert_eq!(params["name"], "a b");

        let params = pattern.matches("/users/caf%C3%A9").unwrap();
        assert_eq!(params["name"], "café");

        let params = pattern.matches("/users/%FF").unwrap();
        assert_eq!(params["name"], "%FF");
    }

    #[test]
    fn test_trailing_slash_ignored() {
        let pattern = PathPattern::parse("/users/");
        assert!(pattern.matches("/users").is_some());
        assert!(PathPattern::parse("/").matches("/").is_some());
    }

    #[tokio::test]
    async fn test_dispatch_prefers_static_segments() {
        let transport = MemoryTransport::new();
        transport.register(Method::GET, "/users/{id}", echo("param"));
        transport.register(Method::GET, "/users/me", echo("static"));

        let response = transport.dispatch(Request::new(Method::GET, "/users/me")).await;
        assert_eq!(body(&response)["label"], "static");

        let response = transport.dispatch(Request::new(Method::GET, "/users/9")).await;
        assert_eq!(body(&response)["label"], "param");
        assert_eq!(body(&response)["params"]["id"], "9");
    }

    #[tokio::test]
    async fn test_dispatch_unmatched() {
        let transport = MemoryTransport::new();
        transport.register(Method::GET, "/users", echo("list"));

        let response = transport.dispatch(Request::new(Method::POST, "/users")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(&response)["error"], "NotFound");
    }

    #[tokio::test]
    async fn test_reregistration_replaces_handler() {
        let transport = MemoryTransport::new();
        transport.register(Method::GET, "/a", echo("first"));
        transport.register(Method::GET, "/a", echo("second"));

        assert_eq!(transport.len(), 1);
        let response = transport.dispatch(Request::new(Method::GET, "/a")).await;
        assert_eq!(body(&response)["label"], "second");
    }
}
