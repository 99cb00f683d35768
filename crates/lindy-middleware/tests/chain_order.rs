//! Ordering guarantees of the middleware chain.

use http::{Method, StatusCode};
use lindy_core::{BoxFuture, Failure, Params, Rejection, Request, Response};
use lindy_middleware::{Middleware, MiddlewareChain, MiddlewareRegistry};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Records start and end events; sleeps for `options.delay_ms` in between.
struct Recorder {
    log: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl Middleware for Recorder {
    fn process<'a>(
        &'a self,
        _request: &'a Request,
        _response: &'a mut Response,
        options: &'a Value,
        params: &'a mut Params,
    ) -> BoxFuture<'a, Result<(), Failure>> {
        Box::pin(async move {
            let id = options["id"].as_str().unwrap_or_default().to_string();
            self.log.lock().push(format!("start:{id}"));
            let delay = options["delay_ms"].as_u64().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.log.lock().push(format!("end:{id}"));
            if self.fail {
                return Err(Rejection::forbidden(format!("{id} refused")).into());
            }
            params.insert(id, json!(true));
            Ok(())
        })
    }
}

fn registry(log: &Arc<Mutex<Vec<String>>>) -> MiddlewareRegistry {
    let registry = MiddlewareRegistry::new();
    registry.register(
        "ok",
        Recorder {
            log: Arc::clone(log),
            fail: false,
        },
    );
    registry.register(
        "deny",
        Recorder {
            log: Arc::clone(log),
            fail: true,
        },
    );
    registry
}

#[tokio::test]
async fn steps_never_overlap() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = registry(&log);

    let mut chain = MiddlewareChain::new();
    chain.push("ok", json!({"id": "slow", "delay_ms": 30}));
    chain.push("ok", json!({"id": "fast", "delay_ms": 0}));
    chain.push("ok", json!({"id": "last", "delay_ms": 5}));

    let request = Request::new(Method::GET, "/");
    let mut response = Response::new();
    let mut params = Params::new();
    chain
        .run(&registry, &request, &mut response, &mut params)
        .await
        .unwrap();

    assert_eq!(
        *log.lock(),
        vec!["start:slow", "end:slow", "start:fast", "end:fast", "start:last", "end:last"]
    );
    assert_eq!(params.len(), 3);
}

#[tokio::test]
async fn failure_stops_later_steps() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = registry(&log);

    let mut chain = MiddlewareChain::new();
    chain.push("ok", json!({"id": "a"}));
    chain.push("deny", json!({"id": "b"}));
    chain.push("ok", json!({"id": "c"}));

    let request = Request::new(Method::GET, "/");
    let mut response = Response::new();
    let mut params = Params::new();
    let err = chain
        .run(&registry, &request, &mut response, &mut params)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(*log.lock(), vec!["start:a", "end:a", "start:b", "end:b"]);
    assert!(params.contains_key("a"));
    assert!(!params.contains_key("c"));
}

#[tokio::test]
async fn missing_step_stops_before_later_steps() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = registry(&log);

    let mut chain = MiddlewareChain::new();
    chain.push("nope", Value::Null);
    chain.push("ok", json!({"id": "never"}));

    let request = Request::new(Method::GET, "/");
    let mut response = Response::new();
    let mut params = Params::new();
    let err = chain
        .run(&registry, &request, &mut response, &mut params)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(log.lock().is_empty());
}
