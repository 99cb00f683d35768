//! Registry changes after routes are bound.

use std::any::Any;

use async_trait::async_trait;
use http::StatusCode;
use lindy_core::{Failure, FieldError, Params};
use lindy_middleware::FnMiddleware;
use lindy_output::FnOutput;
use lindy_server::Hop;
use lindy_test::{MemoryTransport, TestClient};
use lindy_validate::RuleKind;
use serde_json::{json, Value};

fn setup() -> (Hop, TestClient) {
    let transport = MemoryTransport::new();
    (Hop::new(transport.clone()), TestClient::new(transport))
}

async fn echo(params: Params) -> Result<Value, Failure> {
    Ok(Value::Object(params))
}

struct Tagged(&'static str);

#[async_trait]
impl RuleKind for Tagged {
    fn type_name(&self) -> &'static str {
        "tagged"
    }

    async fn validate(&self, _field: &str, raw: &Value) -> Result<Value, FieldError> {
        Ok(json!({ "tag": self.0, "raw": raw }))
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[tokio::test]
async fn test_validator_reregistration_only_affects_later_routes() {
    let (hop, client) = setup();
    let router = hop.router("/");

    hop.register_validator("tagged", || Tagged("first"));
    router
        .get("/early", "Bound before the change")
        .params(|v| {
            v.rule("tagged", "x", "Tagged value");
        })
        .run(echo)
        .unwrap();

    hop.register_validator("tagged", || Tagged("second"));
    router
        .get("/late", "Bound after the change")
        .params(|v| {
            v.rule("tagged", "x", "Tagged value");
        })
        .run(echo)
        .unwrap();

    let early = client.get("/early?x=1").send().await.unwrap();
    assert_eq!(early.json_value().unwrap()["x"]["tag"], "first");

    let late = client.get("/late?x=1").send().await.unwrap();
    assert_eq!(late.json_value().unwrap()["x"]["tag"], "second");
}

#[tokio::test]
async fn test_middleware_registered_after_binding_is_used() {
    let (hop, client) = setup();
    hop.router("/")
        .get("/me", "Current user")
        .middleware("session", Value::Null)
        .run(echo)
        .unwrap();

    let response = client.get("/me").send().await.unwrap();
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    hop.register_middleware(
        "session",
        FnMiddleware::new(|_, _, _, params| {
            params.insert("user".to_string(), json!("ada"));
            Ok(())
        }),
    );
    let response = client.get("/me").send().await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json_value().unwrap(), json!({ "user": "ada" }));

    hop.register_middleware(
        "session",
        FnMiddleware::new(|_, _, _, params| {
            params.insert("user".to_string(), json!("grace"));
            Ok(())
        }),
    );
    let response = client.get("/me").send().await.unwrap();
    assert_eq!(response.json_value().unwrap(), json!({ "user": "grace" }));
}

#[tokio::test]
async fn test_output_reregistration_affects_bound_routes() {
    let (hop, client) = setup();
    hop.router("/")
        .get("/value", "A value")
        .run(|_| async { Ok::<_, Failure>(json!({ "n": 1 })) })
        .unwrap();

    let response = client.get("/value").send().await.unwrap();
    assert_eq!(response.content_type(), Some("application/json"));
    assert_eq!(response.text().unwrap(), r#"{"n":1}"#);

    hop.register_output(
        "json",
        "application/vnd.lindy+json",
        FnOutput::new(|_, response, data, _| {
            response.write(format!("wrapped:{data}"));
            Ok(())
        }),
    );

    let response = client.get("/value").send().await.unwrap();
    assert_eq!(response.content_type(), Some("application/vnd.lindy+json"));
    assert_eq!(response.text().unwrap(), r#"wrapped:{"n":1}"#);
}

#[tokio::test]
async fn test_text_output_and_custom_status() {
    let (hop, client) = setup();
    hop.register_middleware(
        "created",
        FnMiddleware::new(|_, response, _, _| {
            response.set_status(StatusCode::CREATED);
            Ok(())
        }),
    );
    hop.router("/")
        .post("/notes", "Creates a note")
        .middlewares(["created"])
        .outputs("text", Value::Null)
        .run(|_| async { Ok::<_, Failure>(json!("saved")) })
        .unwrap();

    let response = client.post("/notes").send().await.unwrap();
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.content_type(), Some("text/plain; charset=utf-8"));
    assert_eq!(response.text().unwrap(), "saved");
}
