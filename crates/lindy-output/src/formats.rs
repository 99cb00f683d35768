//! Built-in output formats.

use crate::Output;
use lindy_core::{BoxFuture, Failure, LindyResult, Request, Response};
use serde_json::Value;

/// Writes the data as compact JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOutput;

impl Output for JsonOutput {
    fn render<'a>(
        &'a self,
        _request: &'a Request,
        response: &'a mut Response,
        data: &'a Value,
        options: &'a Value,
    ) -> BoxFuture<'a, LindyResult<()>> {
        Box::pin(async move {
            let pretty = options.get("pretty").and_then(Value::as_bool).unwrap_or(false);
            let body = if pretty {
                serde_json::to_vec_pretty(data)
            } else {
                serde_json::to_vec(data)
            }
            .map_err(Failure::fault)?;
            response.write(body);
            Ok(())
        })
    }
}

/// Writes strings verbatim and any other value as JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOutput;

impl Output for TextOutput {
    fn render<'a>(
        &'a self,
        _request: &'a Request,
        response: &'a mut Response,
        data: &'a Value,
        _options: &'a Value,
    ) -> BoxFuture<'a, LindyResult<()>> {
        let body = match data {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        response.write(body);
        Box::pin(async { Ok(()) })
    }
}

/// Renders a named template with a JSON context.
///
/// Template engines are supplied by the application.
pub trait TemplateRenderer: Send + Sync + 'static {
    /// Renders `template` with `context`.
    fn render(&self, template: &str, context: &Value) -> anyhow::Result<String>;
}

impl<F> TemplateRenderer for F
where
    F: Fn(&str, &Value) -> anyhow::Result<String> + Send + Sync + 'static,
{
    fn render(&self, template: &str, context: &Value) -> anyhow::Result<String> {
        self(template, context)
    }
}

/// HTML through a [`TemplateRenderer`].
///
/// Successful responses render the template named by the route's
/// `options.template`. Error responses render the template named after the
/// numeric status code, e.g. `"404"`.
#[derive(Debug, Clone)]
pub struct HtmlOutput<R> {
    renderer: R,
}

impl<R: TemplateRenderer> HtmlOutput<R> {
    /// Creates an HTML output backed by `renderer`.
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    fn template_name(response: &Response, options: &Value) -> LindyResult<String> {
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Ok(status.as_str().to_string());
        }
        options
            .get("template")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Failure::fault(anyhow::anyhow!("html output requires a 'template' option")))
    }
}

impl<R: TemplateRenderer> Output for HtmlOutput<R> {
    fn render<'a>(
        &'a self,
        _request: &'a Request,
        response: &'a mut Response,
        data: &'a Value,
        options: &'a Value,
    ) -> BoxFuture<'a, LindyResult<()>> {
        let rendered = Self::template_name(response, options).and_then(|template| {
            self.renderer
                .render(&template, data)
                .map_err(Failure::Fault)
        });
        Box::pin(async move {
            response.write(rendered?);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, StatusCode};
    use serde_json::json;

    fn request() -> Request {
        Request::new(Method::GET, "/")
    }

    fn echo(template: &str, context: &Value) -> anyhow::Result<String> {
        Ok(format!("<{template}>{context}"))
    }

    #[tokio::test]
    async fn test_json_output() {
        let mut response = Response::new();
        JsonOutput
            .render(&request(), &mut response, &json!({"a": [1, 2]}), &Value::Null)
            .await
            .unwrap();
        assert_eq!(response.body().as_ref(), br#"{"a":[1,2]}"#);
    }

    #[tokio::test]
    async fn test_json_output_pretty() {
        let mut response = Response::new();
        JsonOutput
            .render(&request(), &mut response, &json!({"a": 1}), &json!({"pretty": true}))
            .await
            .unwrap();
        assert_eq!(response.body().as_ref(), b"{\n  \"a\": 1\n}");
    }

    #[tokio::test]
    async fn test_text_output() {
        let mut response = Response::new();
        TextOutput
            .render(&request(), &mut response, &json!("hello"), &Value::Null)
            .await
            .unwrap();
        assert_eq!(response.body().as_ref(), b"hello");

        TextOutput
            .render(&request(), &mut response, &json!(42), &Value::Null)
            .await
            .unwrap();
        assert_eq!(response.body().as_ref(), b"42");
    }

    #[tokio::test]
    async fn test_html_success_uses_template_option() {
        let html = HtmlOutput::new(echo);
        let mut response = Response::new();
        html.render(&request(), &mut response, &json!(1), &json!({"template": "home"}))
            .await
            .unwrap();
        assert_eq!(response.body().as_ref(), b"<home>1");
    }

    #[tokio::test]
    async fn test_html_error_uses_status_template() {
        let html = HtmlOutput::new(echo);
        let mut response = Response::new();
        response.set_status(StatusCode::NOT_FOUND);
        html.render(&request(), &mut response, &json!("gone"), &json!({"template": "home"}))
            .await
            .unwrap();
        assert_eq!(response.body().as_ref(), b"<404>\"gone\"");
    }

    #[tokio::test]
    async fn test_html_without_template_is_a_fault() {
        let html = HtmlOutput::new(echo);
        let mut response = Response::new();
        let err = html
            .render(&request(), &mut response, &json!(1), &Value::Null)
            .await
            .unwrap_err();
        assert!(err.is_fault());
    }
}
