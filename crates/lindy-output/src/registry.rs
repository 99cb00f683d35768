//! Process-wide output registry.

use crate::{BoxedOutput, JsonOutput, Output, TextOutput};
use lindy_core::{Failure, LindyResult, Request, Response};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A registered output format: its content type plus serializer.
#[derive(Clone)]
pub struct RegisteredOutput {
    mime: String,
    output: BoxedOutput,
}

impl RegisteredOutput {
    /// The content type set on responses rendered by this format.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Sets the content type, then renders `data`.
    pub async fn render(
        &self,
        request: &Request,
        response: &mut Response,
        data: &Value,
        options: &Value,
    ) -> LindyResult<()> {
        response.set_content_type(&self.mime).map_err(Failure::fault)?;
        self.output.render(request, response, data, options).await
    }
}

impl fmt::Debug for RegisteredOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredOutput")
            .field("mime", &self.mime)
            .finish_non_exhaustive()
    }
}

/// Maps format names to `(content type, serializer)` pairs.
///
/// Lookups happen per request; re-registering a format affects routes bound
/// before the change.
///
/// # Example
///
/// ```
/// use lindy_output::{FnOutput, OutputRegistry};
///
/// let outputs = OutputRegistry::new();
/// assert_eq!(outputs.mime("json").as_deref(), Some("application/json"));
///
/// outputs.register("yaml", "application/yaml", FnOutput::new(|_, response, data, _| {
///     response.write(format!("value: {data}"));
///     Ok(())
/// }));
/// assert!(outputs.get("yaml").is_some());
/// ```
pub struct OutputRegistry {
    entries: RwLock<HashMap<String, RegisteredOutput>>,
}

impl OutputRegistry {
    /// Creates a registry with the built-in `json` and `text` formats.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register("json", "application/json", JsonOutput);
        registry.register("text", "text/plain; charset=utf-8", TextOutput);
        registry
    }

    /// Creates a registry without built-ins.
    pub fn empty() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a format, replacing any previous one with that name.
    pub fn register(&self, format: impl Into<String>, mime: impl Into<String>, output: impl Output) {
        self.register_arc(format, mime, Arc::new(output));
    }

    /// Registers an already shared output.
    pub fn register_arc(&self, format: impl Into<String>, mime: impl Into<String>, output: BoxedOutput) {
        let format = format.into();
        let mime = mime.into();
        tracing::debug!(output = %format, mime = %mime, "registering output format");
        self.entries
            .write()
            .insert(format, RegisteredOutput { mime, output });
    }

    /// Returns the format registered under `format`.
    pub fn get(&self, format: &str) -> Option<RegisteredOutput> {
        self.entries.read().get(format).cloned()
    }

    /// Returns the content type registered for `format`.
    pub fn mime(&self, format: &str) -> Option<String> {
        self.entries.read().get(format).map(|entry| entry.mime.clone())
    }

    /// Returns the registered format names.
    pub fn formats(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }
}

impl Default for OutputRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OutputRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}
