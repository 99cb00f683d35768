//! Swagger 2.0 document types.
//!
//! The types follow the Swagger 2.0 specification:
//! <https://swagger.io/specification/v2/>

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DocsResult;

/// Swagger document root object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwaggerDoc {
    /// Swagger version, always `"2.0"`.
    pub swagger: String,
    /// API metadata.
    pub info: Info,
    /// Host serving the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Base path prefixed to every path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "basePath")]
    pub base_path: Option<String>,
    /// Operations keyed by full path.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

impl SwaggerDoc {
    /// Creates an empty document.
    #[must_use]
    pub fn new(info: Info) -> Self {
        Self {
            swagger: "2.0".to_string(),
            info,
            host: None,
            base_path: None,
            paths: IndexMap::new(),
        }
    }

    /// Returns the operation documented for `path` and lower-case `method`.
    #[must_use]
    pub fn operation(&self, path: &str, method: &str) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.operation(method))
    }

    /// Serializes to compact JSON.
    pub fn to_json(&self) -> DocsResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes to indented JSON.
    pub fn to_json_pretty(&self) -> DocsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// API metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: "API".to_string(),
            version: "1.0.0".to_string(),
            description: None,
        }
    }
}

/// The operations available on a single path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// PUT operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// DELETE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// PATCH operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
}

impl PathItem {
    /// Returns the operation for a lower-case method name.
    #[must_use]
    pub fn operation(&self, method: &str) -> Option<&Operation> {
        self.slot(method).and_then(Option::as_ref)
    }

    /// Returns the slot for a lower-case method name.
    fn slot(&self, method: &str) -> Option<&Option<Operation>> {
        match method {
            "get" => Some(&self.get),
            "put" => Some(&self.put),
            "post" => Some(&self.post),
            "delete" => Some(&self.delete),
            "patch" => Some(&self.patch),
            _ => None,
        }
    }

    /// Returns the mutable slot for a lower-case method name.
    pub(crate) fn slot_mut(&mut self, method: &str) -> Option<&mut Option<Operation>> {
        match method {
            "get" => Some(&mut self.get),
            "put" => Some(&mut self.put),
            "post" => Some(&mut self.post),
            "delete" => Some(&mut self.delete),
            "patch" => Some(&mut self.patch),
            _ => None,
        }
    }
}

/// An API operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Short summary (the route description).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Produced mime types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    /// Responses keyed by status code or `default`.
    pub responses: IndexMap<String, Response>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterIn {
    /// Query string parameter.
    Query,
    /// HTTP header.
    Header,
    /// URL path parameter.
    Path,
    /// Form or body field.
    FormData,
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether required.
    #[serde(default)]
    pub required: bool,
    /// Primitive type.
    #[serde(rename = "type")]
    pub param_type: String,
    /// Element type for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
    /// Array serialization format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "collectionFormat")]
    pub collection_format: Option<String>,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Array element description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Items {
    /// Element primitive type.
    #[serde(rename = "type")]
    pub item_type: String,
}

/// Response definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Description (required).
    pub description: String,
}
