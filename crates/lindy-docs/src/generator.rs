//! Projects route descriptors onto a Swagger document.
//!
//! The generator reads only static route configuration: it never runs a
//! request, so documentation can be rebuilt at any time.

use http::Method;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{DocsError, DocsResult};
use crate::swagger::{Info, Items, Operation, Parameter, ParameterIn, Response, SwaggerDoc};

/// Static description of one route.
#[derive(Debug, Clone)]
pub struct RouteDoc {
    /// HTTP method.
    pub method: Method,
    /// Full path, mount included, with `{name}` segments.
    pub path: String,
    /// Route description.
    pub summary: String,
    /// One entry per declared field.
    pub parameters: Vec<ParamDoc>,
    /// Mime type of the route's output format, if registered.
    pub produces: Option<String>,
}

/// Static description of one field.
#[derive(Debug, Clone)]
pub struct ParamDoc {
    /// Field name as read from the request.
    pub name: String,
    /// Explicit location; `None` follows the method default.
    pub location: Option<ParameterIn>,
    /// Whether the field must be present.
    pub required: bool,
    /// Field description.
    pub description: String,
    /// Primitive type.
    pub schema_type: String,
    /// Whether the field accepts a list.
    pub array: bool,
    /// Default for optional fields.
    pub default: Option<Value>,
}

/// Builds a [`SwaggerDoc`] from [`RouteDoc`]s.
///
/// # Example
///
/// ```
/// use http::Method;
/// use lindy_docs::{DocsGenerator, ParamDoc, RouteDoc};
///
/// let mut generator = DocsGenerator::new().title("Users").version("2.0.0");
/// generator.add_route(RouteDoc {
///     method: Method::GET,
///     path: "/users".to_string(),
///     summary: "List users".to_string(),
///     parameters: vec![ParamDoc {
///         name: "limit".to_string(),
///         location: None,
///         required: false,
///         description: "Page size".to_string(),
///         schema_type: "number".to_string(),
///         array: false,
///         default: None,
///     }],
///     produces: Some("application/json".to_string()),
/// });
///
/// let doc = generator.build().unwrap();
/// let op = doc.operation("/users", "get").unwrap();
/// assert_eq!(op.summary.as_deref(), Some("List users"));
/// assert_eq!(op.produces, vec!["application/json".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocsGenerator {
    info: Info,
    host: Option<String>,
    base_path: Option<String>,
    routes: Vec<RouteDoc>,
}

impl DocsGenerator {
    /// Create a new generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.info.title = title.into();
        self
    }

    /// Set the API version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.info.version = version.into();
        self
    }

    /// Set the API description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.info.description = Some(description.into());
        self
    }

    /// Set the host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the base path.
    #[must_use]
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Adds a route.
    pub fn add_route(&mut self, route: RouteDoc) {
        self.routes.push(route);
    }

    /// Adds several routes.
    pub fn extend(&mut self, routes: impl IntoIterator<Item = RouteDoc>) {
        self.routes.extend(routes);
    }

    /// Builds the document.
    pub fn build(&self) -> DocsResult<SwaggerDoc> {
        let mut doc = SwaggerDoc::new(self.info.clone());
        doc.host.clone_from(&self.host);
        doc.base_path.clone_from(&self.base_path);

        for route in &self.routes {
            let method = route.method.as_str().to_ascii_lowercase();
            let item = doc.paths.entry(route.path.clone()).or_default();
            let Some(slot) = item.slot_mut(&method) else {
                return Err(DocsError::UnsupportedMethod {
                    method: route.method.to_string(),
                    path: route.path.clone(),
                });
            };
            if slot.is_some() {
                return Err(DocsError::DuplicateOperation {
                    method: route.method.to_string(),
                    path: route.path.clone(),
                });
            }
            *slot = Some(convert_route(route));
        }

        Ok(doc)
    }
}

/// The location a field without an explicit one is documented in.
#[must_use]
pub fn default_location(method: &Method) -> ParameterIn {
    if *method == Method::GET || *method == Method::DELETE {
        ParameterIn::Query
    } else {
        ParameterIn::FormData
    }
}

fn convert_route(route: &RouteDoc) -> Operation {
    let parameters = route
        .parameters
        .iter()
        .map(|param| convert_param(&route.method, param))
        .collect();

    let mut responses = IndexMap::new();
    responses.insert(
        "200".to_string(),
        Response {
            description: "Successful response".to_string(),
        },
    );

    Operation {
        summary: (!route.summary.is_empty()).then(|| route.summary.clone()),
        parameters,
        produces: route.produces.iter().cloned().collect(),
        responses,
    }
}

fn convert_param(method: &Method, param: &ParamDoc) -> Parameter {
    let location = param.location.unwrap_or_else(|| default_location(method));
    let (param_type, items, collection_format) = if param.array {
        // `multi` is only valid for query and form parameters.
        let format = match location {
            ParameterIn::Query | ParameterIn::FormData => "multi",
            ParameterIn::Header | ParameterIn::Path => "csv",
        };
        (
            "array".to_string(),
            Some(Items {
                item_type: param.schema_type.clone(),
            }),
            Some(format.to_string()),
        )
    } else {
        (param.schema_type.clone(), None, None)
    };

    Parameter {
        name: param.name.clone(),
        location,
        description: (!param.description.is_empty()).then(|| param.description.clone()),
        // Path parameters are always required.
        required: param.required || location == ParameterIn::Path,
        param_type,
        items,
        collection_format,
        default: param.default.clone(),
    }
}
