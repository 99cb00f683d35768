//! # Lindy Docs
//!
//! Swagger 2.0 documentation derived from route declarations.
//!
//! Each route contributes one operation under `paths[<full path>][<method>]`.
//! Its parameters come from the route's declared fields: name, primitive
//! type, location, required flag and description. Fields without an explicit
//! location are documented in `query` for GET and DELETE and in `formData`
//! otherwise.
//!
//! ## Example
//!
//! ```
//! use http::Method;
//! use lindy_docs::{DocsGenerator, RouteDoc};
//!
//! let mut generator = DocsGenerator::new().title("Pets").version("1.0.0");
//! generator.add_route(RouteDoc {
//!     method: Method::DELETE,
//!     path: "/pets/{id}".to_string(),
//!     summary: "Delete a pet".to_string(),
//!     parameters: Vec::new(),
//!     produces: None,
//! });
//!
//! let json = generator.build().unwrap().to_json().unwrap();
//! assert!(json.contains(r#""/pets/{id}":{"delete""#));
//! ```

#![doc(html_root_url = "https://docs.rs/lindy-docs/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod generator;
mod swagger;

pub use error::{DocsError, DocsResult};
pub use generator::{default_location, DocsGenerator, ParamDoc, RouteDoc};
pub use swagger::{Info, Items, Operation, Parameter, ParameterIn, PathItem, Response, SwaggerDoc};
