//! # Lindy Output
//!
//! Output formats turn a handler's result, or a normalized error payload,
//! into a response body. Each format is registered under a name together
//! with the content type it produces:
//!
//! | Format | Content type | Serializer |
//! |--------|--------------|------------|
//! | `json` | `application/json` | [`JsonOutput`] |
//! | `text` | `text/plain; charset=utf-8` | [`TextOutput`] |
//! | user-defined | any | [`HtmlOutput`], [`FnOutput`] or a custom [`Output`] |
//!
//! The same format renders both success and error responses, so a route that
//! answers in HTML also reports its errors in HTML.

#![doc(html_root_url = "https://docs.rs/lindy-output/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod formats;
mod output;
mod registry;

pub use formats::{HtmlOutput, JsonOutput, TemplateRenderer, TextOutput};
pub use output::{BoxedOutput, FnOutput, Output};
pub use registry::{OutputRegistry, RegisteredOutput};
