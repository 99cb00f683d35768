//! # Lindy Core
//!
//! Core types shared by every stage of the Lindy request pipeline.
//!
//! This crate provides the foundational types used throughout Lindy:
//!
//! - [`ErrorKind`] - The fixed error taxonomy and its status code mapping
//! - [`FieldError`] - A single field's validation failure
//! - [`Rejection`] - A tagged failure carrying a status class and a payload
//! - [`Failure`] - What middlewares, handlers and outputs return on error
//! - [`Request`] / [`Response`] - The transport-neutral request and response
//! - [`Reply`] / [`Redirect`] - Handler results, including the redirect marker

#![doc(html_root_url = "https://docs.rs/lindy-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod decode;
mod error;
mod reply;
mod request;
mod response;

use std::future::Future;
use std::pin::Pin;

pub use error::{ErrorKind, Failure, FieldError, LindyResult, Rejection, RejectionBody};
pub use reply::{Redirect, Reply};
pub use request::{is_read_only, Params, Request};
pub use response::Response;

/// A boxed future, used at every dynamically dispatched async seam.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
