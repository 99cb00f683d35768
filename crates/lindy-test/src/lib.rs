//! # Lindy Test
//!
//! In-memory testing for Lindy routes. No sockets, no ports.
//!
//! - [`MemoryTransport`] implements `lindy_server::Transport` with
//!   `{name}` path segment matching.
//! - [`TestClient`] builds requests, decodes query strings and bodies the way
//!   an HTTP server would, and dispatches them.
//! - [`TestResponse`] wraps the result with assertion helpers.
//!
//! ## Example
//!
//! ```ignore
//! use lindy_core::Failure;
//! use lindy_server::Hop;
//! use lindy_test::{MemoryTransport, TestClient};
//! use lindy_validate::StringRuleExt;
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn test_greeting() {
//!     let transport = MemoryTransport::new();
//!     let hop = Hop::new(transport.clone());
//!     hop.router("/")
//!         .get("/hello", "Greets")
//!         .params(|v| {
//!             v.string("name", "Name").trim();
//!         })
//!         .run(|params| async move { Ok::<_, Failure>(json!({ "hello": params["name"] })) })
//!         .unwrap();
//!
//!     let response = TestClient::new(transport)
//!         .get("/hello?name=%20Ada")
//!         .send()
//!         .await
//!         .unwrap();
//!     assert_eq!(response.json_value().unwrap(), json!({ "hello": "Ada" }));
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/lindy-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod response;
mod transport;

pub use client::{TestClient, TestRequestBuilder};
pub use error::TestError;
pub use response::TestResponse;
pub use transport::MemoryTransport;
