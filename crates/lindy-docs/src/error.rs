//! Error types for documentation generation.

use thiserror::Error;

/// Errors that can occur while building or serializing a document.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to serialize the document to JSON.
    #[error("Failed to serialize Swagger document: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The route uses a method Swagger 2.0 cannot describe.
    #[error("Unsupported HTTP method '{method}' on '{path}'")]
    UnsupportedMethod {
        /// The offending method.
        method: String,
        /// The route path.
        path: String,
    },

    /// Two routes document the same method and path.
    #[error("Duplicate operation {method} {path}")]
    DuplicateOperation {
        /// The duplicated method.
        method: String,
        /// The duplicated path.
        path: String,
    },
}

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;
