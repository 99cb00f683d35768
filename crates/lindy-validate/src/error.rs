//! Configuration-time rule errors.

use thiserror::Error;

/// A rule declared with an invalid configuration.
///
/// These are recorded while a route's `.params()` builder runs and surface
/// before the route is bound, never at request time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleConfigError {
    /// No validator type is registered under this name.
    #[error("unknown validator type '{type_name}' for field '{field}'")]
    UnknownType {
        /// The requested type name.
        type_name: String,
        /// The field being declared.
        field: String,
    },

    /// `.in()` was given a location that is not a request section.
    #[error("invalid location '{location}' for field '{field}'")]
    InvalidLocation {
        /// The rejected location.
        location: String,
        /// The field being declared.
        field: String,
    },

    /// A type-specific option was applied to a rule of another type.
    #[error("option for '{expected}' applied to field '{field}' of type '{actual}'")]
    KindMismatch {
        /// The field being declared.
        field: String,
        /// The type the option belongs to.
        expected: String,
        /// The rule's actual type.
        actual: String,
    },
}
