//! Structural errors found when an endpoint is materialized.

use thiserror::Error;

use crate::input::InputKind;

/// An endpoint definition that is internally inconsistent.
///
/// These are fatal: the definition has to be fixed at its source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// More than one body input was declared.
    #[error("Endpoint {route} declares {count} body inputs; at most one is allowed")]
    MultipleBodies {
        /// `METHOD /path` of the endpoint.
        route: String,
        /// Number of body inputs found.
        count: usize,
    },

    /// Two inputs of the same kind share a name.
    #[error("Endpoint {route} declares {kind} input `{name}` more than once")]
    DuplicateInput {
        /// `METHOD /path` of the endpoint.
        route: String,
        /// Where the repeated input is read from.
        kind: InputKind,
        /// The repeated name.
        name: String,
    },

    /// Two responses (outputs or errors) share a status code.
    #[error("Endpoint {route} declares more than one response for status {status}")]
    DuplicateStatus {
        /// `METHOD /path` of the endpoint.
        route: String,
        /// The repeated status code.
        status: u16,
    },

    /// A path placeholder has no matching path input.
    #[error("Endpoint {route} has placeholder `{name}` without a path input")]
    MissingPathInput {
        /// `METHOD /path` of the endpoint.
        route: String,
        /// Placeholder name without `:` or braces.
        name: String,
    },

    /// A path input does not appear in the path template.
    #[error("Endpoint {route} declares path input `{name}` that is not in the path")]
    UnknownPathInput {
        /// `METHOD /path` of the endpoint.
        route: String,
        /// Name of the unmatched path input.
        name: String,
    },

    /// The path template itself is malformed.
    #[error("Invalid path `{path}`: {reason}")]
    InvalidPath {
        /// The path template as declared.
        path: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}
