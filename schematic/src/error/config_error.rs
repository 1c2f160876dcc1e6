//! Endpoint definition errors raised at DSL-call time.

use schematic_define::DefinitionError;
use thiserror::Error;

use crate::input::InputKind;
use crate::operation_id::OperationIdError;

/// Errors in an endpoint or document definition.
///
/// These are programmer errors: they surface while the API is being
/// declared and name the offending value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A type definition could not be resolved.
    #[error("Invalid type definition: {0}")]
    Definition(#[from] DefinitionError),

    /// A status code outside `100..=599`.
    #[error("Invalid HTTP status code: {code} (expected 100..=599)")]
    InvalidStatusCode {
        /// The rejected code.
        code: u16,
    },

    /// An auth type name that no security scheme implements.
    #[error("Unsupported auth type: {auth_type}")]
    UnsupportedAuthType {
        /// The rejected name.
        auth_type: String,
    },

    /// An input was declared with an empty name.
    #[error("Missing name for {kind} input")]
    MissingName {
        /// Kind of the input missing a name.
        kind: InputKind,
    },

    /// Operation id validation failed.
    #[error("Invalid operation id: {0}")]
    InvalidOperationId(#[from] OperationIdError),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A document configuration could not be parsed.
    #[error("Invalid document configuration: {message}")]
    InvalidDocument {
        /// Parser message.
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid document error from any parser error.
    pub fn invalid_document(err: impl std::fmt::Display) -> Self {
        Self::InvalidDocument {
            message: err.to_string(),
        }
    }

    pub fn unsupported_auth_type(auth_type: impl Into<String>) -> Self {
        Self::UnsupportedAuthType {
            auth_type: auth_type.into(),
        }
    }
}
