//! Credential verification errors.

use thiserror::Error;

/// Credentials rejected by a security scheme.
///
/// Produced by [`Security::verify`](crate::Security::verify). Adapters
/// usually answer with a 401.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential was found where the scheme looks for one.
    #[error("Missing credentials in {location}")]
    MissingCredentials {
        /// Header or query parameter that was inspected.
        location: String,
    },

    /// The Authorization header uses a different scheme.
    #[error("Expected {expected} authorization scheme")]
    InvalidScheme {
        /// The scheme that was expected (`Bearer`, `Basic`).
        expected: &'static str,
    },

    /// Basic credentials that are not base64 `user:password`.
    #[error("Malformed basic credentials: {reason}")]
    MalformedBasic {
        /// What went wrong while decoding.
        reason: String,
    },

    /// The scheme prefix was present but the token was empty.
    #[error("Empty token")]
    EmptyToken,
}

impl AuthError {
    /// Returns `true` when the request carried no credential at all, as
    /// opposed to carrying a malformed one.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingCredentials { .. })
    }
}
