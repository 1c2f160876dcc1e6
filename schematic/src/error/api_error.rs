//! Top-level error type.

use super::{AuthError, BuildError, ConfigError, ValidationError};
use crate::openapi::GenerateError;
use thiserror::Error;

/// Top-level error type for all schematic operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust
/// use schematic::{get, ApiError, Registry};
///
/// fn define(registry: &Registry) -> Result<(), ApiError> {
///     get("/users/:id")
///         .path_param("id", "integer")?
///         .ok("string")?
///         .build(registry)?;
///     Ok(())
/// }
///
/// let registry = Registry::new();
/// define(&registry).unwrap();
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Definition errors raised while chaining builder calls.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Structural errors raised by `build()`.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Request values rejected by an input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Credentials rejected by a security scheme.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// OpenAPI document serialization failures.
    #[error(transparent)]
    Generate(#[from] GenerateError),
}
