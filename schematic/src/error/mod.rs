//! Layered error types for endpoint definitions.
//!
//! The error hierarchy follows when a mistake is caught:
//! - [`ConfigError`] - raised while chaining builder calls (bad type, bad status)
//! - [`BuildError`] - raised by `build()` for an inconsistent endpoint
//! - [`ValidationError`] - a request value rejected by an input
//! - [`AuthError`] - credentials rejected by a security scheme
//! - [`ApiError`] - top-level aggregate of all of the above

mod api_error;
mod auth_error;
mod build_error;
mod config_error;
mod validation_error;

pub use api_error::ApiError;
pub use auth_error::AuthError;
pub use build_error::BuildError;
pub use config_error::ConfigError;
pub use validation_error::ValidationError;
