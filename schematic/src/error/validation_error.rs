//! Request value validation errors.

use schematic_define::CoercionError;
use thiserror::Error;

/// A request value rejected by an endpoint input.
///
/// Adapters typically map every variant to a 400-class response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required input was absent or null.
    #[error("Missing required input `{input}`")]
    Missing {
        /// Name of the input.
        input: String,
    },

    /// The value did not satisfy the input's type.
    #[error("Invalid value for `{input}`: {}", .errors.join("; "))]
    Invalid {
        /// Name of the input.
        input: String,
        /// One message per violated constraint.
        errors: Vec<String>,
    },

    /// The raw value could not be converted.
    #[error(transparent)]
    Coercion(#[from] CoercionError),
}

impl ValidationError {
    /// Messages suitable for an error response body.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Missing { input } => vec![format!("{input}: is required")],
            Self::Invalid { errors, .. } => errors.clone(),
            Self::Coercion(err) => vec![err.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_joins_messages() {
        let err = ValidationError::Invalid {
            input: "limit".to_string(),
            errors: vec!["limit: must be <= 100".to_string(), "other".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for `limit`: limit: must be <= 100; other"
        );
        assert_eq!(err.messages().len(), 2);
    }

    #[test]
    fn test_coercion_is_transparent() {
        let err: ValidationError =
            CoercionError::new(&json!("abc"), "integer", "invalid integer format").into();
        assert!(err.to_string().starts_with("cannot coerce"));
    }

    #[test]
    fn test_missing_message() {
        let err = ValidationError::Missing {
            input: "id".to_string(),
        };
        assert_eq!(err.messages(), ["id: is required"]);
    }
}
