//! Errors raised by type definitions and coercion.

use serde_json::Value;
use thiserror::Error;

/// A type definition could not be turned into a type descriptor.
///
/// These are programmer errors: they surface while an API is being
/// declared, never while a request is being handled.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The shorthand named a primitive that does not exist.
    #[error("unknown primitive type: {name}")]
    UnknownPrimitive {
        /// The offending name.
        name: String,
    },

    /// An array shorthand listed zero or several element types.
    #[error("array definition must have exactly one element type (found {found})")]
    ArrayArity {
        /// Number of element definitions that were given.
        found: usize,
    },

    /// A string pattern is not a valid regular expression.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The pattern as written.
        pattern: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// A JSON literal cannot describe a type (numbers, booleans, null).
    #[error("unsupported definition literal: {found}")]
    InvalidLiteral {
        /// Kind of the literal that was found.
        found: &'static str,
    },
}

impl DefinitionError {
    /// Creates an unknown primitive error.
    pub fn unknown_primitive(name: impl Into<String>) -> Self {
        Self::UnknownPrimitive { name: name.into() }
    }
}

/// A value could not be converted into the representation a type expects.
///
/// Coercion failures are recoverable: adapters usually turn them into a
/// 400-class response.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot coerce {value} to {target}{}: {reason}", location(.path))]
pub struct CoercionError {
    /// The value as it was received.
    pub value: Value,
    /// Name of the target type (e.g. `integer`).
    pub target: &'static str,
    /// Human-readable reason, often the underlying parser error.
    pub reason: String,
    /// Where the failing value sits inside a nested structure; empty at the root.
    pub path: String,
}

fn location(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else if path.starts_with('[') {
        format!(" at item{path}")
    } else {
        format!(" at {path}")
    }
}

impl CoercionError {
    /// Creates a coercion error for a value at the root.
    pub fn new(value: &Value, target: &'static str, reason: impl Into<String>) -> Self {
        Self {
            value: value.clone(),
            target,
            reason: reason.into(),
            path: String::new(),
        }
    }

    /// Re-anchors the error under a parent location.
    ///
    /// Nested types call this while unwinding so the final path reads
    /// from the outermost field inwards (`items[2].id`).
    pub fn within(mut self, parent: &str) -> Self {
        self.path = if self.path.is_empty() {
            parent.to_string()
        } else if self.path.starts_with('[') {
            format!("{parent}{}", self.path)
        } else {
            format!("{parent}.{}", self.path)
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_primitive_names_the_value() {
        let err = DefinitionError::unknown_primitive("strng");
        assert_eq!(err.to_string(), "unknown primitive type: strng");
    }

    #[test]
    fn coercion_error_display_at_root() {
        let err = CoercionError::new(&json!("abc"), "integer", "invalid integer format");
        assert_eq!(
            err.to_string(),
            "cannot coerce \"abc\" to integer: invalid integer format"
        );
    }

    #[test]
    fn coercion_error_paths_compose_outwards() {
        let err = CoercionError::new(&json!("x"), "integer", "invalid integer format")
            .within("[1]")
            .within("ids")
            .within("filter");
        assert_eq!(err.path, "filter.ids[1]");
        assert!(err.to_string().contains("at filter.ids[1]"));
    }

    #[test]
    fn root_array_index_renders_as_item() {
        let err = CoercionError::new(&json!("x"), "integer", "invalid integer format").within("[2]");
        assert!(err.to_string().contains("at item[2]"));
    }
}
