//! Validation results and breadcrumb paths for nested values.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Outcome of validating a value against a type descriptor.
///
/// Validation never fails with an error; it always produces one of these
/// and leaves the decision to raise (or respond with a 400) to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    /// A successful result with no errors.
    pub fn valid() -> Self {
        Self::default()
    }

    /// Wraps a list of error messages; an empty list means valid.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self { errors }
    }

    /// Returns `true` when no constraint was violated.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable messages, one per violated constraint.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

/// Location of a value inside a nested structure.
///
/// Carried through recursive validation so that every message can be
/// attributed to a field name or array index. The root location is empty
/// and renders messages without a prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breadcrumb(String);

impl Breadcrumb {
    /// The top-level location.
    pub fn root() -> Self {
        Self::default()
    }

    /// A named top-level location, e.g. the name of a query parameter.
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Descends into an object field.
    pub fn field(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{name}", self.0))
        }
    }

    /// Descends into an array element. At the root this renders as `item[i]`.
    pub fn index(&self, index: usize) -> Self {
        if self.0.is_empty() {
            Self(format!("item[{index}]"))
        } else {
            Self(format!("{}[{index}]", self.0))
        }
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Records `message` at this location.
    pub fn report(&self, errors: &mut Vec<String>, message: impl fmt::Display) {
        if self.0.is_empty() {
            errors.push(message.to_string());
        } else {
            errors.push(format!("{}: {message}", self.0));
        }
    }
}

impl fmt::Display for Breadcrumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short name for the JSON kind of a value, used in mismatch messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_reports_without_prefix() {
        let mut errors = Vec::new();
        Breadcrumb::root().report(&mut errors, "must be <= 100");
        assert_eq!(errors, vec!["must be <= 100"]);
    }

    #[test]
    fn nested_paths() {
        let crumb = Breadcrumb::root().field("user").field("tags").index(2);
        assert_eq!(crumb.as_str(), "user.tags[2]");
        assert_eq!(Breadcrumb::root().index(1).as_str(), "item[1]");
    }

    #[test]
    fn kind_names() {
        assert_eq!(kind_of(&json!(1)), "integer");
        assert_eq!(kind_of(&json!(1.5)), "number");
        assert_eq!(kind_of(&json!(null)), "null");
        assert_eq!(kind_of(&json!({})), "object");
    }

    #[test]
    fn result_validity_follows_errors() {
        assert!(ValidationResult::valid().is_valid());
        let result = ValidationResult::from_errors(vec!["bad".into()]);
        assert!(!result.is_valid());
        assert_eq!(result.errors(), ["bad"]);
    }
}
