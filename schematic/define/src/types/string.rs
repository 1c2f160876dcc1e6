use regex::Regex;
use serde_json::{Value, json};

use super::{Descriptor, mismatch};
use crate::error::{CoercionError, DefinitionError};
use crate::validation::Breadcrumb;

/// Text values with optional constraints.
///
/// Every present constraint is checked independently, so a value that is
/// both too short and off-pattern yields two messages. Length bounds count
/// characters, not bytes, and are inclusive.
///
/// ```
/// use schematic_define::prelude::*;
/// use serde_json::json;
///
/// let code = StringType::new().min_length(2).max_length(3).pattern("^[A-Z]+$").unwrap();
/// assert!(code.validate(&json!("GB")).is_valid());
/// assert_eq!(code.validate(&json!("g")).errors().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringType {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
    allowed: Option<Vec<String>>,
}

impl StringType {
    /// Any text.
    pub fn new() -> Self {
        Self::default()
    }

    /// At least `min` characters.
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// At most `max` characters.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Requires values to match `pattern`.
    ///
    /// ## Errors
    ///
    /// Returns [`DefinitionError::InvalidPattern`] if the pattern does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, DefinitionError> {
        let regex = Regex::new(pattern).map_err(|source| DefinitionError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.pattern = Some(regex);
        Ok(self)
    }

    /// Restricts values to the given set.
    pub fn one_of<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// The set given to [`Self::one_of`], if any.
    pub fn allowed_values(&self) -> Option<&[String]> {
        self.allowed.as_deref()
    }
}

impl PartialEq for StringType {
    fn eq(&self, other: &Self) -> bool {
        self.min_length == other.min_length
            && self.max_length == other.max_length
            && self.pattern.as_ref().map(Regex::as_str) == other.pattern.as_ref().map(Regex::as_str)
            && self.allowed == other.allowed
    }
}

impl Descriptor for StringType {
    fn type_name(&self) -> &'static str {
        "string"
    }

    fn validate_at(&self, value: &Value, at: &Breadcrumb, errors: &mut Vec<String>) {
        let Value::String(text) = value else {
            mismatch(at, errors, "string", value);
            return;
        };

        let length = text.chars().count();
        if let Some(min) = self.min_length.filter(|&min| length < min) {
            at.report(errors, format_args!("length must be >= {min}"));
        }
        if let Some(max) = self.max_length.filter(|&max| length > max) {
            at.report(errors, format_args!("length must be <= {max}"));
        }
        if let Some(regex) = self.pattern.as_ref().filter(|regex| !regex.is_match(text)) {
            at.report(errors, format_args!("must match pattern {}", regex.as_str()));
        }
        if let Some(allowed) = &self.allowed {
            if !allowed.iter().any(|candidate| candidate == text) {
                at.report(errors, format_args!("must be one of: {}", allowed.join(", ")));
            }
        }
    }

    /// Textual conversion; never fails.
    fn coerce(&self, value: &Value) -> Result<Value, CoercionError> {
        Ok(Value::String(stringify(value)))
    }

    fn to_json_schema(&self) -> Value {
        let mut schema = json!({ "type": "string" });
        if let Some(min) = self.min_length {
            schema["minLength"] = json!(min);
        }
        if let Some(max) = self.max_length {
            schema["maxLength"] = json!(max);
        }
        if let Some(regex) = &self.pattern {
            schema["pattern"] = json!(regex.as_str());
        }
        if let Some(allowed) = &self.allowed {
            schema["enum"] = json!(allowed);
        }
        schema
    }
}

/// Renders any JSON value as text: strings verbatim, null as empty,
/// everything else in its compact JSON form.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_each_violated_constraint() {
        let ty = StringType::new()
            .min_length(3)
            .pattern("^[a-z]+$")
            .unwrap()
            .one_of(["abc", "xyz"]);
        let result = ty.validate(&json!("A1"));
        assert_eq!(
            result.errors(),
            [
                "length must be >= 3",
                "must match pattern ^[a-z]+$",
                "must be one of: abc, xyz"
            ]
        );
    }

    #[test]
    fn length_bounds_are_inclusive() {
        let ty = StringType::new().min_length(2).max_length(4);
        assert!(ty.validate(&json!("ab")).is_valid());
        assert!(ty.validate(&json!("abcd")).is_valid());
        assert!(!ty.validate(&json!("abcde")).is_valid());
    }

    #[test]
    fn length_counts_characters() {
        let ty = StringType::new().max_length(2);
        assert!(ty.validate(&json!("éé")).is_valid());
    }

    #[test]
    fn rejects_non_text() {
        let result = StringType::new().validate(&json!(5));
        assert_eq!(result.errors(), ["expected string, got integer"]);
    }

    #[test]
    fn invalid_pattern_fails_fast() {
        let err = StringType::new().pattern("(unclosed").unwrap_err();
        assert!(matches!(err, DefinitionError::InvalidPattern { .. }));
    }

    #[test]
    fn coerce_stringifies() {
        let ty = StringType::new();
        assert_eq!(ty.coerce(&json!(42)).unwrap(), json!("42"));
        assert_eq!(ty.coerce(&json!(true)).unwrap(), json!("true"));
        assert_eq!(ty.coerce(&json!(null)).unwrap(), json!(""));
        assert_eq!(ty.coerce(&json!("x")).unwrap(), json!("x"));
    }

    #[test]
    fn schema_lists_constraints() {
        let ty = StringType::new().min_length(1).one_of(["a", "b"]);
        assert_eq!(
            ty.to_json_schema(),
            json!({ "type": "string", "minLength": 1, "enum": ["a", "b"] })
        );
    }
}
