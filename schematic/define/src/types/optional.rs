use std::sync::Arc;

use serde_json::Value;

use super::{Descriptor, TypeDescriptor};
use crate::error::CoercionError;
use crate::validation::Breadcrumb;

/// Makes a type tolerant of null and absent values.
///
/// `null` is always valid regardless of the inner type's constraints;
/// anything else is delegated. This is also the signal inputs use to mark
/// themselves as not required.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalType {
    inner: Arc<TypeDescriptor>,
}

impl OptionalType {
    /// Wraps `inner`. Wrapping an already optional type keeps a single layer.
    pub fn new(inner: impl Into<TypeDescriptor>) -> Self {
        match inner.into() {
            TypeDescriptor::Optional(already) => already,
            inner => Self {
                inner: Arc::new(inner),
            },
        }
    }

    pub fn inner(&self) -> &TypeDescriptor {
        &self.inner
    }
}

impl Descriptor for OptionalType {
    fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    fn validate_at(&self, value: &Value, at: &Breadcrumb, errors: &mut Vec<String>) {
        if !value.is_null() {
            self.inner.validate_at(value, at, errors);
        }
    }

    fn coerce(&self, value: &Value) -> Result<Value, CoercionError> {
        if value.is_null() {
            Ok(Value::Null)
        } else {
            self.inner.coerce(value)
        }
    }

    /// The inner schema marked `nullable` (OpenAPI 3.0).
    fn to_json_schema(&self) -> Value {
        let mut schema = self.inner.to_json_schema();
        if let Value::Object(map) = &mut schema {
            map.insert("nullable".to_string(), Value::Bool(true));
        }
        schema
    }

    fn is_optional(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IntegerType;
    use serde_json::json;

    #[test]
    fn null_is_always_valid() {
        let ty = OptionalType::new(IntegerType::new().minimum(10));
        let result = ty.validate(&json!(null));
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn present_values_are_delegated() {
        let ty = OptionalType::new(IntegerType::new().minimum(10));
        assert_eq!(ty.validate(&json!(3)).errors(), ["must be >= 10"]);
        assert_eq!(ty.coerce(&json!("12")).unwrap(), json!(12));
        assert_eq!(ty.coerce(&json!(null)).unwrap(), json!(null));
    }

    #[test]
    fn does_not_double_wrap() {
        let once = OptionalType::new(TypeDescriptor::string());
        let twice = OptionalType::new(TypeDescriptor::from(once.clone()));
        assert_eq!(once, twice);
    }

    #[test]
    fn schema_is_nullable() {
        let ty = OptionalType::new(TypeDescriptor::string());
        assert_eq!(ty.to_json_schema(), json!({ "type": "string", "nullable": true }));
        assert_eq!(ty.type_name(), "string");
    }
}
