use std::sync::Arc;

use serde_json::{Value, json};

use super::{Descriptor, TypeDescriptor, mismatch};
use crate::error::CoercionError;
use crate::validation::Breadcrumb;

/// Homogeneous sequences with optional size bounds.
///
/// Element errors are attributed by index, so validating
/// `[1, "x", 3]` against an array of integers yields
/// `item[1]: expected integer, got string`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    item: Arc<TypeDescriptor>,
    min_items: Option<usize>,
    max_items: Option<usize>,
}

impl ArrayType {
    pub fn new(item: impl Into<TypeDescriptor>) -> Self {
        Self {
            item: Arc::new(item.into()),
            min_items: None,
            max_items: None,
        }
    }

    pub fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// The element type.
    pub fn item(&self) -> &TypeDescriptor {
        &self.item
    }
}

impl Descriptor for ArrayType {
    fn type_name(&self) -> &'static str {
        "array"
    }

    fn validate_at(&self, value: &Value, at: &Breadcrumb, errors: &mut Vec<String>) {
        let Value::Array(items) = value else {
            mismatch(at, errors, "array", value);
            return;
        };
        if let Some(min) = self.min_items.filter(|&min| items.len() < min) {
            at.report(errors, format_args!("must have at least {min} items"));
        }
        if let Some(max) = self.max_items.filter(|&max| items.len() > max) {
            at.report(errors, format_args!("must have at most {max} items"));
        }
        for (index, item) in items.iter().enumerate() {
            self.item.validate_at(item, &at.index(index), errors);
        }
    }

    /// Coerces every element; the first failing element aborts.
    ///
    /// A lone scalar is treated as a one-element array, which is how a
    /// single occurrence of a repeated query parameter arrives.
    fn coerce(&self, value: &Value) -> Result<Value, CoercionError> {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    self.item
                        .coerce(item)
                        .map_err(|err| err.within(&format!("[{index}]")))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Null | Value::Object(_) => Err(CoercionError::new(
                value,
                "array",
                format!("cannot convert {} to array", crate::validation::kind_of(value)),
            )),
            scalar => self
                .item
                .coerce(scalar)
                .map(|item| Value::Array(vec![item]))
                .map_err(|err| err.within("[0]")),
        }
    }

    fn to_json_schema(&self) -> Value {
        let mut schema = json!({
            "type": "array",
            "items": self.item.to_json_schema(),
        });
        if let Some(min) = self.min_items {
            schema["minItems"] = json!(min);
        }
        if let Some(max) = self.max_items {
            schema["maxItems"] = json!(max);
        }
        schema
    }
}
