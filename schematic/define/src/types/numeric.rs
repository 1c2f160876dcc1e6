use serde_json::{Number, Value, json};

use super::{Descriptor, mismatch};
use crate::error::CoercionError;
use crate::validation::{Breadcrumb, kind_of};

/// Whole numbers with optional inclusive bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerType {
    minimum: Option<i64>,
    maximum: Option<i64>,
}

impl IntegerType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Smallest accepted value, inclusive.
    pub fn minimum(mut self, minimum: i64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Largest accepted value, inclusive.
    pub fn maximum(mut self, maximum: i64) -> Self {
        self.maximum = Some(maximum);
        self
    }
}

impl Descriptor for IntegerType {
    fn type_name(&self) -> &'static str {
        "integer"
    }

    fn validate_at(&self, value: &Value, at: &Breadcrumb, errors: &mut Vec<String>) {
        let Some(number) = value.as_number().and_then(as_whole) else {
            mismatch(at, errors, "integer", value);
            return;
        };
        if let Some(min) = self.minimum.filter(|&min| number < i128::from(min)) {
            at.report(errors, format_args!("must be >= {min}"));
        }
        if let Some(max) = self.maximum.filter(|&max| number > i128::from(max)) {
            at.report(errors, format_args!("must be <= {max}"));
        }
    }

    fn coerce(&self, value: &Value) -> Result<Value, CoercionError> {
        match value {
            Value::Number(number) if as_whole(number).is_some() => Ok(value.clone()),
            Value::Number(number) => number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| json!(f as i64))
                .ok_or_else(|| CoercionError::new(value, "integer", "invalid integer format")),
            Value::String(text) => text
                .trim()
                .parse::<i64>()
                .map(|parsed| json!(parsed))
                .map_err(|_| CoercionError::new(value, "integer", "invalid integer format")),
            other => Err(CoercionError::new(
                value,
                "integer",
                format!("cannot convert {} to integer", kind_of(other)),
            )),
        }
    }

    fn to_json_schema(&self) -> Value {
        let mut schema = json!({ "type": "integer" });
        if let Some(min) = self.minimum {
            schema["minimum"] = json!(min);
        }
        if let Some(max) = self.maximum {
            schema["maximum"] = json!(max);
        }
        schema
    }
}

fn as_whole(number: &Number) -> Option<i128> {
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
}

/// Floating point numbers with optional inclusive bounds.
///
/// Integers are accepted as valid floats; coercion always yields a JSON
/// float so repeated coercion is stable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FloatType {
    minimum: Option<f64>,
    maximum: Option<f64>,
}

impl FloatType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Smallest accepted value, inclusive.
    pub fn minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Largest accepted value, inclusive.
    pub fn maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }
}

impl Descriptor for FloatType {
    fn type_name(&self) -> &'static str {
        "float"
    }

    fn validate_at(&self, value: &Value, at: &Breadcrumb, errors: &mut Vec<String>) {
        let Some(number) = value.as_f64() else {
            mismatch(at, errors, "number", value);
            return;
        };
        if let Some(min) = self.minimum.filter(|&min| number < min) {
            at.report(errors, format_args!("must be >= {min}"));
        }
        if let Some(max) = self.maximum.filter(|&max| number > max) {
            at.report(errors, format_args!("must be <= {max}"));
        }
    }

    fn coerce(&self, value: &Value) -> Result<Value, CoercionError> {
        let parsed = match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            other => {
                return Err(CoercionError::new(
                    value,
                    "float",
                    format!("cannot convert {} to float", kind_of(other)),
                ));
            }
        };
        parsed
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| CoercionError::new(value, "float", "invalid float format"))
    }

    fn to_json_schema(&self) -> Value {
        let mut schema = json!({ "type": "number" });
        if let Some(min) = self.minimum {
            schema["minimum"] = json!(min);
        }
        if let Some(max) = self.maximum {
            schema["maximum"] = json!(max);
        }
        schema
    }
}
