use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use super::{Descriptor, TypeDescriptor, mismatch};
use crate::error::CoercionError;
use crate::validation::{Breadcrumb, kind_of};

/// A mapping of field names to types.
///
/// Every field must be present unless its type is optional. Keys that are
/// not declared are ignored, so producers can add fields without breaking
/// older consumers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HashType {
    fields: BTreeMap<String, TypeDescriptor>,
}

impl HashType {
    pub fn new<K, T>(fields: impl IntoIterator<Item = (K, T)>) -> Self
    where
        K: Into<String>,
        T: Into<TypeDescriptor>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, ty)| (name.into(), ty.into()))
                .collect(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &TypeDescriptor)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    pub fn field(&self, name: &str) -> Option<&TypeDescriptor> {
        self.fields.get(name)
    }
}

impl Descriptor for HashType {
    fn type_name(&self) -> &'static str {
        "hash"
    }

    fn validate_at(&self, value: &Value, at: &Breadcrumb, errors: &mut Vec<String>) {
        let Value::Object(map) = value else {
            mismatch(at, errors, "object", value);
            return;
        };
        for (name, ty) in &self.fields {
            validate_field(map, name, ty, !ty.is_optional(), at, errors);
        }
    }

    fn coerce(&self, value: &Value) -> Result<Value, CoercionError> {
        let map = object_input(value, "hash")?;
        coerce_fields(
            map,
            self.fields
                .iter()
                .map(|(name, ty)| (name.as_str(), ty, !ty.is_optional())),
        )
    }

    fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, ty)| (name.clone(), ty.to_json_schema()))
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|(_, ty)| !ty.is_optional())
            .map(|(name, _)| name.as_str())
            .collect();
        object_schema(None, properties, required)
    }
}

/// A single declared field of an [`ObjectType`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeDescriptor,
    pub required: bool,
}

/// An ordered list of fields with per-field `required` flags.
///
/// Behaves like [`HashType`] but keeps declaration order, which keeps
/// OpenAPI property order stable, and lets a field be optional without
/// wrapping its type. A named object is emitted once as a component schema
/// and referenced from operations.
///
/// ```
/// use schematic_define::prelude::*;
/// use serde_json::json;
///
/// let user = ObjectType::named("User")
///     .field("id", TypeDescriptor::integer())
///     .optional_field("nickname", TypeDescriptor::string());
///
/// assert!(user.validate(&json!({ "id": 1 })).is_valid());
/// assert_eq!(user.validate(&json!({})).errors(), ["id: is required"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectType {
    name: Option<String>,
    fields: Vec<Field>,
}

impl ObjectType {
    pub fn new() -> Self {
        Self::default()
    }

    /// An object that is published under `name` in `components.schemas`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            fields: Vec::new(),
        }
    }

    /// Adds a field that is required unless `ty` is optional.
    pub fn field(self, name: impl Into<String>, ty: impl Into<TypeDescriptor>) -> Self {
        let ty = ty.into();
        let required = !ty.is_optional();
        self.field_with(name, ty, required)
    }

    /// Adds a field that may be absent.
    pub fn optional_field(self, name: impl Into<String>, ty: impl Into<TypeDescriptor>) -> Self {
        self.field_with(name, ty, false)
    }

    /// Adds a field with an explicit `required` flag. Redeclaring a name
    /// replaces the earlier field in place.
    pub fn field_with(
        mut self,
        name: impl Into<String>,
        ty: impl Into<TypeDescriptor>,
        required: bool,
    ) -> Self {
        let field = Field {
            name: name.into(),
            ty: ty.into(),
            required,
        };
        match self.fields.iter_mut().find(|existing| existing.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.ty)
    }
}

impl Descriptor for ObjectType {
    fn type_name(&self) -> &'static str {
        "object"
    }

    fn validate_at(&self, value: &Value, at: &Breadcrumb, errors: &mut Vec<String>) {
        let Value::Object(map) = value else {
            mismatch(at, errors, "object", value);
            return;
        };
        for field in &self.fields {
            validate_field(map, &field.name, &field.ty, field.required, at, errors);
        }
    }

    fn coerce(&self, value: &Value) -> Result<Value, CoercionError> {
        let map = object_input(value, "object")?;
        coerce_fields(
            map,
            self.fields
                .iter()
                .map(|field| (field.name.as_str(), &field.ty, field.required)),
        )
    }

    fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|field| (field.name.clone(), field.ty.to_json_schema()))
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|field| field.required)
            .map(|field| field.name.as_str())
            .collect();
        object_schema(self.name.as_deref(), properties, required)
    }
}

/// Absent and null values satisfy a field that is not required; a null
/// in a required field is checked against the field type like any other value.
fn validate_field(
    map: &Map<String, Value>,
    name: &str,
    ty: &TypeDescriptor,
    required: bool,
    at: &Breadcrumb,
    errors: &mut Vec<String>,
) {
    let location = at.field(name);
    match map.get(name) {
        None if required => location.report(errors, "is required"),
        None => {}
        Some(Value::Null) if !required => {}
        Some(value) => ty.validate_at(value, &location, errors),
    }
}

/// Accepts an object, or a string holding a JSON object (form fields and
/// headers often carry structured values that way).
fn object_input<'a>(
    value: &'a Value,
    target: &'static str,
) -> Result<std::borrow::Cow<'a, Map<String, Value>>, CoercionError> {
    match value {
        Value::Object(map) => Ok(std::borrow::Cow::Borrowed(map)),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(std::borrow::Cow::Owned(map)),
            Ok(other) => Err(CoercionError::new(
                value,
                target,
                format!("expected a JSON object, got {}", kind_of(&other)),
            )),
            Err(err) => Err(CoercionError::new(value, target, err.to_string())),
        },
        other => Err(CoercionError::new(
            value,
            target,
            format!("cannot convert {} to {target}", kind_of(other)),
        )),
    }
}

/// Coerces each declared field that is present. Undeclared keys pass
/// through untouched, and so does a null in a field that is not required.
fn coerce_fields<'a>(
    map: std::borrow::Cow<'_, Map<String, Value>>,
    fields: impl Iterator<Item = (&'a str, &'a TypeDescriptor, bool)>,
) -> Result<Value, CoercionError> {
    let mut coerced = map.into_owned();
    for (name, ty, required) in fields {
        if let Some(raw) = coerced.get(name) {
            if raw.is_null() && !required {
                continue;
            }
            let value = ty.coerce(raw).map_err(|err| err.within(name))?;
            coerced.insert(name.to_string(), value);
        }
    }
    Ok(Value::Object(coerced))
}

fn object_schema(title: Option<&str>, properties: Map<String, Value>, required: Vec<&str>) -> Value {
    let mut schema = json!({
        "type": "object",
        "properties": properties,
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    if let Some(title) = title {
        schema["title"] = json!(title);
    }
    schema
}
