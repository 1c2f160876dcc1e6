//! Endpoint inputs: query, path, header and body values.

use std::sync::Arc;

use schematic_define::{Breadcrumb, Descriptor, TypeDescriptor, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum::{Display, EnumIter, EnumString};

use crate::error::{ConfigError, ValidationError};

/// Name given to every body input.
pub const BODY_NAME: &str = "body";

/// Where an input is read from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InputKind {
    Query,
    Path,
    Header,
    Body,
}

impl InputKind {
    /// The OpenAPI `in` value; bodies render as a `requestBody` instead.
    pub fn parameter_location(self) -> Option<&'static str> {
        match self {
            Self::Query => Some("query"),
            Self::Path => Some("path"),
            Self::Header => Some("header"),
            Self::Body => None,
        }
    }
}

/// Serialization format of a request body.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BodyFormat {
    #[default]
    Json,
    Form,
    Multipart,
    Text,
    Binary,
}

impl BodyFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Form => "application/x-www-form-urlencoded",
            Self::Multipart => "multipart/form-data",
            Self::Text => "text/plain",
            Self::Binary => "application/octet-stream",
        }
    }
}

/// Optional settings for an input.
///
/// ```
/// use schematic::InputOptions;
///
/// let options = InputOptions::new().required(false).description("Page size");
/// assert_eq!(options.required, Some(false));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputOptions {
    /// Explicit required flag. When unset, the input is required unless its
    /// type is optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl InputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }
}

/// A typed value an endpoint reads from a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    kind: InputKind,
    name: String,
    ty: Arc<TypeDescriptor>,
    required: bool,
    description: Option<String>,
    example: Option<Value>,
    format: Option<BodyFormat>,
}

impl Input {
    /// Creates a query, path or header input.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingName`] for an empty name.
    pub fn new(
        kind: InputKind,
        name: impl Into<String>,
        ty: impl Into<Arc<TypeDescriptor>>,
        options: InputOptions,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::MissingName { kind });
        }
        let ty = ty.into();
        let format = (kind == InputKind::Body).then_some(BodyFormat::Json);
        Ok(Self::assemble(kind, name, ty, options, format))
    }

    /// Creates the body input of an endpoint.
    pub fn body(format: BodyFormat, ty: impl Into<Arc<TypeDescriptor>>, options: InputOptions) -> Self {
        Self::assemble(
            InputKind::Body,
            BODY_NAME.to_string(),
            ty.into(),
            options,
            Some(format),
        )
    }

    fn assemble(
        kind: InputKind,
        name: String,
        ty: Arc<TypeDescriptor>,
        options: InputOptions,
        format: Option<BodyFormat>,
    ) -> Self {
        let required = options.required.unwrap_or(!ty.is_optional());
        Self {
            kind,
            name,
            ty,
            required,
            description: options.description,
            example: options.example,
            format,
        }
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn example(&self) -> Option<&Value> {
        self.example.as_ref()
    }

    /// Body format; `None` for non-body inputs.
    pub fn format(&self) -> Option<BodyFormat> {
        self.format
    }

    pub fn content_type(&self) -> Option<&'static str> {
        self.format.map(BodyFormat::content_type)
    }

    /// Validates a raw request value.
    ///
    /// `None` means the value was absent. Messages are prefixed with the
    /// input name (`limit: must be <= 100`).
    pub fn validate(&self, value: Option<&Value>) -> ValidationResult {
        let at = Breadcrumb::named(self.name.as_str());
        let mut errors = Vec::new();
        match value {
            None | Some(Value::Null) if self.required => at.report(&mut errors, "is required"),
            None | Some(Value::Null) => {}
            Some(value) => self.ty.validate_at(value, &at, &mut errors),
        }
        ValidationResult::from_errors(errors)
    }

    /// Coerces a raw request value; coercion errors are located under the
    /// input name.
    pub fn coerce(&self, value: &Value) -> Result<Value, schematic_define::CoercionError> {
        self.ty.coerce(value).map_err(|err| err.within(&self.name))
    }

    /// Coerces and then validates a raw value.
    ///
    /// Returns `Ok(None)` for an absent optional input. Request values
    /// usually arrive as text, so coercion runs before validation.
    pub fn check(&self, value: Option<&Value>) -> Result<Option<Value>, ValidationError> {
        let raw = match value {
            None | Some(Value::Null) if self.required => {
                return Err(ValidationError::Missing {
                    input: self.name.clone(),
                });
            }
            None | Some(Value::Null) => return Ok(None),
            Some(raw) => raw,
        };
        let coerced = self.coerce(raw)?;
        let result = self.validate(Some(&coerced));
        if result.is_valid() {
            Ok(Some(coerced))
        } else {
            Err(ValidationError::Invalid {
                input: self.name.clone(),
                errors: result.into_errors(),
            })
        }
    }

    /// The OpenAPI parameter object; `None` for the body input.
    pub fn to_openapi_parameter(&self) -> Option<Value> {
        let location = self.kind.parameter_location()?;
        let mut parameter = json!({
            "name": self.name,
            "in": location,
            // Path parameters are always required in OpenAPI.
            "required": self.required || self.kind == InputKind::Path,
            "schema": self.ty.to_json_schema(),
        });
        if let Some(description) = &self.description {
            parameter["description"] = json!(description);
        }
        if let Some(example) = &self.example {
            parameter["example"] = example.clone();
        }
        Some(parameter)
    }

    /// The OpenAPI request body object; `None` for non-body inputs.
    pub fn to_openapi_request_body(&self) -> Option<Value> {
        let content_type = self.content_type()?;
        let mut media = json!({ "schema": self.ty.to_json_schema() });
        if let Some(example) = &self.example {
            media["example"] = example.clone();
        }
        let mut body = json!({
            "required": self.required,
            "content": { content_type: media },
        });
        if let Some(description) = &self.description {
            body["description"] = json!(description);
        }
        Some(body)
    }
}
