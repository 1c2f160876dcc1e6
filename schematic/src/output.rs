//! Declared responses: success outputs and error responses.

use std::sync::Arc;

use schematic_define::{Descriptor, TypeDescriptor, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::status::StatusCode;

/// Content type of typed responses unless overridden.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Optional settings for a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Defaults to the status reason phrase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Defaults to `application/json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl OutputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }
}

/// A response an endpoint may produce, keyed by status code.
///
/// A response without a type is status-only and renders without content.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    status: StatusCode,
    ty: Option<Arc<TypeDescriptor>>,
    content_type: String,
    description: String,
    example: Option<Value>,
}

/// Error responses share the shape of success outputs.
pub type ErrorResponse = Output;

impl Output {
    /// A response carrying a typed body.
    pub fn typed(
        status: StatusCode,
        ty: impl Into<Arc<TypeDescriptor>>,
        options: OutputOptions,
    ) -> Self {
        Self::assemble(status, Some(ty.into()), options)
    }

    /// A bodyless response.
    pub fn status_only(status: StatusCode, options: OutputOptions) -> Self {
        Self::assemble(status, None, options)
    }

    fn assemble(status: StatusCode, ty: Option<Arc<TypeDescriptor>>, options: OutputOptions) -> Self {
        Self {
            status,
            ty,
            content_type: options
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            description: options
                .description
                .unwrap_or_else(|| status.reason_phrase().to_string()),
            example: options.example,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn ty(&self) -> Option<&TypeDescriptor> {
        self.ty.as_deref()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn example(&self) -> Option<&Value> {
        self.example.as_ref()
    }

    pub fn has_body(&self) -> bool {
        self.ty.is_some()
    }

    /// Validates a response body. Status-only responses accept only null.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        match (&self.ty, value) {
            (Some(ty), value) => ty.validate(value),
            (None, Value::Null) => ValidationResult::valid(),
            (None, _) => ValidationResult::from_errors(vec![format!(
                "status {} declares no body",
                self.status
            )]),
        }
    }

    /// The OpenAPI response object.
    pub fn to_openapi_response(&self) -> Value {
        let mut response = json!({ "description": self.description });
        if let Some(ty) = &self.ty {
            let mut media = json!({ "schema": ty.to_json_schema() });
            if let Some(example) = &self.example {
                media["example"] = example.clone();
            }
            response["content"] = json!({ self.content_type.as_str(): media });
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schematic_define::HashType;

    fn user() -> TypeDescriptor {
        HashType::new([
            ("id", TypeDescriptor::integer()),
            ("name", TypeDescriptor::string()),
        ])
        .into()
    }

    #[test]
    fn test_description_defaults_to_reason_phrase() {
        let output = Output::status_only(StatusCode::NO_CONTENT, OutputOptions::new());
        assert_eq!(output.description(), "No Content");
        assert_eq!(
            output.to_openapi_response(),
            json!({ "description": "No Content" })
        );
    }

    #[test]
    fn test_typed_response_renders_content() {
        let output = Output::typed(StatusCode::OK, user(), OutputOptions::new());
        let response = output.to_openapi_response();
        assert_eq!(response["description"], json!("OK"));
        let schema = &response["content"]["application/json"]["schema"];
        assert_eq!(schema["properties"]["id"], json!({ "type": "integer" }));
        assert_eq!(schema["properties"]["name"], json!({ "type": "string" }));
    }

    #[test]
    fn test_custom_content_type_and_description() {
        let output = Output::typed(
            StatusCode::OK,
            TypeDescriptor::string(),
            OutputOptions::new()
                .content_type("text/csv")
                .description("Export"),
        );
        let response = output.to_openapi_response();
        assert_eq!(response["description"], json!("Export"));
        assert!(response["content"]["text/csv"].is_object());
    }

    #[test]
    fn test_validate_body() {
        let output = Output::typed(StatusCode::OK, user(), OutputOptions::new());
        assert!(output.validate(&json!({ "id": 1, "name": "a" })).is_valid());
        assert!(!output.validate(&json!({ "id": "x" })).is_valid());

        let empty = Output::status_only(StatusCode::NO_CONTENT, OutputOptions::new());
        assert!(empty.validate(&Value::Null).is_valid());
        assert_eq!(
            empty.validate(&json!({})).errors(),
            ["status 204 declares no body"]
        );
    }
}
