//! Shared `components` collected while operations are rendered.

use serde_json::{Map, Value, json};

use crate::security::{AuthType, Security};

/// Collects security schemes and named schemas for the `components`
/// section.
///
/// Security schemes are keyed by a stable name derived from their auth type
/// (`bearerAuth`, `apiKeyAuth`, ...). A second, different scheme of the same
/// type gets a numeric suffix (`apiKeyAuth2`). Identical schemes share one
/// entry.
#[derive(Debug, Clone, Default)]
pub struct Components {
    security: Vec<(String, Security)>,
    schemas: Map<String, Value>,
}

fn base_name(auth_type: AuthType) -> &'static str {
    match auth_type {
        AuthType::Bearer => "bearerAuth",
        AuthType::Basic => "basicAuth",
        AuthType::ApiKey => "apiKeyAuth",
        AuthType::OAuth2 => "oauth2Auth",
    }
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a scheme and returns the name it is listed under.
    pub fn security_name(&mut self, security: &Security) -> String {
        if let Some((name, _)) = self.security.iter().find(|(_, known)| known == security) {
            return name.clone();
        }
        let auth_type = security.auth_type();
        let same_type = self
            .security
            .iter()
            .filter(|(_, known)| known.auth_type() == auth_type)
            .count();
        let name = match same_type {
            0 => base_name(auth_type).to_string(),
            n => format!("{}{}", base_name(auth_type), n + 1),
        };
        self.security.push((name.clone(), security.clone()));
        name
    }

    /// Hoists named schemas out of an operation object.
    ///
    /// Only schema positions are visited: parameter schemas and the media
    /// type schemas of the request body and responses. Examples are left
    /// alone even when they look like schemas.
    pub fn hoist_operation(&mut self, operation: &mut Value) {
        if let Some(Value::Array(parameters)) = operation.get_mut("parameters") {
            for parameter in parameters {
                if let Some(schema) = parameter.get_mut("schema") {
                    self.hoist_schema(schema);
                }
            }
        }
        if let Some(body) = operation.get_mut("requestBody") {
            self.hoist_content(body);
        }
        if let Some(Value::Object(responses)) = operation.get_mut("responses") {
            for response in responses.values_mut() {
                self.hoist_content(response);
            }
        }
    }

    fn hoist_content(&mut self, holder: &mut Value) {
        if let Some(Value::Object(content)) = holder.get_mut("content") {
            for media in content.values_mut() {
                if let Some(schema) = media.get_mut("schema") {
                    self.hoist_schema(schema);
                }
            }
        }
    }

    /// Replaces `schema`, and every named object schema nested in it, with
    /// a `$ref`, moving the schema itself into `components.schemas`.
    ///
    /// A named schema is an object schema carrying a `title`. Nested
    /// schemas are found under `properties`, `items`, `additionalProperties`
    /// and the `allOf`/`anyOf`/`oneOf` lists. Nullable references are
    /// wrapped in `allOf`, since OpenAPI 3.0 ignores siblings of `$ref`.
    /// When two different schemas share a title, the later one stays inline.
    pub fn hoist_schema(&mut self, schema: &mut Value) {
        let Value::Object(map) = schema else {
            return;
        };
        if let Some(Value::Object(properties)) = map.get_mut("properties") {
            properties.values_mut().for_each(|property| self.hoist_schema(property));
        }
        for key in ["items", "additionalProperties"] {
            if let Some(nested) = map.get_mut(key) {
                self.hoist_schema(nested);
            }
        }
        for key in ["allOf", "anyOf", "oneOf"] {
            if let Some(Value::Array(variants)) = map.get_mut(key) {
                variants.iter_mut().for_each(|variant| self.hoist_schema(variant));
            }
        }

        let Some(title) = schema_title(map) else {
            return;
        };
        let nullable = map.remove("nullable").is_some();
        let hoisted = Value::Object(map.clone());
        match self.schemas.get(&title) {
            Some(known) if *known != hoisted => {
                if nullable {
                    map.insert("nullable".to_string(), Value::Bool(true));
                }
                return;
            }
            Some(_) => {}
            None => {
                self.schemas.insert(title.clone(), hoisted);
            }
        }
        let reference = json!({ "$ref": format!("#/components/schemas/{title}") });
        *schema = if nullable {
            json!({ "nullable": true, "allOf": [reference] })
        } else {
            reference
        };
    }

    pub fn security_scheme_count(&self) -> usize {
        self.security.len()
    }

    pub fn is_empty(&self) -> bool {
        self.security.is_empty() && self.schemas.is_empty()
    }

    /// The `components` object; empty sections are omitted.
    pub fn to_value(&self) -> Value {
        let mut components = Map::new();
        if !self.schemas.is_empty() {
            components.insert("schemas".to_string(), Value::Object(self.schemas.clone()));
        }
        if !self.security.is_empty() {
            let schemes: Map<String, Value> = self
                .security
                .iter()
                .map(|(name, security)| (name.clone(), security.to_openapi_scheme()))
                .collect();
            components.insert("securitySchemes".to_string(), Value::Object(schemes));
        }
        Value::Object(components)
    }
}

fn schema_title(map: &Map<String, Value>) -> Option<String> {
    let is_object = map.get("type").and_then(Value::as_str) == Some("object");
    let title = map.get("title").and_then(Value::as_str)?;
    is_object.then(|| title.to_string())
}
