//! Endpoint to OpenAPI operation rendering.

use serde_json::{Map, Value, json};

use super::components::Components;
use crate::endpoint::Endpoint;
use crate::security::AuthType;

/// Renders the operation object for `endpoint`, registering its security
/// schemes and named schemas in `components`.
pub fn render_operation(endpoint: &Endpoint, components: &mut Components) -> Value {
    let metadata = endpoint.metadata();
    let mut operation = json!({ "operationId": endpoint.operation_id().as_str() });

    if let Some(summary) = &metadata.summary {
        operation["summary"] = json!(summary);
    }
    if let Some(description) = &metadata.description {
        operation["description"] = json!(description);
    }
    if !metadata.tags.is_empty() {
        operation["tags"] = json!(metadata.tags);
    }
    if metadata.deprecated {
        operation["deprecated"] = Value::Bool(true);
    }

    let parameters: Vec<Value> = endpoint
        .inputs()
        .iter()
        .filter_map(|input| input.to_openapi_parameter())
        .collect();
    if !parameters.is_empty() {
        operation["parameters"] = Value::Array(parameters);
    }
    if let Some(body) = endpoint.body().and_then(|body| body.to_openapi_request_body()) {
        operation["requestBody"] = body;
    }

    let mut responses: Map<String, Value> = endpoint
        .outputs()
        .iter()
        .chain(endpoint.errors())
        .map(|output| (output.status().to_string(), output.to_openapi_response()))
        .collect();
    if responses.is_empty() {
        responses.insert(
            "200".to_string(),
            json!({ "description": "Successful response" }),
        );
    }
    operation["responses"] = Value::Object(responses);

    if !endpoint.security().is_empty() {
        let requirements: Vec<Value> = endpoint
            .security()
            .iter()
            .map(|security| {
                let name = components.security_name(security);
                // Only OAuth2 requirements may list scopes in OpenAPI 3.0.
                let scopes = match security.auth_type() {
                    AuthType::OAuth2 => metadata.scopes.clone(),
                    _ => Vec::new(),
                };
                json!({ name: scopes })
            })
            .collect();
        operation["security"] = Value::Array(requirements);
    }

    components.hoist_operation(&mut operation);
    operation
}

/// A self-contained `{paths, components}` fragment for one endpoint.
///
/// Document assemblers merge these; tools that handle a single endpoint can
/// use the fragment directly.
pub fn endpoint_fragment(endpoint: &Endpoint) -> Value {
    let mut components = Components::new();
    let operation = render_operation(endpoint, &mut components);
    let mut fragment = json!({
        "paths": {
            endpoint.openapi_path(): {
                endpoint.method().openapi_key(): operation,
            }
        }
    });
    if !components.is_empty() {
        fragment["components"] = components.to_value();
    }
    fragment
}

impl Endpoint {
    /// See [`endpoint_fragment`].
    pub fn to_openapi_fragment(&self) -> Value {
        endpoint_fragment(self)
    }
}
