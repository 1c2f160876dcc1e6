//! OpenAPI 3.0 document generator.
//!
//! This module provides [`OpenApiGenerator`], which assembles endpoint
//! operations into one OpenAPI 3.0.3 document.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use super::components::Components;
use super::operation::render_operation;
use crate::endpoint::Endpoint;
use crate::error::ConfigError;
use crate::registry::Registry;

/// OpenAPI version emitted in the `openapi` field.
pub const OPENAPI_VERSION: &str = "3.0.3";

/// Serialization of a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// The document's `info` object. Only `title` and `version` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApiInfo {
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "terms_of_service", skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

impl OpenApiInfo {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
            terms_of_service: None,
            contact: None,
            license: None,
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    pub fn with_terms_of_service(self, url: impl Into<String>) -> Self {
        Self {
            terms_of_service: Some(url.into()),
            ..self
        }
    }

    pub fn with_contact(self, contact: Contact) -> Self {
        Self {
            contact: Some(contact),
            ..self
        }
    }

    pub fn with_license(self, license: License) -> Self {
        Self {
            license: Some(license),
            ..self
        }
    }
}

/// Who to reach about the API. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Person or team name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Support page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// License the API is offered under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    /// License name, such as `Apache-2.0`.
    pub name: String,
    /// Where the license text is published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A server object for the OpenAPI `servers` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// The URL to the target host; absolute, or a path relative to the
    /// document (`/v1`).
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    /// Creates a server without checking the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    /// Creates a server after checking that `url` is valid.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] for a URL that is neither
    /// absolute nor a path starting with `/`.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        if !url.starts_with('/') {
            url::Url::parse(url)?;
        }
        Ok(Self::new(url))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Document-level settings, loadable from YAML or JSON.
///
/// ```
/// use schematic::openapi::DocumentConfig;
///
/// let config = DocumentConfig::from_yaml(
///     "info:\n  title: Users\n  version: 1.0.0\nservers:\n  - url: https://api.example.com\n",
/// )
/// .unwrap();
/// assert_eq!(config.info.title, "Users");
/// assert_eq!(config.servers.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub info: OpenApiInfo,
    #[serde(default)]
    pub servers: Vec<Server>,
    /// Names of security schemes required by every operation.
    #[serde(default)]
    pub security: Vec<String>,
    /// Only endpoints under this path prefix are documented.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,
}

impl DocumentConfig {
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidDocument`] for malformed YAML and
    /// [`ConfigError::InvalidUrl`] for an invalid server URL.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source).map_err(ConfigError::invalid_document)?;
        config.check_servers()?;
        Ok(config)
    }

    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidDocument`] for malformed JSON and
    /// [`ConfigError::InvalidUrl`] for an invalid server URL.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source).map_err(ConfigError::invalid_document)?;
        config.check_servers()?;
        Ok(config)
    }

    fn check_servers(&self) -> Result<(), ConfigError> {
        self.servers
            .iter()
            .try_for_each(|server| Server::parse(&server.url).map(|_| ()))
    }
}

/// Generator for OpenAPI 3.0 documents.
///
/// ## Examples
///
/// ```rust
/// use schematic::openapi::{OpenApiGenerator, OpenApiInfo, OutputFormat, Server};
/// use schematic::{get, Registry, TypeDef};
///
/// let registry = Registry::new();
/// get("/users").ok(TypeDef::list("string")).unwrap().build(&registry).unwrap();
///
/// let document = OpenApiGenerator::new(OpenApiInfo::new("My API", "1.0.0"))
///     .add_server(Server::new("https://api.example.com"))
///     .add_registry(&registry, "/")
///     .generate(OutputFormat::Json)
///     .unwrap();
///
/// assert!(document.contains("\"/users\""));
/// ```
#[derive(Debug, Clone)]
pub struct OpenApiGenerator {
    info: OpenApiInfo,
    servers: Vec<Server>,
    endpoints: Vec<Arc<Endpoint>>,
    /// Global security requirements (applied to all operations).
    global_security: Vec<String>,
}

impl OpenApiGenerator {
    pub fn new(info: OpenApiInfo) -> Self {
        Self {
            info,
            servers: Vec::new(),
            endpoints: Vec::new(),
            global_security: Vec::new(),
        }
    }

    /// Creates a generator from document settings. The path prefix, if any,
    /// applies when a registry is added with [`Self::add_configured_registry`].
    pub fn from_config(config: &DocumentConfig) -> Self {
        Self::new(config.info.clone())
            .add_servers(config.servers.iter().cloned())
            .with_global_security(config.security.iter().cloned())
    }

    pub fn add_server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    pub fn add_servers(mut self, servers: impl IntoIterator<Item = Server>) -> Self {
        self.servers.extend(servers);
        self
    }

    pub fn add_endpoint(mut self, endpoint: impl Into<Arc<Endpoint>>) -> Self {
        self.endpoints.push(endpoint.into());
        self
    }

    pub fn add_endpoints(mut self, endpoints: impl IntoIterator<Item = Arc<Endpoint>>) -> Self {
        self.endpoints.extend(endpoints);
        self
    }

    /// Adds every registered endpoint whose path starts with `prefix`.
    pub fn add_registry(self, registry: &Registry, prefix: &str) -> Self {
        self.add_endpoints(registry.with_prefix(prefix))
    }

    /// Adds registered endpoints under the configured path prefix, or all
    /// of them when no prefix is configured.
    pub fn add_configured_registry(self, registry: &Registry, config: &DocumentConfig) -> Self {
        let prefix = config.path_prefix.as_deref().unwrap_or("");
        self.add_registry(registry, prefix)
    }

    /// Lists security scheme names required by default. Operations that
    /// declare their own security override this.
    pub fn with_global_security(
        mut self,
        scheme_names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.global_security = scheme_names.into_iter().map(Into::into).collect();
        self
    }

    /// Serializes the assembled document.
    ///
    /// ## Errors
    ///
    /// [`GenerateError`] when the serializer rejects the document.
    pub fn generate(&self, format: OutputFormat) -> Result<String, GenerateError> {
        let document = self.assemble();
        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&document).map_err(GenerateError::Json)
            }
            OutputFormat::Yaml => serde_yaml::to_string(&document).map_err(GenerateError::Yaml),
        }
    }

    pub fn generate_value(&self) -> Value {
        self.assemble()
    }

    fn assemble(&self) -> Value {
        let mut components = Components::new();
        let paths = self.paths(&mut components);
        let path_count = paths.len();

        let mut document = json!({
            "openapi": OPENAPI_VERSION,
            "info": self.info,
        });
        if !self.servers.is_empty() {
            document["servers"] = json!(self.servers);
        }
        document["paths"] = Value::Object(paths);
        if !components.is_empty() {
            document["components"] = components.to_value();
        }
        if !self.global_security.is_empty() {
            document["security"] = self
                .global_security
                .iter()
                .map(|name| json!({ name: [] }))
                .collect();
        }

        debug!(
            paths = path_count,
            security_schemes = components.security_scheme_count(),
            "openapi document assembled"
        );
        document
    }

    /// `paths[path][method]` for every endpoint, in insertion order.
    ///
    /// Operation ids are unique within the document: a repeated id gets a
    /// `_2`, `_3`, ... suffix (`/users/:id` and `/users/id` both derive
    /// `get_users_id`).
    fn paths(&self, components: &mut Components) -> Map<String, Value> {
        let mut paths = Map::new();
        let mut operation_ids = HashSet::new();
        for endpoint in &self.endpoints {
            let mut operation = render_operation(endpoint, components);
            let id = endpoint.operation_id();
            let mut unique = id.as_str().to_string();
            let mut suffix = 2;
            while !operation_ids.insert(unique.clone()) {
                unique = format!("{id}_{suffix}");
                suffix += 1;
            }
            if unique != id.as_str() {
                debug!(route = %endpoint, operation_id = %unique, "operation id suffixed");
                operation["operationId"] = Value::String(unique);
            }
            if let Value::Object(item) = paths
                .entry(endpoint.openapi_path())
                .or_insert_with(|| Value::Object(Map::new()))
            {
                item.insert(endpoint.method().openapi_key().to_string(), operation);
            }
        }
        paths
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("could not serialize OpenAPI document as JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("could not serialize OpenAPI document as YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{delete, get, post, put};
    use crate::security::ApiKeyLocation;
    use schematic_define::TypeDef;
    use tracing_test::traced_test;

    fn users(registry: &Registry) {
        get("/users").ok(TypeDef::list("string")).unwrap().build(registry).unwrap();
        post("/users").created("string").unwrap().build(registry).unwrap();
        get("/users/:id")
            .path_param("id", "integer")
            .unwrap()
            .build(registry)
            .unwrap();
        put("/users/:id")
            .path_param("id", "integer")
            .unwrap()
            .build(registry)
            .unwrap();
        delete("/users/:id")
            .path_param("id", "integer")
            .unwrap()
            .no_content()
            .build(registry)
            .unwrap();
    }

    #[test]
    fn test_empty_document() {
        let document = OpenApiGenerator::new(OpenApiInfo::new("Inventory", "0.4.0"))
            .add_server(Server::new("https://inventory.example.net").with_description("production"))
            .generate_value();

        assert_eq!(
            document,
            json!({
                "openapi": "3.0.3",
                "info": { "title": "Inventory", "version": "0.4.0" },
                "servers": [{
                    "url": "https://inventory.example.net",
                    "description": "production",
                }],
                "paths": {},
            })
        );
    }

    #[test]
    fn test_routes_share_path_items() {
        let registry = Registry::new();
        users(&registry);

        let document = OpenApiGenerator::new(OpenApiInfo::new("Accounts", "1.0.0"))
            .add_registry(&registry, "")
            .generate_value();

        let paths = document["paths"].as_object().unwrap();
        assert_eq!(paths.keys().collect::<Vec<_>>(), ["/users", "/users/{id}"]);
        let item = paths["/users/{id}"].as_object().unwrap();
        assert_eq!(item.keys().collect::<Vec<_>>(), ["get", "put", "delete"]);
        assert_eq!(item["delete"]["operationId"], "delete_users_id");
        assert_eq!(
            item["get"]["parameters"],
            json!([{
                "name": "id",
                "in": "path",
                "required": true,
                "schema": { "type": "integer" },
            }])
        );
    }

    #[test]
    fn test_registry_prefix_filters_paths() {
        let registry = Registry::new();
        users(&registry);
        get("/orders").build(&registry).unwrap();

        let document = OpenApiGenerator::new(OpenApiInfo::new("Orders", "1.0.0"))
            .add_registry(&registry, "/orders")
            .generate_value();
        let paths = document["paths"].as_object().unwrap();
        assert_eq!(paths.keys().collect::<Vec<_>>(), ["/orders"]);
    }

    #[test]
    fn test_security_schemes_are_collected_once() {
        let registry = Registry::new();
        get("/a").bearer_auth().build(&registry).unwrap();
        get("/b").bearer_auth().build(&registry).unwrap();
        get("/c")
            .api_key_auth("X-API-Key", ApiKeyLocation::Header)
            .api_key_auth("key", ApiKeyLocation::Query)
            .build(&registry)
            .unwrap();

        let document = OpenApiGenerator::new(OpenApiInfo::new("Keys", "1.0.0"))
            .add_registry(&registry, "/")
            .generate_value();

        let schemes = document["components"]["securitySchemes"].as_object().unwrap();
        assert_eq!(
            schemes.keys().collect::<Vec<_>>(),
            ["bearerAuth", "apiKeyAuth", "apiKeyAuth2"]
        );
        assert_eq!(schemes["apiKeyAuth2"]["in"], "query");
        assert_eq!(
            document["paths"]["/c"]["get"]["security"],
            json!([{ "apiKeyAuth": [] }, { "apiKeyAuth2": [] }])
        );
    }

    #[test]
    fn test_colliding_operation_ids_get_suffixes() {
        let registry = Registry::new();
        get("/users/:id")
            .path_param("id", "integer")
            .unwrap()
            .build(&registry)
            .unwrap();
        get("/users/id").build(&registry).unwrap();
        post("/users")
            .operation_id("get_users_id")
            .unwrap()
            .build(&registry)
            .unwrap();

        let document = OpenApiGenerator::new(OpenApiInfo::new("Accounts", "1.0.0"))
            .add_registry(&registry, "/users")
            .generate_value();

        let paths = &document["paths"];
        assert_eq!(paths["/users/{id}"]["get"]["operationId"], "get_users_id");
        assert_eq!(paths["/users/id"]["get"]["operationId"], "get_users_id_2");
        assert_eq!(paths["/users"]["post"]["operationId"], "get_users_id_3");
    }

    #[test]
    fn test_global_security_names() {
        let document = OpenApiGenerator::new(OpenApiInfo::new("Inventory", "0.4.0"))
            .with_global_security(["bearerAuth", "apiKeyAuth"])
            .generate_value();
        assert_eq!(document["security"], json!([{ "bearerAuth": [] }, { "apiKeyAuth": [] }]));
    }

    #[test]
    fn test_yaml_matches_json() {
        let registry = Registry::new();
        users(&registry);
        let generator = OpenApiGenerator::new(OpenApiInfo::new("Accounts", "1.0.0"))
            .add_registry(&registry, "/users");

        let yaml = generator.generate(OutputFormat::Yaml).unwrap();
        assert!(yaml.starts_with("openapi: 3.0.3"));
        let from_yaml: Value = serde_yaml::from_str(&yaml).unwrap();
        let json = generator.generate(OutputFormat::Json).unwrap();
        let from_json: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(from_yaml, from_json);
    }

    #[test]
    fn test_info_optional_fields() {
        let info = OpenApiInfo::new("Inventory", "0.4.0")
            .with_description("Stock levels per warehouse")
            .with_terms_of_service("https://inventory.example.net/terms")
            .with_contact(Contact {
                email: Some("ops@inventory.example.net".to_string()),
                ..Contact::default()
            })
            .with_license(License {
                name: "Apache-2.0".to_string(),
                url: None,
            });

        assert_eq!(
            json!(info),
            json!({
                "title": "Inventory",
                "version": "0.4.0",
                "description": "Stock levels per warehouse",
                "termsOfService": "https://inventory.example.net/terms",
                "contact": { "email": "ops@inventory.example.net" },
                "license": { "name": "Apache-2.0" },
            })
        );
    }

    #[test]
    fn test_server_parse() {
        assert!(Server::parse("https://api.example.com/v1").is_ok());
        assert!(Server::parse("/v1").is_ok());
        assert!(matches!(
            Server::parse("not a url"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_document_config_from_json() {
        let config = DocumentConfig::from_json(
            r#"{
                "info": { "title": "Shop", "version": "2.1.0", "termsOfService": "https://shop.example/tos" },
                "security": ["bearerAuth"],
                "path_prefix": "/orders"
            }"#,
        )
        .unwrap();
        assert_eq!(config.info.terms_of_service.as_deref(), Some("https://shop.example/tos"));
        assert_eq!(config.path_prefix.as_deref(), Some("/orders"));

        let registry = Registry::new();
        get("/orders").build(&registry).unwrap();
        get("/users").build(&registry).unwrap();
        let document = OpenApiGenerator::from_config(&config)
            .add_configured_registry(&registry, &config)
            .generate_value();
        assert_eq!(document["info"]["title"], "Shop");
        assert_eq!(document["security"], json!([{ "bearerAuth": [] }]));
        assert!(document["paths"]["/users"].is_null());
    }

    #[test]
    fn test_document_config_errors() {
        assert!(matches!(
            DocumentConfig::from_yaml("info: [not, a, map]"),
            Err(ConfigError::InvalidDocument { .. })
        ));
        assert!(matches!(
            DocumentConfig::from_yaml(
                "info:\n  title: T\n  version: '1'\nservers:\n  - url: 'ht tp://bad'\n"
            ),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[traced_test]
    #[test]
    fn test_assembly_is_logged() {
        let registry = Registry::new();
        users(&registry);
        OpenApiGenerator::new(OpenApiInfo::new("Accounts", "1.0.0"))
            .add_registry(&registry, "/")
            .generate_value();
        assert!(logs_contain("openapi document assembled"));
        assert!(logs_contain("paths=2"));
    }
}
