//! Security scheme descriptors.
//!
//! A [`Security`] describes how an endpoint authenticates callers. It renders
//! as an OpenAPI `securitySchemes` entry and can verify the credentials of an
//! incoming request (see [`Security::verify`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use strum::{Display, EnumIter, EnumString};

use crate::error::ConfigError;

/// Header read by API key schemes unless configured otherwise.
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

/// Token endpoint of OAuth2 schemes created from a bare auth type.
pub const DEFAULT_TOKEN_URL: &str = "/oauth/token";

/// Textual auth type names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuthType {
    Bearer,
    Basic,
    ApiKey,
    #[serde(rename = "oauth2")]
    #[strum(serialize = "oauth2")]
    OAuth2,
}

/// Where an API key is carried.
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
pub enum ApiKeyLocation {
    #[default]
    Header,
    Query,
}

/// OAuth2 grant flows, named as OpenAPI names them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum OAuth2FlowKind {
    AuthorizationCode,
    ClientCredentials,
    Implicit,
    Password,
}

/// One OAuth2 flow with its endpoints and available scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2Flow {
    pub kind: OAuth2FlowKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    /// Scope name to description.
    #[serde(default)]
    pub scopes: BTreeMap<String, String>,
}

impl OAuth2Flow {
    pub fn new(kind: OAuth2FlowKind) -> Self {
        Self {
            kind,
            authorization_url: None,
            token_url: None,
            refresh_url: None,
            scopes: BTreeMap::new(),
        }
    }

    /// A client credentials flow against `token_url`.
    pub fn client_credentials(token_url: impl Into<String>) -> Self {
        Self::new(OAuth2FlowKind::ClientCredentials).token_url(token_url)
    }

    /// An authorization code flow.
    pub fn authorization_code(
        authorization_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self::new(OAuth2FlowKind::AuthorizationCode)
            .authorization_url(authorization_url)
            .token_url(token_url)
    }

    pub fn authorization_url(mut self, url: impl Into<String>) -> Self {
        self.authorization_url = Some(url.into());
        self
    }

    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    pub fn refresh_url(mut self, url: impl Into<String>) -> Self {
        self.refresh_url = Some(url.into());
        self
    }

    pub fn scope(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.scopes.insert(name.into(), description.into());
        self
    }

    fn to_openapi(&self) -> Value {
        let mut flow = Map::new();
        if let Some(url) = &self.authorization_url {
            flow.insert("authorizationUrl".to_string(), json!(url));
        }
        if let Some(url) = &self.token_url {
            flow.insert("tokenUrl".to_string(), json!(url));
        }
        if let Some(url) = &self.refresh_url {
            flow.insert("refreshUrl".to_string(), json!(url));
        }
        flow.insert("scopes".to_string(), json!(self.scopes));
        Value::Object(flow)
    }
}

/// The mechanism of a security scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SecurityScheme {
    /// `Authorization: Bearer <token>`.
    Bearer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bearer_format: Option<String>,
    },
    /// `Authorization: Basic <base64(user:password)>`.
    Basic,
    /// A key in a named header or query parameter.
    ApiKey {
        name: String,
        #[serde(default)]
        location: ApiKeyLocation,
    },
    /// OAuth2; requests carry the access token as a bearer token.
    #[serde(rename = "oauth2")]
    OAuth2 { flows: Vec<OAuth2Flow> },
}

impl SecurityScheme {
    pub fn auth_type(&self) -> AuthType {
        match self {
            Self::Bearer { .. } => AuthType::Bearer,
            Self::Basic => AuthType::Basic,
            Self::ApiKey { .. } => AuthType::ApiKey,
            Self::OAuth2 { .. } => AuthType::OAuth2,
        }
    }
}

/// A security requirement attached to an endpoint.
///
/// ```
/// use schematic::{ApiKeyLocation, Security};
/// use serde_json::json;
///
/// let security = Security::api_key("X-Token", ApiKeyLocation::Header);
/// assert_eq!(
///     security.to_openapi_scheme(),
///     json!({ "type": "apiKey", "name": "X-Token", "in": "header" })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    #[serde(flatten)]
    pub scheme: SecurityScheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Security {
    pub fn new(scheme: SecurityScheme) -> Self {
        Self {
            scheme,
            description: None,
        }
    }

    pub fn bearer() -> Self {
        Self::new(SecurityScheme::Bearer {
            bearer_format: None,
        })
    }

    /// A bearer scheme documenting the token format (e.g. `JWT`).
    pub fn bearer_with_format(format: impl Into<String>) -> Self {
        Self::new(SecurityScheme::Bearer {
            bearer_format: Some(format.into()),
        })
    }

    pub fn basic() -> Self {
        Self::new(SecurityScheme::Basic)
    }

    pub fn api_key(name: impl Into<String>, location: ApiKeyLocation) -> Self {
        Self::new(SecurityScheme::ApiKey {
            name: name.into(),
            location,
        })
    }

    pub fn oauth2(flows: impl IntoIterator<Item = OAuth2Flow>) -> Self {
        Self::new(SecurityScheme::OAuth2 {
            flows: flows.into_iter().collect(),
        })
    }

    /// Builds a scheme with default settings from its textual auth type.
    ///
    /// API keys default to the `X-API-Key` header; OAuth2 defaults to a
    /// client credentials flow against `/oauth/token`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::UnsupportedAuthType`] for an unknown name.
    pub fn from_auth_type(auth_type: &str) -> Result<Self, ConfigError> {
        let auth_type: AuthType = auth_type
            .parse()
            .map_err(|_| ConfigError::unsupported_auth_type(auth_type))?;
        Ok(match auth_type {
            AuthType::Bearer => Self::bearer(),
            AuthType::Basic => Self::basic(),
            AuthType::ApiKey => Self::api_key(DEFAULT_API_KEY_HEADER, ApiKeyLocation::Header),
            AuthType::OAuth2 => Self::oauth2([OAuth2Flow::client_credentials(DEFAULT_TOKEN_URL)]),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn auth_type(&self) -> AuthType {
        self.scheme.auth_type()
    }

    /// The OpenAPI security scheme object.
    pub fn to_openapi_scheme(&self) -> Value {
        let mut scheme = match &self.scheme {
            SecurityScheme::Bearer { bearer_format } => {
                let mut scheme = json!({ "type": "http", "scheme": "bearer" });
                if let Some(format) = bearer_format {
                    scheme["bearerFormat"] = json!(format);
                }
                scheme
            }
            SecurityScheme::Basic => json!({ "type": "http", "scheme": "basic" }),
            SecurityScheme::ApiKey { name, location } => json!({
                "type": "apiKey",
                "name": name,
                "in": location.to_string(),
            }),
            SecurityScheme::OAuth2 { flows } => {
                let flows: Map<String, Value> = flows
                    .iter()
                    .map(|flow| (flow.kind.to_string(), flow.to_openapi()))
                    .collect();
                json!({ "type": "oauth2", "flows": flows })
            }
        };
        if let Some(description) = &self.description {
            scheme["description"] = json!(description);
        }
        scheme
    }
}
