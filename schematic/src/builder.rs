//! Fluent, copy-on-write endpoint builder.
//!
//! Every chained call returns a **new** builder; the receiver is left
//! untouched, so a partially configured builder can be shared as a template:
//!
//! ```rust
//! use schematic::{get, ApiError};
//!
//! let base = get("/reports").bearer_auth().tag("reports");
//! let csv = base.query("format", "string")?;
//!
//! assert_eq!(base.inputs().count(), 0);
//! assert_eq!(csv.inputs().count(), 1);
//! # Ok::<(), ApiError>(())
//! ```
//!
//! Type definitions are resolved at each call, so an unknown primitive name
//! fails right where it is written rather than at `build()` time.

use std::sync::Arc;

use im::Vector;
use schematic_define::{Schema, TypeDef, TypeDescriptor};
use tracing::debug;

use crate::endpoint::Endpoint;
use crate::error::{BuildError, ConfigError};
use crate::input::{BodyFormat, Input, InputKind, InputOptions};
use crate::metadata::{Metadata, ObservabilityConfig};
use crate::method::RestMethod;
use crate::operation_id::OperationId;
use crate::output::{Output, OutputOptions};
use crate::registry::Registry;
use crate::security::{ApiKeyLocation, OAuth2Flow, Security};
use crate::status::StatusCode;

/// Accumulates the definition of one endpoint.
#[derive(Debug, Clone)]
pub struct EndpointBuilder {
    method: RestMethod,
    path: String,
    inputs: Vector<Input>,
    outputs: Vector<Output>,
    errors: Vector<Output>,
    security: Vector<Security>,
    metadata: Metadata,
}

/// Starts a `GET` endpoint.
pub fn get(path: impl Into<String>) -> EndpointBuilder {
    EndpointBuilder::new(RestMethod::Get, path)
}

/// Starts a `POST` endpoint.
pub fn post(path: impl Into<String>) -> EndpointBuilder {
    EndpointBuilder::new(RestMethod::Post, path)
}

/// Starts a `PUT` endpoint.
pub fn put(path: impl Into<String>) -> EndpointBuilder {
    EndpointBuilder::new(RestMethod::Put, path)
}

/// Starts a `PATCH` endpoint.
pub fn patch(path: impl Into<String>) -> EndpointBuilder {
    EndpointBuilder::new(RestMethod::Patch, path)
}

/// Starts a `DELETE` endpoint.
pub fn delete(path: impl Into<String>) -> EndpointBuilder {
    EndpointBuilder::new(RestMethod::Delete, path)
}

/// Starts a `HEAD` endpoint.
pub fn head(path: impl Into<String>) -> EndpointBuilder {
    EndpointBuilder::new(RestMethod::Head, path)
}

/// Starts an `OPTIONS` endpoint.
pub fn options(path: impl Into<String>) -> EndpointBuilder {
    EndpointBuilder::new(RestMethod::Options, path)
}

fn resolve(definition: impl Into<TypeDef>) -> Result<Arc<TypeDescriptor>, ConfigError> {
    Ok(Arc::new(Schema::from_definition(definition)?))
}

impl EndpointBuilder {
    pub fn new(method: RestMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            inputs: Vector::new(),
            outputs: Vector::new(),
            errors: Vector::new(),
            security: Vector::new(),
            metadata: Metadata::default(),
        }
    }

    pub fn method(&self) -> RestMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Input> {
        self.inputs.iter()
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Output> {
        self.outputs.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Output> {
        self.errors.iter()
    }

    pub fn security(&self) -> impl Iterator<Item = &Security> {
        self.security.iter()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn with_input(&self, input: Input) -> Self {
        let mut next = self.clone();
        next.inputs.push_back(input);
        next
    }

    fn with_output(&self, output: Output) -> Self {
        let mut next = self.clone();
        next.outputs.push_back(output);
        next
    }

    fn with_error(&self, error: Output) -> Self {
        let mut next = self.clone();
        next.errors.push_back(error);
        next
    }

    fn with_metadata(&self, change: impl FnOnce(&mut Metadata)) -> Self {
        let mut next = self.clone();
        change(&mut next.metadata);
        next
    }

    fn input(
        &self,
        kind: InputKind,
        name: impl Into<String>,
        ty: impl Into<TypeDef>,
        options: InputOptions,
    ) -> Result<Self, ConfigError> {
        let input = Input::new(kind, name, resolve(ty)?, options)?;
        Ok(self.with_input(input))
    }

    // ---- inputs ----

    /// Adds a query parameter. It is required unless `ty` resolves to an
    /// optional type (`"integer?"`).
    ///
    /// ## Errors
    ///
    /// [`ConfigError::Definition`] for a type that does not resolve and
    /// [`ConfigError::MissingName`] for a blank name.
    pub fn query(&self, name: impl Into<String>, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.query_with(name, ty, InputOptions::default())
    }

    /// [`Self::query`] with explicit options. `options.required` overrides
    /// the type's optionality.
    pub fn query_with(
        &self,
        name: impl Into<String>,
        ty: impl Into<TypeDef>,
        options: InputOptions,
    ) -> Result<Self, ConfigError> {
        self.input(InputKind::Query, name, ty, options)
    }

    /// Adds a path parameter. `build` checks that the path template has a
    /// matching `:name` or `{name}` placeholder.
    pub fn path_param(
        &self,
        name: impl Into<String>,
        ty: impl Into<TypeDef>,
    ) -> Result<Self, ConfigError> {
        self.path_param_with(name, ty, InputOptions::default())
    }

    /// [`Self::path_param`] with explicit options.
    pub fn path_param_with(
        &self,
        name: impl Into<String>,
        ty: impl Into<TypeDef>,
        options: InputOptions,
    ) -> Result<Self, ConfigError> {
        self.input(InputKind::Path, name, ty, options)
    }

    /// Adds a request header input.
    pub fn header(&self, name: impl Into<String>, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.header_with(name, ty, InputOptions::default())
    }

    /// [`Self::header`] with explicit options.
    pub fn header_with(
        &self,
        name: impl Into<String>,
        ty: impl Into<TypeDef>,
        options: InputOptions,
    ) -> Result<Self, ConfigError> {
        self.input(InputKind::Header, name, ty, options)
    }

    /// Adds an `application/json` body.
    pub fn json_body(&self, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.body_with(BodyFormat::Json, ty, InputOptions::default())
    }

    /// Adds an `application/x-www-form-urlencoded` body.
    pub fn form_body(&self, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.body_with(BodyFormat::Form, ty, InputOptions::default())
    }

    /// Adds a body with an explicit format. Every body input is named
    /// `body`; declaring two fails at `build`.
    pub fn body(&self, format: BodyFormat, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.body_with(format, ty, InputOptions::default())
    }

    /// [`Self::body`] with explicit options (description, example,
    /// required flag).
    pub fn body_with(
        &self,
        format: BodyFormat,
        ty: impl Into<TypeDef>,
        options: InputOptions,
    ) -> Result<Self, ConfigError> {
        Ok(self.with_input(Input::body(format, resolve(ty)?, options)))
    }

    // ---- responses ----

    /// A typed response under any status code.
    pub fn json_response(&self, code: u16, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.json_response_with(code, ty, OutputOptions::default())
    }

    /// [`Self::json_response`] with a description, content type or example.
    pub fn json_response_with(
        &self,
        code: u16,
        ty: impl Into<TypeDef>,
        options: OutputOptions,
    ) -> Result<Self, ConfigError> {
        let output = Output::typed(StatusCode::new(code)?, resolve(ty)?, options);
        Ok(self.with_output(output))
    }

    /// A bodyless response under any status code.
    pub fn status_response(&self, code: u16) -> Result<Self, ConfigError> {
        self.status_response_with(code, OutputOptions::default())
    }

    /// [`Self::status_response`] with a description.
    pub fn status_response_with(&self, code: u16, options: OutputOptions) -> Result<Self, ConfigError> {
        Ok(self.with_output(Output::status_only(StatusCode::new(code)?, options)))
    }

    /// `200 OK` with a typed body. For a bodyless 200, use
    /// [`Self::status_response`].
    pub fn ok(&self, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.json_response(StatusCode::OK.as_u16(), ty)
    }

    /// `201 Created` with a typed body. For a bodyless 201, use
    /// [`Self::status_response`].
    pub fn created(&self, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.json_response(StatusCode::CREATED.as_u16(), ty)
    }

    /// `202 Accepted` with a typed body. For a bodyless 202, use
    /// [`Self::status_response`].
    pub fn accepted(&self, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.json_response(StatusCode::ACCEPTED.as_u16(), ty)
    }

    /// `204 No Content`.
    pub fn no_content(&self) -> Self {
        self.with_output(Output::status_only(StatusCode::NO_CONTENT, OutputOptions::default()))
    }

    // ---- errors ----

    /// A typed error response.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidStatusCode`] for a code outside `100..=599`.
    pub fn error_response(&self, code: u16, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.error_response_with(code, ty, OutputOptions::default())
    }

    /// [`Self::error_response`] with a description, content type or example.
    pub fn error_response_with(
        &self,
        code: u16,
        ty: impl Into<TypeDef>,
        options: OutputOptions,
    ) -> Result<Self, ConfigError> {
        let error = Output::typed(StatusCode::new(code)?, resolve(ty)?, options);
        Ok(self.with_error(error))
    }

    /// A bodyless error response.
    pub fn error_status(&self, code: u16) -> Result<Self, ConfigError> {
        let error = Output::status_only(StatusCode::new(code)?, OutputOptions::default());
        Ok(self.with_error(error))
    }

    /// `400 Bad Request` with a typed body.
    pub fn bad_request(&self, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.error_response(StatusCode::BAD_REQUEST.as_u16(), ty)
    }

    /// `401 Unauthorized` with a typed body.
    pub fn unauthorized(&self, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.error_response(StatusCode::UNAUTHORIZED.as_u16(), ty)
    }

    /// `403 Forbidden` with a typed body.
    pub fn forbidden(&self, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.error_response(StatusCode::FORBIDDEN.as_u16(), ty)
    }

    /// `404 Not Found` with a typed body.
    pub fn not_found(&self, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.error_response(StatusCode::NOT_FOUND.as_u16(), ty)
    }

    /// `409 Conflict` with a typed body.
    pub fn conflict(&self, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.error_response(StatusCode::CONFLICT.as_u16(), ty)
    }

    /// `422 Unprocessable Entity` with a typed body.
    pub fn unprocessable_entity(&self, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.error_response(StatusCode::UNPROCESSABLE_ENTITY.as_u16(), ty)
    }

    /// `429 Too Many Requests` with a typed body.
    pub fn too_many_requests(&self, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.error_response(StatusCode::TOO_MANY_REQUESTS.as_u16(), ty)
    }

    /// `500 Internal Server Error` with a typed body.
    pub fn internal_server_error(&self, ty: impl Into<TypeDef>) -> Result<Self, ConfigError> {
        self.error_response(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), ty)
    }

    // ---- security ----

    /// Adds a security scheme. Several schemes are alternatives: a request
    /// satisfying any one of them is authenticated.
    pub fn secured_by(&self, security: Security) -> Self {
        let mut next = self.clone();
        next.security.push_back(security);
        next
    }

    /// `Authorization: Bearer <token>`.
    pub fn bearer_auth(&self) -> Self {
        self.secured_by(Security::bearer())
    }

    /// `Authorization: Basic <base64 user:password>`.
    pub fn basic_auth(&self) -> Self {
        self.secured_by(Security::basic())
    }

    /// An API key read from the named header or query parameter.
    pub fn api_key_auth(&self, name: impl Into<String>, location: ApiKeyLocation) -> Self {
        self.secured_by(Security::api_key(name, location))
    }

    /// OAuth2 with a single flow; scopes come from [`Self::requires_scope`].
    pub fn oauth2_auth(&self, flow: OAuth2Flow) -> Self {
        self.secured_by(Security::oauth2([flow]))
    }

    /// Adds a scheme by its textual auth type (`bearer`, `basic`,
    /// `api_key`, `oauth2`) with default settings.
    pub fn auth(&self, auth_type: &str) -> Result<Self, ConfigError> {
        Ok(self.secured_by(Security::from_auth_type(auth_type)?))
    }

    // ---- metadata ----

    /// Records scopes a caller must hold; nothing is enforced here.
    pub fn requires_scope<S: Into<String>>(&self, scopes: impl IntoIterator<Item = S>) -> Self {
        self.with_metadata(|metadata| {
            for scope in scopes {
                metadata.add_scope(scope.into());
            }
        })
    }

    pub fn summary(&self, summary: impl Into<String>) -> Self {
        let summary = summary.into();
        self.with_metadata(|metadata| metadata.summary = Some(summary))
    }

    pub fn description(&self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.with_metadata(|metadata| metadata.description = Some(description))
    }

    pub fn tag(&self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.with_metadata(|metadata| metadata.add_tag(tag))
    }

    pub fn tags<S: Into<String>>(&self, tags: impl IntoIterator<Item = S>) -> Self {
        self.with_metadata(|metadata| {
            for tag in tags {
                metadata.add_tag(tag.into());
            }
        })
    }

    pub fn deprecated(&self) -> Self {
        self.with_metadata(|metadata| metadata.deprecated = true)
    }

    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidOperationId`] unless `id` starts with a
    /// letter and continues with alphanumerics or `_`.
    pub fn operation_id(&self, id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = OperationId::new(id)?;
        Ok(self.with_metadata(|metadata| metadata.operation_id = Some(id)))
    }

    pub fn observability(&self, config: ObservabilityConfig) -> Self {
        self.with_metadata(|metadata| metadata.observability = Some(config))
    }

    // ---- terminal ----

    /// Materializes the endpoint without registering it.
    ///
    /// ## Errors
    ///
    /// Returns a [`BuildError`] when the definition is inconsistent; see
    /// [`Endpoint::validate`].
    pub fn endpoint(&self) -> Result<Endpoint, BuildError> {
        let endpoint = Endpoint::new(
            self.method,
            self.path.clone(),
            self.inputs.iter().cloned().collect(),
            self.outputs.iter().cloned().collect(),
            self.errors.iter().cloned().collect(),
            self.security.iter().cloned().collect(),
            self.metadata.clone(),
        );
        endpoint.validate()?;
        debug!(route = %endpoint, inputs = endpoint.inputs().len(), "endpoint materialized");
        Ok(endpoint)
    }

    /// Materializes the endpoint and appends it to `registry`.
    pub fn build(&self, registry: &Registry) -> Result<Arc<Endpoint>, BuildError> {
        Ok(registry.register(self.endpoint()?))
    }
}
