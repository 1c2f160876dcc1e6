//! Endpoint definitions for HTTP APIs.
//!
//! The `schematic` crate declares endpoints through a fluent builder and
//! turns them into immutable descriptors that server adapters and
//! documentation tools read.
//!
//! ## Features
//!
//! - **Copy-on-write builder**: every chained call returns a new builder
//! - **Typed inputs and outputs**: backed by `schematic-define` type descriptors,
//!   with validation and coercion of raw request values
//! - **Fail-fast definitions**: unknown types and bad status codes are rejected
//!   where they are written; inconsistent endpoints are rejected by `build()`
//! - **Security schemes**: bearer, basic, API key and OAuth2, with credential
//!   extraction for adapters
//! - **OpenAPI generation**: OpenAPI 3.0.3 documents in JSON or YAML
//!
//! ## Example
//!
//! ```rust
//! use schematic::{get, HashType, InputKind, Registry, TypeDescriptor};
//!
//! let registry = Registry::new();
//! let user = HashType::new([
//!     ("id", TypeDescriptor::integer()),
//!     ("name", TypeDescriptor::string()),
//! ]);
//!
//! let endpoint = get("/users/:id")
//!     .path_param("id", "integer")?
//!     .ok(user)?
//!     .not_found("string")?
//!     .bearer_auth()
//!     .build(&registry)?;
//!
//! let id = endpoint.input(InputKind::Path, "id").unwrap();
//! assert!(id.is_required());
//! assert_eq!(registry.len(), 1);
//! # Ok::<(), schematic::ApiError>(())
//! ```

pub mod builder;
pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod input;
pub mod metadata;
pub mod method;
pub mod openapi;
pub mod operation_id;
pub mod output;
pub mod registry;
pub mod security;
pub mod status;

// Re-exports for convenience
pub use builder::{EndpointBuilder, delete, get, head, options, patch, post, put};
pub use credentials::{CredentialSource, Credentials};
pub use endpoint::Endpoint;
pub use error::{ApiError, AuthError, BuildError, ConfigError, ValidationError};
pub use input::{BodyFormat, Input, InputKind, InputOptions};
pub use metadata::{Metadata, ObservabilityConfig};
pub use method::RestMethod;
pub use operation_id::{OperationId, OperationIdError};
pub use output::{ErrorResponse, Output, OutputOptions};
pub use registry::Registry;
pub use security::{ApiKeyLocation, AuthType, OAuth2Flow, OAuth2FlowKind, Security, SecurityScheme};
pub use status::StatusCode;

pub use schematic_define::{
    ArrayType, CoercionError, DefinitionError, Descriptor, HashType, ObjectType, Schema,
    StringType, TypeDef, TypeDescriptor, ValidationResult,
};
