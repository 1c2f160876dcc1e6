//! OpenAPI document generation.
//!
//! Endpoints render as OpenAPI 3.0.3 operations. [`OpenApiGenerator`]
//! assembles them into a full document; [`endpoint_fragment`] renders a
//! single endpoint with the components it needs.
//!
//! ## Examples
//!
//! ```rust
//! use schematic::openapi::{OpenApiGenerator, OpenApiInfo, OutputFormat, Server};
//! use schematic::{get, Registry};
//!
//! let registry = Registry::new();
//! get("/users/:id")
//!     .path_param("id", "integer")?
//!     .ok("string")?
//!     .summary("Get user by ID")
//!     .bearer_auth()
//!     .build(&registry)?;
//!
//! let document = OpenApiGenerator::new(OpenApiInfo::new("My API", "1.0.0"))
//!     .add_server(Server::parse("https://api.example.com")?)
//!     .add_registry(&registry, "/users")
//!     .generate_value();
//!
//! assert_eq!(document["paths"]["/users/{id}"]["get"]["summary"], "Get user by ID");
//! assert!(document["components"]["securitySchemes"]["bearerAuth"].is_object());
//! # Ok::<(), schematic::ApiError>(())
//! ```

mod components;
mod generator;
mod operation;

pub use components::Components;
pub use generator::{
    Contact, DocumentConfig, GenerateError, License, OPENAPI_VERSION, OpenApiGenerator,
    OpenApiInfo, OutputFormat, Server,
};
pub use operation::{endpoint_fragment, render_operation};
