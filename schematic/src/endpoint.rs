//! The immutable endpoint descriptor.
//!
//! An [`Endpoint`] is produced by
//! [`EndpointBuilder::endpoint`](crate::EndpointBuilder::endpoint) or
//! [`EndpointBuilder::build`](crate::EndpointBuilder::build) and never changes
//! afterwards. Adapters and the OpenAPI generator only read it.

use std::collections::HashSet;
use std::fmt;

use crate::error::BuildError;
use crate::input::{Input, InputKind};
use crate::metadata::Metadata;
use crate::method::RestMethod;
use crate::operation_id::OperationId;
use crate::output::{ErrorResponse, Output};
use crate::security::Security;

/// One HTTP operation: method, path, inputs, responses, security and
/// metadata.
///
/// ## Examples
///
/// ```rust
/// use schematic::{get, InputKind};
///
/// let endpoint = get("/users/:id")
///     .path_param("id", "integer")?
///     .ok("string")?
///     .endpoint()?;
///
/// assert_eq!(endpoint.path_params(), ["id"]);
/// assert_eq!(endpoint.openapi_path(), "/users/{id}");
/// assert_eq!(endpoint.inputs_of(InputKind::Path).count(), 1);
/// # Ok::<(), schematic::ApiError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    method: RestMethod,
    path: String,
    inputs: Vec<Input>,
    outputs: Vec<Output>,
    errors: Vec<ErrorResponse>,
    security: Vec<Security>,
    metadata: Metadata,
}

impl Endpoint {
    pub(crate) fn new(
        method: RestMethod,
        path: String,
        inputs: Vec<Input>,
        outputs: Vec<Output>,
        errors: Vec<ErrorResponse>,
        security: Vec<Security>,
        metadata: Metadata,
    ) -> Self {
        Self {
            method,
            path,
            inputs,
            outputs,
            errors,
            security,
            metadata,
        }
    }

    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// The path as declared, with `:name` or `{name}` placeholders.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn errors(&self) -> &[ErrorResponse] {
        &self.errors
    }

    pub fn security(&self) -> &[Security] {
        &self.security
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Inputs of one kind, in declaration order.
    pub fn inputs_of(&self, kind: InputKind) -> impl Iterator<Item = &Input> {
        self.inputs.iter().filter(move |input| input.kind() == kind)
    }

    pub fn input(&self, kind: InputKind, name: &str) -> Option<&Input> {
        self.inputs_of(kind).find(|input| input.name() == name)
    }

    /// The body input, if any.
    pub fn body(&self) -> Option<&Input> {
        self.inputs_of(InputKind::Body).next()
    }

    /// `METHOD /path`, used in messages and logs.
    pub fn route(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Placeholder names in the path, in order.
    pub fn path_params(&self) -> Vec<&str> {
        path_params(&self.path)
    }

    /// The path with `:name` placeholders rewritten as `{name}`.
    pub fn openapi_path(&self) -> String {
        self.path
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) if !name.is_empty() => format!("{{{name}}}"),
                _ => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// The declared operation id, or one derived from method and path.
    pub fn operation_id(&self) -> OperationId {
        self.metadata
            .operation_id
            .clone()
            .unwrap_or_else(|| OperationId::derive(self.method, &self.path))
    }

    /// Checks the endpoint for structural consistency.
    ///
    /// ## Errors
    ///
    /// - [`BuildError::InvalidPath`] for an empty path, one not starting with
    ///   `/`, or one repeating a placeholder
    /// - [`BuildError::MultipleBodies`] for more than one body input
    /// - [`BuildError::DuplicateInput`] for two inputs of one kind sharing a name
    /// - [`BuildError::MissingPathInput`] / [`BuildError::UnknownPathInput`]
    ///   when placeholders and path inputs disagree
    pub fn validate(&self) -> Result<(), BuildError> {
        self.validate_path()?;

        let bodies = self.inputs_of(InputKind::Body).count();
        if bodies > 1 {
            return Err(BuildError::MultipleBodies {
                route: self.route(),
                count: bodies,
            });
        }

        let mut seen = HashSet::new();
        for input in &self.inputs {
            if !seen.insert((input.kind(), input.name())) {
                return Err(BuildError::DuplicateInput {
                    route: self.route(),
                    kind: input.kind(),
                    name: input.name().to_string(),
                });
            }
        }

        let mut statuses = HashSet::new();
        if let Some(output) = self
            .outputs
            .iter()
            .chain(&self.errors)
            .find(|output| !statuses.insert(output.status().as_u16()))
        {
            return Err(BuildError::DuplicateStatus {
                route: self.route(),
                status: output.status().as_u16(),
            });
        }

        let placeholders = self.path_params();
        if let Some(name) = placeholders
            .iter()
            .find(|name| self.input(InputKind::Path, name).is_none())
        {
            return Err(BuildError::MissingPathInput {
                route: self.route(),
                name: name.to_string(),
            });
        }
        if let Some(input) = self
            .inputs_of(InputKind::Path)
            .find(|input| !placeholders.contains(&input.name()))
        {
            return Err(BuildError::UnknownPathInput {
                route: self.route(),
                name: input.name().to_string(),
            });
        }
        Ok(())
    }

    fn validate_path(&self) -> Result<(), BuildError> {
        let invalid = |reason| BuildError::InvalidPath {
            path: self.path.clone(),
            reason,
        };
        if self.path.is_empty() {
            return Err(invalid("path is empty"));
        }
        if !self.path.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }
        let placeholders = self.path_params();
        let unique: HashSet<_> = placeholders.iter().collect();
        if unique.len() != placeholders.len() {
            return Err(invalid("placeholder repeated"));
        }
        Ok(())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Extracts `:name` segments and `{name}` tokens from a path template.
fn path_params(path: &str) -> Vec<&str> {
    let mut names = Vec::new();
    for segment in path.split('/') {
        if let Some(name) = segment.strip_prefix(':') {
            if !name.is_empty() {
                names.push(name);
            }
            continue;
        }
        let mut rest = segment;
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                break;
            };
            if end > 0 {
                names.push(&after[..end]);
            }
            rest = &after[end + 1..];
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{BodyFormat, InputOptions};
    use schematic_define::TypeDescriptor;

    fn endpoint(method: RestMethod, path: &str, inputs: Vec<Input>) -> Endpoint {
        Endpoint::new(
            method,
            path.to_string(),
            inputs,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Metadata::default(),
        )
    }

    fn path_input(name: &str) -> Input {
        Input::new(InputKind::Path, name, TypeDescriptor::integer(), InputOptions::new()).unwrap()
    }

    fn body() -> Input {
        Input::body(BodyFormat::Json, TypeDescriptor::string(), InputOptions::new())
    }

    #[test]
    fn test_path_params_accepts_both_styles() {
        assert_eq!(path_params("/users/:id/posts/{post_id}"), ["id", "post_id"]);
        assert_eq!(path_params("/files/{name}.{ext}"), ["name", "ext"]);
        assert!(path_params("/health").is_empty());
    }

    #[test]
    fn test_openapi_path_rewrites_colon_segments() {
        let e = endpoint(
            RestMethod::Get,
            "/orgs/:org/repos/{repo}",
            vec![path_input("org"), path_input("repo")],
        );
        assert_eq!(e.openapi_path(), "/orgs/{org}/repos/{repo}");
    }

    #[test]
    fn test_operation_id_is_derived_when_absent() {
        let e = endpoint(RestMethod::Get, "/users/:id", vec![path_input("id")]);
        assert_eq!(e.operation_id().as_str(), "get_users_id");
    }

    #[test]
    fn test_one_body_is_allowed() {
        let e = endpoint(RestMethod::Post, "/users", vec![body()]);
        assert!(e.validate().is_ok());
        assert!(e.body().is_some());
    }

    #[test]
    fn test_two_bodies_are_rejected() {
        let e = endpoint(RestMethod::Post, "/users", vec![body(), body()]);
        assert_eq!(
            e.validate(),
            Err(BuildError::MultipleBodies {
                route: "POST /users".to_string(),
                count: 2
            })
        );
    }

    #[test]
    fn test_duplicate_names_within_kind() {
        let q = |name: &str| {
            Input::new(InputKind::Query, name, TypeDescriptor::string(), InputOptions::new())
                .unwrap()
        };
        let e = endpoint(RestMethod::Get, "/search", vec![q("q"), q("q")]);
        assert!(matches!(
            e.validate(),
            Err(BuildError::DuplicateInput { kind: InputKind::Query, .. })
        ));

        // Same name in different kinds is fine.
        let header =
            Input::new(InputKind::Header, "q", TypeDescriptor::string(), InputOptions::new())
                .unwrap();
        let e = endpoint(RestMethod::Get, "/search", vec![q("q"), header]);
        assert!(e.validate().is_ok());
    }

    #[test]
    fn test_placeholder_without_input() {
        let e = endpoint(RestMethod::Get, "/users/:id", Vec::new());
        assert_eq!(
            e.validate(),
            Err(BuildError::MissingPathInput {
                route: "GET /users/:id".to_string(),
                name: "id".to_string()
            })
        );
    }

    #[test]
    fn test_path_input_without_placeholder() {
        let e = endpoint(RestMethod::Get, "/users", vec![path_input("id")]);
        assert!(matches!(
            e.validate(),
            Err(BuildError::UnknownPathInput { .. })
        ));
    }

    #[test]
    fn test_malformed_paths() {
        for path in ["", "users", "/a/:id/b/:id"] {
            let e = endpoint(RestMethod::Get, path, Vec::new());
            assert!(
                matches!(e.validate(), Err(BuildError::InvalidPath { .. })),
                "{path:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_repeated_status_is_rejected() {
        use crate::builder::get;

        let typed_then_bare = get("/users")
            .ok("string")
            .unwrap()
            .status_response(200)
            .unwrap()
            .endpoint();
        assert_eq!(
            typed_then_bare.unwrap_err(),
            BuildError::DuplicateStatus {
                route: "GET /users".to_string(),
                status: 200,
            }
        );

        let across_lists = get("/users").ok("string").unwrap().error_status(200).unwrap();
        assert!(matches!(
            across_lists.endpoint(),
            Err(BuildError::DuplicateStatus { status: 200, .. })
        ));

        let distinct = get("/users").ok("string").unwrap().not_found("string").unwrap();
        assert!(distinct.endpoint().is_ok());
    }
}
