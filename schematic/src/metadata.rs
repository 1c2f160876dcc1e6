//! Descriptive endpoint metadata.

use serde::{Deserialize, Serialize};

use crate::operation_id::OperationId;

/// Observability settings carried for downstream tracing and metrics
/// middleware. Nothing in this crate acts on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub tracing: bool,
    pub metrics: bool,
    pub log_requests: bool,
    /// Span name override; middleware derives one from the route when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_name: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            tracing: true,
            metrics: true,
            log_requests: false,
            span_name: None,
        }
    }
}

impl ObservabilityConfig {
    pub fn span_name(mut self, name: impl Into<String>) -> Self {
        self.span_name = Some(name.into());
        self
    }

    pub fn log_requests(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }
}

/// Documentation and policy attached to an endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Tags in declaration order, without duplicates.
    pub tags: Vec<String>,
    pub deprecated: bool,
    /// Scopes a caller must hold. Enforcement belongs to adapters.
    pub scopes: Vec<String>,
    pub operation_id: Option<OperationId>,
    pub observability: Option<ObservabilityConfig>,
}

impl Metadata {
    pub(crate) fn add_tag(&mut self, tag: String) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub(crate) fn add_scope(&mut self, scope: String) {
        if !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tags_and_scopes_are_deduplicated() {
        let mut metadata = Metadata::default();
        metadata.add_tag("users".to_string());
        metadata.add_tag("users".to_string());
        metadata.add_scope("read".to_string());
        metadata.add_scope("write".to_string());
        metadata.add_scope("read".to_string());
        assert_eq!(metadata.tags, ["users"]);
        assert_eq!(metadata.scopes, ["read", "write"]);
    }

    #[test]
    fn test_observability_defaults_fill_missing_keys() {
        let config: ObservabilityConfig =
            serde_json::from_value(json!({ "log_requests": true })).unwrap();
        assert!(config.tracing);
        assert!(config.metrics);
        assert!(config.log_requests);
        assert_eq!(config.span_name, None);
    }
}
