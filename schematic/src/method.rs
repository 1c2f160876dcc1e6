//! HTTP method types for endpoint definitions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// HTTP methods an endpoint can be declared with.
///
/// ## Examples
///
/// ```rust
/// use schematic::RestMethod;
///
/// let method = RestMethod::Get;
/// assert!(!method.has_body());
/// assert!(method.is_idempotent());
/// assert_eq!(method.openapi_key(), "get");
///
/// let parsed: RestMethod = "POST".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Post);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    Get,
    /// Accepts a request body.
    Post,
    /// Accepts a request body; repeated calls converge.
    Put,
    /// Accepts a request body.
    Patch,
    Delete,
    /// Same route as `Get`, headers only.
    Head,
    Options,
}

impl RestMethod {
    /// Whether a body input is conventional for this method (POST, PUT, PATCH).
    /// Bodies are still accepted on the others.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Everything except POST and PATCH.
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Post | Self::Patch)
    }

    /// Read-only: GET, HEAD and OPTIONS.
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options)
    }

    /// The lowercase key used under an OpenAPI path item (`get`, `post`, ...).
    pub fn openapi_key(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Head => "head",
            Self::Options => "options",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!("OPTIONS".parse::<RestMethod>().unwrap(), RestMethod::Options);
        assert!("TRACE".parse::<RestMethod>().is_err());
        assert!("get".parse::<RestMethod>().is_err());
    }

    #[test]
    fn test_method_traits_table() {
        // (method, has_body, is_idempotent, is_safe)
        let table = [
            (RestMethod::Get, false, true, true),
            (RestMethod::Post, true, false, false),
            (RestMethod::Put, true, true, false),
            (RestMethod::Patch, true, false, false),
            (RestMethod::Delete, false, true, false),
            (RestMethod::Head, false, true, true),
            (RestMethod::Options, false, true, true),
        ];
        for (method, body, idempotent, safe) in table {
            assert_eq!(method.has_body(), body, "{method}");
            assert_eq!(method.is_idempotent(), idempotent, "{method}");
            assert_eq!(method.is_safe(), safe, "{method}");
        }
    }

    #[test]
    fn test_openapi_keys_match_display() {
        for method in RestMethod::iter() {
            assert_eq!(method.openapi_key(), method.to_string().to_lowercase());
        }
        assert_eq!(RestMethod::iter().count(), 7);
    }

    #[test]
    fn test_serde_roundtrip() {
        let serialized = serde_json::to_string(&RestMethod::Patch).unwrap();
        assert_eq!(serialized, "\"PATCH\"");
        let parsed: RestMethod = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, RestMethod::Patch);
    }
}
