use std::fmt;

use thiserror::Error;

use crate::method::RestMethod;

/// An OpenAPI `operationId`: a letter followed by letters, digits or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationIdError {
    #[error("operation id cannot be empty")]
    Empty,

    #[error("operation id must start with a letter, got '{0}'")]
    InvalidStartCharacter(char),

    #[error("operation id contains invalid character '{0}'")]
    InvalidCharacter(char),
}

impl OperationId {
    pub fn new(id: impl Into<String>) -> Result<Self, OperationIdError> {
        let id = id.into();
        let mut chars = id.chars();
        match chars.next() {
            None => return Err(OperationIdError::Empty),
            Some(first) if !first.is_alphabetic() => {
                return Err(OperationIdError::InvalidStartCharacter(first));
            }
            Some(_) => {}
        }
        if let Some(bad) = chars.find(|c| !c.is_alphanumeric() && *c != '_') {
            return Err(OperationIdError::InvalidCharacter(bad));
        }
        Ok(Self(id))
    }

    /// Derives an id from the route: `GET /users/:id` becomes `get_users_id`.
    pub fn derive(method: RestMethod, path: &str) -> Self {
        let segments = path.split('/').filter_map(|segment| {
            let cleaned: String = segment
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect();
            let cleaned = cleaned.trim_matches('_');
            (!cleaned.is_empty()).then(|| cleaned.to_string())
        });
        let id = std::iter::once(method.openapi_key().to_string())
            .chain(segments)
            .collect::<Vec<_>>()
            .join("_");
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<OperationId> for String {
    fn from(id: OperationId) -> Self {
        id.0
    }
}

impl TryFrom<String> for OperationId {
    type Error = OperationIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for OperationId {
    type Error = OperationIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
