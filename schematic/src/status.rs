//! HTTP status codes for declared responses.

use std::fmt;

use crate::error::ConfigError;

/// An HTTP status code in `100..=599`.
///
/// ```rust
/// use schematic::StatusCode;
///
/// let code = StatusCode::new(404).unwrap();
/// assert_eq!(code, StatusCode::NOT_FOUND);
/// assert_eq!(code.reason_phrase(), "Not Found");
/// assert!(StatusCode::new(600).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(u16);

impl StatusCode {
    pub const OK: Self = Self(200);
    pub const CREATED: Self = Self(201);
    pub const ACCEPTED: Self = Self(202);
    pub const NO_CONTENT: Self = Self(204);
    pub const BAD_REQUEST: Self = Self(400);
    pub const UNAUTHORIZED: Self = Self(401);
    pub const FORBIDDEN: Self = Self(403);
    pub const NOT_FOUND: Self = Self(404);
    pub const CONFLICT: Self = Self(409);
    pub const UNPROCESSABLE_ENTITY: Self = Self(422);
    pub const TOO_MANY_REQUESTS: Self = Self(429);
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);

    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidStatusCode`] outside `100..=599`.
    pub fn new(code: u16) -> Result<Self, ConfigError> {
        if (100..=599).contains(&code) {
            Ok(Self(code))
        } else {
            Err(ConfigError::InvalidStatusCode { code })
        }
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }

    pub fn is_success(self) -> bool {
        (200..300).contains(&self.0)
    }

    pub fn is_client_error(self) -> bool {
        (400..500).contains(&self.0)
    }

    pub fn is_server_error(self) -> bool {
        self.0 >= 500
    }

    /// Canonical reason phrase, or a class description for unlisted codes.
    pub fn reason_phrase(self) -> &'static str {
        match self.0 {
            100 => "Continue",
            101 => "Switching Protocols",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            203 => "Non-Authoritative Information",
            204 => "No Content",
            206 => "Partial Content",
            301 => "Moved Permanently",
            302 => "Found",
            303 => "See Other",
            304 => "Not Modified",
            307 => "Temporary Redirect",
            308 => "Permanent Redirect",
            400 => "Bad Request",
            401 => "Unauthorized",
            402 => "Payment Required",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            406 => "Not Acceptable",
            408 => "Request Timeout",
            409 => "Conflict",
            410 => "Gone",
            412 => "Precondition Failed",
            413 => "Payload Too Large",
            415 => "Unsupported Media Type",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            100..=199 => "Informational",
            200..=299 => "Success",
            300..=399 => "Redirection",
            400..=499 => "Client Error",
            _ => "Server Error",
        }
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = ConfigError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_inclusive() {
        assert!(StatusCode::new(100).is_ok());
        assert!(StatusCode::new(599).is_ok());
        assert!(matches!(
            StatusCode::new(99),
            Err(ConfigError::InvalidStatusCode { code: 99 })
        ));
        assert!(StatusCode::new(600).is_err());
        assert!(StatusCode::new(0).is_err());
    }

    #[test]
    fn classes() {
        assert!(StatusCode::CREATED.is_success());
        assert!(StatusCode::NOT_FOUND.is_client_error());
        assert!(StatusCode::INTERNAL_SERVER_ERROR.is_server_error());
        assert!(!StatusCode::OK.is_client_error());
    }

    #[test]
    fn reason_phrases() {
        assert_eq!(StatusCode::UNPROCESSABLE_ENTITY.reason_phrase(), "Unprocessable Entity");
        assert_eq!(StatusCode::new(299).unwrap().reason_phrase(), "Success");
        assert_eq!(StatusCode::new(599).unwrap().reason_phrase(), "Server Error");
    }

    #[test]
    fn displays_as_number() {
        assert_eq!(StatusCode::NO_CONTENT.to_string(), "204");
    }
}
