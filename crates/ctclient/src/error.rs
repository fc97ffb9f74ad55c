//! Error types for API operations.
//!
//! Errors are categorized so callers can tell a missing object apart from
//! an authentication problem or an unreachable server, and present each
//! appropriately.

use std::fmt;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of API errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection, DNS, or TLS failure.
    Network,
    /// The object does not exist (HTTP 404).
    NotFound,
    /// Credentials were rejected (HTTP 401/403).
    Auth,
    /// The server failed to handle the request (HTTP 5xx).
    Server,
    /// The response body could not be decoded.
    Format,
    /// The client was misconfigured (e.g. bad URL).
    Config,
    /// Other/unknown errors.
    Other,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Network connectivity issue",
            Self::NotFound => "Object not found",
            Self::Auth => "Authentication failed",
            Self::Server => "Server error",
            Self::Format => "Unexpected response format",
            Self::Config => "Invalid client configuration",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check the URL and your network connection, then try again",
            Self::NotFound => "The object may have been deleted outside of this tool",
            Self::Auth => "Verify the API key and that it has not expired",
            Self::Server => "Check the server logs for details",
            Self::Format => "The server version may not be supported",
            Self::Config => "Check the url and apikey settings",
            Self::Other => "Check the error details for more information",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur while talking to the API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The base URL could not be used.
    #[error("the URL is not valid: {url}: {reason}")]
    InvalidUrl {
        /// URL as configured.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The server answered with a status other than 200 or 201.
    #[error("url: {url}, method: {method}, status: {status}, body: {body}")]
    Http {
        /// HTTP method.
        method: String,
        /// Full request URL.
        url: String,
        /// Response status.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The request never produced a response.
    #[error("{method} {url} failed: {message}")]
    Transport {
        /// HTTP method.
        method: String,
        /// Full request URL.
        url: String,
        /// Underlying failure.
        message: String,
    },

    /// A create call succeeded but returned no record id.
    #[error("received item ID of 0 from POST {path}")]
    ZeroRecordId {
        /// API path that was posted to.
        path: String,
    },

    /// Response body could not be decoded.
    #[error("could not unmarshal response body: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Create an HTTP status error.
    pub fn http(
        method: impl Into<String>,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        Self::Http {
            method: method.into(),
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(
        method: impl Into<String>,
        url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Transport {
            method: method.into(),
            url: url.into(),
            message: message.into(),
        }
    }

    /// HTTP status, when the server responded.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidUrl { .. } => ErrorCategory::Config,
            Error::Http { status, .. } => match status {
                404 => ErrorCategory::NotFound,
                401 | 403 => ErrorCategory::Auth,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Other,
            },
            Error::Transport { .. } => ErrorCategory::Network,
            Error::ZeroRecordId { .. } => ErrorCategory::Server,
            Error::InvalidResponse(_) => ErrorCategory::Format,
        }
    }

    /// Whether the server reported the object as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_description() {
        assert!(!ErrorCategory::Network.description().is_empty());
        assert!(!ErrorCategory::NotFound.description().is_empty());
        assert!(!ErrorCategory::Auth.description().is_empty());
    }

    #[test]
    fn test_error_category_advice() {
        assert!(!ErrorCategory::Network.advice().is_empty());
        assert!(!ErrorCategory::Config.advice().is_empty());
    }

    #[test]
    fn test_error_category_display() {
        let display = format!("{}", ErrorCategory::Auth);
        assert!(display.contains("Authentication"));
    }

    #[test]
    fn test_http_status_categories() {
        assert_eq!(
            Error::http("GET", "u", 404, "").category(),
            ErrorCategory::NotFound
        );
        assert_eq!(Error::http("GET", "u", 401, "").category(), ErrorCategory::Auth);
        assert_eq!(Error::http("GET", "u", 403, "").category(), ErrorCategory::Auth);
        assert_eq!(
            Error::http("GET", "u", 502, "").category(),
            ErrorCategory::Server
        );
        assert_eq!(Error::http("GET", "u", 400, "").category(), ErrorCategory::Other);
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::http("GET", "u", 404, "").is_not_found());
        assert!(!Error::http("GET", "u", 500, "").is_not_found());
        assert!(!Error::transport("GET", "u", "refused").is_not_found());
    }

    #[test]
    fn test_http_display_carries_context() {
        let err = Error::http(
            "PATCH",
            "https://ct.example.com/api/v3/ou/4",
            422,
            "{\"message\":\"bad\"}",
        );
        let display = err.to_string();
        assert!(display.contains("PATCH"));
        assert!(display.contains("/api/v3/ou/4"));
        assert!(display.contains("422"));
        assert!(display.contains("bad"));
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_other_categories() {
        let err = Error::InvalidUrl {
            url: "nope".to_string(),
            reason: "missing scheme".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Config);
        assert_eq!(
            Error::transport("GET", "u", "timeout").category(),
            ErrorCategory::Network
        );
        assert_eq!(
            Error::InvalidResponse("eof".to_string()).category(),
            ErrorCategory::Format
        );
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }
}
