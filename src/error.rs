//! Error types for the TROCCO client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the TROCCO client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Caller Input Errors
    // ============================================================================
    #[error("Invalid request: {message}")]
    Validation { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    /// The network call itself failed; surfaced exactly as reqwest reported it.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("TROCCO API request failed: {detail}\nURL: {url}\nMethod: {method}\nStatus: {status}")]
    RequestFailed {
        detail: String,
        url: String,
        method: String,
        status: u16,
    },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Pagination cursor '{cursor}' was returned twice; refusing to loop")]
    CursorRepeated { cursor: String },

    #[error("Pagination stopped after {max_pages} pages with more results remaining")]
    MaxPagesExceeded { max_pages: usize },

}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a request failure error
    pub fn request_failed(
        detail: impl Into<String>,
        url: impl Into<String>,
        method: impl Into<String>,
        status: u16,
    ) -> Self {
        Self::RequestFailed {
            detail: detail.into(),
            url: url.into(),
            method: method.into(),
            status,
        }
    }

    /// Check if the API rejected the request with a non-2xx status
    pub fn is_request_failed(&self) -> bool {
        matches!(self, Self::RequestFailed { .. })
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for the TROCCO client
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("base_url");
        assert_eq!(err.to_string(), "Missing required config field: base_url");

        let err = Error::validation("count must be at least 1");
        assert_eq!(err.to_string(), "Invalid request: count must be at least 1");
    }

    #[test]
    fn test_request_failed_display() {
        let err = Error::request_failed(
            "Not Authorized",
            "https://trocco.io/api/test",
            "GET",
            403,
        );
        assert_eq!(
            err.to_string(),
            "TROCCO API request failed: Not Authorized\n\
             URL: https://trocco.io/api/test\n\
             Method: GET\n\
             Status: 403"
        );
        assert!(err.is_request_failed());
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_status_absent_for_local_errors() {
        assert_eq!(Error::config("x").status(), None);
        assert_eq!(
            Error::CursorRepeated {
                cursor: "c1".to_string()
            }
            .status(),
            None
        );
        assert!(!Error::decode("bad").is_request_failed());
    }
}
