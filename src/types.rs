//! Common types used throughout the TROCCO client
//!
//! This module contains shared type definitions and type aliases
//! used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl Method {
    /// Upper-case method name as sent on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            other => Err(crate::Error::validation(format!(
                "unsupported HTTP method: {other}"
            ))),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_default_is_get() {
        assert_eq!(Method::default(), Method::GET);
    }

    #[test]
    fn test_method_parse_and_display() {
        assert_eq!("patch".parse::<Method>().unwrap(), Method::PATCH);
        assert_eq!(Method::DELETE.to_string(), "DELETE");
        assert!("TRACE".parse::<Method>().is_err());
    }

    #[test]
    fn test_method_serde() {
        let m: Method = serde_json::from_str("\"POST\"").unwrap();
        assert_eq!(m, Method::POST);
        assert_eq!(serde_json::to_string(&Method::PUT).unwrap(), "\"PUT\"");
    }

    #[test]
    fn test_method_into_reqwest() {
        let m: reqwest::Method = Method::PATCH.into();
        assert_eq!(m, reqwest::Method::PATCH);
    }
}
