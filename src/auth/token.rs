//! API token handling

use crate::error::{Error, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;
use std::fmt;

/// Scheme prefix placed before the key in the `Authorization` header
pub const AUTH_SCHEME: &str = "Token";

/// A validated TROCCO API key
///
/// The key is read-only once constructed and is cheap to clone, so each
/// concurrent fetch can hold its own copy.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken {
    value: String,
}

impl ApiToken {
    /// Create a token, trimming surrounding whitespace
    ///
    /// Returns a validation error when nothing but whitespace was supplied.
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err(Error::validation("API key must not be empty"));
        }
        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Raw key
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Full `Authorization` header value
    pub fn header_value(&self) -> String {
        format!("{AUTH_SCHEME} {}", self.value)
    }

    /// Attach the `Authorization` header to a request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(AUTHORIZATION, self.header_value())
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&"<redacted>").finish()
    }
}

impl std::str::FromStr for ApiToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
