//! Ordered query parameters
//!
//! The API is sensitive only to parameter values, but keeping insertion
//! order makes every outgoing URL deterministic and easy to assert on.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use url::Url;

/// Ordered list of query key/value pairs
///
/// Setting a key that already exists replaces its value in place;
/// new keys are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter (builder style)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    /// Set a parameter, replacing any existing value for the key
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Set a parameter only when a value is present
    pub fn set_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    /// Look up a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when no parameters are set
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over parameters in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build parameters from a JSON object
    ///
    /// `null` values are skipped. Strings pass through, numbers and booleans
    /// use their JSON text, arrays are joined with `,` and nested objects are
    /// sent as JSON text.
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        let JsonValue::Object(map) = value else {
            return Err(Error::validation(format!(
                "query parameters must be a JSON object, got: {value}"
            )));
        };

        let mut params = Self::new();
        for (key, value) in map {
            params.set_opt(key.as_str(), scalar_text(value));
        }
        Ok(params)
    }

    /// Parse a `key=value` argument as given on the command line
    pub fn parse_pair(arg: &str) -> Result<(String, String)> {
        match arg.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => Err(Error::validation(format!(
                "query parameter must look like key=value, got '{arg}'"
            ))),
        }
    }

    /// Append the parameters to a URL's query string
    pub fn append_to(&self, url: &mut Url) {
        if self.is_empty() {
            return;
        }
        url.query_pairs_mut().extend_pairs(self.iter());
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::Object(_) => {
            Some(value.to_string())
        }
        JsonValue::Array(items) => Some(
            items
                .iter()
                .filter_map(scalar_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
    }
}
