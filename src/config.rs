//! Client configuration
//!
//! Settings shared by every request, loaded from YAML:
//!
//! ```yaml
//! base_url: https://trocco.io
//! user_agent: trocco-client/0.1.0
//! timeout_secs: 30
//! page_size_ceiling: 200
//! page_size_ceilings:
//!   /api/job_definitions/*/jobs: 100
//!   /api/notification_destinations/*: 50
//! max_pages: 1000
//! ```
//!
//! Every field is optional; missing fields take the defaults shown.

use crate::error::{Error, Result};
use crate::http::{default_user_agent, HttpClientConfig};
use crate::pagination::DEFAULT_PAGE_SIZE_CEILING;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Base URL of the public TROCCO API
pub const DEFAULT_BASE_URL: &str = "https://trocco.io";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL that relative API paths are joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page-size ceiling for endpoints without a stricter limit
    #[serde(default = "default_page_size_ceiling")]
    pub page_size_ceiling: u32,

    /// Stricter ceilings keyed by path pattern; `*` matches one segment
    #[serde(default = "default_page_size_ceilings")]
    pub page_size_ceilings: BTreeMap<String, u32>,

    /// Abort paginated fetches after this many pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<usize>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size_ceiling() -> u32 {
    DEFAULT_PAGE_SIZE_CEILING
}

fn default_page_size_ceilings() -> BTreeMap<String, u32> {
    BTreeMap::from([
        ("/api/job_definitions/*/jobs".to_string(), 100),
        ("/api/notification_destinations/*".to_string(), 50),
    ])
}

/// Whether `path` matches `pattern` segment by segment
fn path_matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('/').filter(|s| !s.is_empty());
    let mut path_segments = path.split('/').filter(|s| !s.is_empty());
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(p), Some(s)) if p == "*" || p == s => {}
            _ => return false,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            page_size_ceiling: default_page_size_ceiling(),
            page_size_ceilings: default_page_size_ceilings(),
            max_pages: None,
        }
    }
}

impl ClientConfig {
    /// Check the invariants every consumer relies on
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        let base = Url::parse(&self.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must use http or https, got '{}'",
                base.scheme()
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(Error::missing_field("user_agent"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be at least 1"));
        }
        if self.page_size_ceiling == 0 {
            return Err(Error::config("page_size_ceiling must be at least 1"));
        }
        for (pattern, ceiling) in &self.page_size_ceilings {
            if !pattern.starts_with('/') {
                return Err(Error::config(format!(
                    "page_size_ceilings pattern must start with '/', got '{pattern}'"
                )));
            }
            if *ceiling == 0 {
                return Err(Error::config(format!(
                    "page_size_ceilings['{pattern}'] must be at least 1"
                )));
            }
        }
        if self.max_pages == Some(0) {
            return Err(Error::config("max_pages must be at least 1 when set"));
        }
        Ok(())
    }

    /// HTTP client settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(&self.user_agent)
            .build()
    }

    /// Page-size ceiling for an API path or absolute URL
    ///
    /// The smallest matching per-endpoint ceiling wins; otherwise the
    /// global ceiling applies.
    pub fn page_size_ceiling_for(&self, path: &str) -> u32 {
        let path = match Url::parse(path) {
            Ok(url) => url.path().to_string(),
            Err(_) => path.split(['?', '#']).next().unwrap_or_default().to_string(),
        };

        self.page_size_ceilings
            .iter()
            .filter(|(pattern, _)| path_matches(pattern, &path))
            .map(|(_, ceiling)| *ceiling)
            .min()
            .unwrap_or(self.page_size_ceiling)
    }

    /// Join an API path onto the base URL
    ///
    /// Absolute `http(s)://` URLs are returned unchanged.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Render the config as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Load and validate a config file
pub fn load_config(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_config_from_str(&content)
}

/// Parse and validate config YAML
pub fn load_config_from_str(yaml: &str) -> Result<ClientConfig> {
    let config: ClientConfig = if yaml.trim().is_empty() {
        ClientConfig::default()
    } else {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?
    };

    config.validate()?;
    Ok(config)
}
