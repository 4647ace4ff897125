//! Pagination types and traits
//!
//! Defines the page shape returned by the API, the fetch policy chosen by
//! the caller, and the `PageSource` seam the controller drives.

use crate::auth::ApiToken;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestSpec};
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::num::{NonZeroU32, NonZeroUsize};

/// Query parameter carrying the cursor of the page to fetch
pub const CURSOR_PARAM: &str = "cursor";

/// Query parameter carrying the requested page size
pub const LIMIT_PARAM: &str = "limit";

/// Page-size ceiling used when an endpoint has no stricter limit
pub const DEFAULT_PAGE_SIZE_CEILING: u32 = 200;

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in API order
    pub items: Vec<T>,
    /// Cursor of the following page, absent on the last page
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        Self { items, next_cursor }
    }

    /// Cursor of the following page, treating an empty string as absent
    pub fn cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }

    /// Check if this is the last page
    pub fn is_last(&self) -> bool {
        self.cursor().is_none()
    }
}

impl Page<JsonValue> {
    /// Decode every item into the caller's type
    pub fn decode<T: DeserializeOwned>(self) -> Result<Page<T>> {
        let items = self
            .items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<T>, _>>()
            .map_err(|e| Error::decode(format!("page item: {e}")))?;
        Ok(Page {
            items,
            next_cursor: self.next_cursor,
        })
    }
}

/// How many pages to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// One page at the ceiling size; any cursor is ignored
    #[default]
    SinglePage,
    /// Pages until at least this many items are collected or pages run out
    ExactCount(NonZeroUsize),
    /// Every page until the API stops returning a cursor
    FetchAll,
}

impl FetchPolicy {
    /// Create an exact-count policy
    pub fn exact_count(count: usize) -> Result<Self> {
        NonZeroUsize::new(count)
            .map(Self::ExactCount)
            .ok_or_else(|| Error::validation("count must be at least 1"))
    }

    /// Map the `fetch_all` / `count` flag pair onto a policy
    ///
    /// `fetch_all` takes precedence when both are set.
    pub fn from_flags(fetch_all: bool, count: Option<usize>) -> Result<Self> {
        match (fetch_all, count) {
            (true, _) => Ok(Self::FetchAll),
            (false, Some(count)) => Self::exact_count(count),
            (false, None) => Ok(Self::SinglePage),
        }
    }

    /// Like [`FetchPolicy::from_flags`] but rejects `fetch_all` combined with `count`
    pub fn try_from_flags(fetch_all: bool, count: Option<usize>) -> Result<Self> {
        if fetch_all && count.is_some() {
            return Err(Error::validation(
                "fetch_all and count cannot be used together; specify only one",
            ));
        }
        Self::from_flags(fetch_all, count)
    }

    /// Page size to request given how many items are already collected
    pub fn page_limit(&self, fetched: usize, ceiling: NonZeroU32) -> u32 {
        match self {
            Self::SinglePage | Self::FetchAll => ceiling.get(),
            Self::ExactCount(count) => {
                let remaining = count.get().saturating_sub(fetched).max(1);
                u32::try_from(remaining).map_or(ceiling.get(), |r| r.min(ceiling.get()))
            }
        }
    }

    /// Whether the loop stops after a page
    pub fn is_complete(&self, fetched: usize, next_cursor: Option<&str>) -> bool {
        match self {
            Self::SinglePage => true,
            Self::FetchAll => next_cursor.is_none(),
            Self::ExactCount(count) => fetched >= count.get() || next_cursor.is_none(),
        }
    }
}

/// A request plus the pagination policy to drive it with
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedRequest {
    /// Method, base query and body shared by every page
    pub spec: RequestSpec,
    /// Maximum page size the endpoint accepts
    pub page_size_ceiling: NonZeroU32,
    /// Fetch policy
    pub policy: FetchPolicy,
    /// Abort once this many pages were requested and more remain
    pub max_pages: Option<usize>,
}

impl Default for PaginatedRequest {
    fn default() -> Self {
        Self {
            spec: RequestSpec::default(),
            page_size_ceiling: NonZeroU32::new(DEFAULT_PAGE_SIZE_CEILING)
                .unwrap_or(NonZeroU32::MIN),
            policy: FetchPolicy::default(),
            max_pages: None,
        }
    }
}

impl PaginatedRequest {
    /// Create a request with the given policy and default ceiling
    pub fn new(policy: FetchPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Set the base request spec
    #[must_use]
    pub fn spec(mut self, spec: RequestSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Set the page-size ceiling; zero is rejected
    pub fn page_size_ceiling(mut self, ceiling: u32) -> Result<Self> {
        self.page_size_ceiling = NonZeroU32::new(ceiling)
            .ok_or_else(|| Error::validation("page size ceiling must be at least 1"))?;
        Ok(self)
    }

    /// Set the page guard
    #[must_use]
    pub fn max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Cursor supplied by the caller in the base query, if any
    pub fn initial_cursor(&self) -> Option<&str> {
        self.spec
            .query
            .get(CURSOR_PARAM)
            .filter(|c| !c.is_empty())
    }

    /// Build the spec for one page
    ///
    /// The base spec is never modified; `limit` and `cursor` are layered onto
    /// a fresh copy.
    pub fn page_spec(&self, cursor: Option<&str>, fetched: usize) -> RequestSpec {
        let mut spec = self.spec.clone();
        spec.query.set(
            LIMIT_PARAM,
            self.policy.page_limit(fetched, self.page_size_ceiling),
        );
        spec.query.set_opt(CURSOR_PARAM, cursor);
        spec
    }
}

/// Anything that can fetch one page of raw items
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch a single page
    async fn fetch_page(
        &self,
        url: &str,
        token: &ApiToken,
        spec: &RequestSpec,
    ) -> Result<Page<JsonValue>>;
}

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch_page(
        &self,
        url: &str,
        token: &ApiToken,
        spec: &RequestSpec,
    ) -> Result<Page<JsonValue>> {
        self.execute(url, token, spec).await
    }
}

#[async_trait]
impl<'a, S: PageSource + ?Sized> PageSource for &'a S {
    async fn fetch_page(
        &self,
        url: &str,
        token: &ApiToken,
        spec: &RequestSpec,
    ) -> Result<Page<JsonValue>> {
        (**self).fetch_page(url, token, spec).await
    }
}
