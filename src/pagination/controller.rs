//! Paginated-fetch controller
//!
//! Drives a [`PageSource`] across cursor-linked pages according to a
//! [`FetchPolicy`]. Pages are requested strictly one after another because
//! each request needs the cursor returned by the previous one.

use super::types::{Page, PageSource, PaginatedRequest, LIMIT_PARAM};
use crate::auth::ApiToken;
use crate::error::{Error, Result};
use futures::stream::{self, Stream, TryStreamExt};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Per-invocation loop state
#[derive(Debug, Default)]
struct FetchState {
    cursor: Option<String>,
    seen_cursors: HashSet<String>,
    fetched: usize,
    pages: usize,
    done: bool,
}

/// Cursor-pagination controller over a page source
#[derive(Debug, Clone)]
pub struct Paginator<S> {
    source: S,
}

impl<S: PageSource> Paginator<S> {
    /// Create a controller over the given source
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Stream pages as they arrive
    ///
    /// The stream ends after the page that satisfies the policy. The first
    /// error ends the stream; nothing is retried.
    pub fn pages<'a, T>(
        &'a self,
        url: &'a str,
        token: &'a ApiToken,
        request: &'a PaginatedRequest,
    ) -> impl Stream<Item = Result<Page<T>>> + Send + 'a
    where
        T: DeserializeOwned + Send + 'a,
    {
        let mut initial = FetchState::default();
        if let Some(cursor) = request.initial_cursor() {
            initial.seen_cursors.insert(cursor.to_string());
            initial.cursor = Some(cursor.to_string());
        }

        stream::try_unfold(initial, move |mut state| async move {
            if state.done {
                return Ok(None);
            }
            if let Some(max_pages) = request.max_pages {
                if state.pages >= max_pages {
                    warn!(url, max_pages, "Page limit reached with more results remaining");
                    return Err(Error::MaxPagesExceeded { max_pages });
                }
            }

            let spec = request.page_spec(state.cursor.as_deref(), state.fetched);
            debug!(
                url,
                page = state.pages + 1,
                limit = spec.query.get(LIMIT_PARAM),
                cursor = state.cursor.as_deref(),
                "Requesting page"
            );

            let page: Page<T> = self.source.fetch_page(url, token, &spec).await?.decode()?;
            state.pages += 1;
            state.fetched += page.items.len();
            debug!(url, items = page.items.len(), total = state.fetched, "Received page");

            let next = page.cursor().map(String::from);
            state.done = request.policy.is_complete(state.fetched, next.as_deref());
            if let Some(cursor) = next.as_ref().filter(|_| !state.done) {
                if !state.seen_cursors.insert(cursor.clone()) {
                    warn!(url, cursor = %cursor, "API returned a cursor it already issued");
                    return Err(Error::CursorRepeated {
                        cursor: cursor.clone(),
                    });
                }
            }
            state.cursor = next;

            Ok(Some((page, state)))
        })
    }

    /// Fetch and concatenate items across pages
    ///
    /// Items keep page order and within-page order. An exact-count fetch
    /// keeps every item of its last page even when that overshoots the
    /// requested count.
    pub async fn fetch<T>(
        &self,
        url: &str,
        token: &ApiToken,
        request: &PaginatedRequest,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (items, pages) = self
            .pages::<T>(url, token, request)
            .try_fold((Vec::new(), 0usize), |(mut items, pages), page| async move {
                items.extend(page.items);
                Ok::<_, Error>((items, pages + 1))
            })
            .await?;

        info!(
            url,
            policy = ?request.policy,
            pages,
            items = items.len(),
            "Paginated fetch complete"
        );
        Ok(items)
    }
}
