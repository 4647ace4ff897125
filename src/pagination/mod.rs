//! Pagination module
//!
//! Cursor pagination for the TROCCO API.
//!
//! # Overview
//!
//! List endpoints answer with `{"items": [...], "next_cursor": ...}` and
//! accept `limit` and `cursor` query parameters. The [`Paginator`] turns a
//! [`FetchPolicy`] into the right sequence of page requests:
//!
//! - `SinglePage` - one request at the page-size ceiling
//! - `ExactCount(n)` - requests sized `min(n - fetched, ceiling)` until `n`
//!   items are collected or pages run out
//! - `FetchAll` - requests at the ceiling until no cursor is returned

mod controller;
mod types;

pub use controller::Paginator;
pub use types::{
    FetchPolicy, Page, PageSource, PaginatedRequest, CURSOR_PARAM, DEFAULT_PAGE_SIZE_CEILING,
    LIMIT_PARAM,
};
