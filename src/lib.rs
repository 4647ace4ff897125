//! # TROCCO Client
//!
//! Cursor-paginated REST client core for the TROCCO API.
//!
//! ## Features
//!
//! - **Single-request executor**: token auth, fixed JSON headers, ordered
//!   query strings and structured API errors
//! - **Pagination controller**: single page, exact count, or every page,
//!   within an endpoint's page-size ceiling
//! - **Loop guards**: repeated cursors and an optional page cap stop runaway
//!   fetches
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trocco_client::auth::ApiToken;
//! use trocco_client::http::HttpClient;
//! use trocco_client::pagination::{FetchPolicy, PaginatedRequest, Paginator};
//!
//! #[tokio::main]
//! async fn main() -> trocco_client::Result<()> {
//!     let token = ApiToken::new("my-api-key")?;
//!     let paginator = Paginator::new(HttpClient::new()?);
//!
//!     // Job lists accept at most 100 items per page
//!     let request = PaginatedRequest::new(FetchPolicy::exact_count(250)?)
//!         .page_size_ceiling(100)?;
//!     let jobs: Vec<serde_json::Value> = paginator
//!         .fetch("https://trocco.io/api/job_definitions/1/jobs", &token, &request)
//!         .await?;
//!
//!     println!("{} jobs", jobs.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │  Paginator::fetch(url, token, PaginatedRequest)  │
//! │  policy → limit/cursor per page → accumulate     │
//! └────────────────────────┬─────────────────────────┘
//!                          │ PageSource
//! ┌────────────────────────┴─────────────────────────┐
//! │  HttpClient::execute(url, token, RequestSpec)    │
//! │  headers, query, body → JSON or RequestFailed    │
//! └──────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::upper_case_acronyms)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// API token handling
pub mod auth;

/// Single-request HTTP executor
pub mod http;

/// Cursor pagination controller
pub mod pagination;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::ApiToken;
pub use config::{load_config, load_config_from_str, ClientConfig};
pub use error::{Error, Result};
pub use http::{HttpClient, HttpClientConfig, QueryParams, RequestSpec};
pub use pagination::{FetchPolicy, Page, PageSource, PaginatedRequest, Paginator};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
