//! HTTP client module
//!
//! Provides the single-request executor used for every TROCCO API call.
//!
//! # Features
//!
//! - **Fixed Headers**: JSON accept/content type, user agent and token auth
//! - **Ordered Query Strings**: absent parameters are never serialised
//! - **Error Classification**: API errors vs. transport failures

mod client;
mod query;

pub use client::{
    default_user_agent, error_detail, HttpClient, HttpClientConfig, HttpClientConfigBuilder,
    RequestSpec,
};
pub use query::QueryParams;
