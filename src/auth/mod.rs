//! Authentication module
//!
//! The TROCCO API authenticates every call with a static API key sent as
//! `Authorization: Token <key>`. `ApiToken` owns the key and applies it to
//! outgoing requests.

mod token;

pub use token::{ApiToken, AUTH_SCHEME};

#[cfg(test)]
mod tests;
