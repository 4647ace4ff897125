//! Tests for the auth module

use super::*;

#[test]
fn test_token_trims_whitespace() {
    let token = ApiToken::new("  secret-key \n").unwrap();
    assert_eq!(token.expose(), "secret-key");
}

#[test]
fn test_empty_token_rejected() {
    assert!(ApiToken::new("").is_err());
    assert!(ApiToken::new("   ").is_err());

    let err = "\t".parse::<ApiToken>().unwrap_err();
    assert!(err.to_string().contains("API key must not be empty"));
}

#[test]
fn test_header_value_uses_token_scheme() {
    let token = ApiToken::new("abc123").unwrap();
    assert_eq!(token.header_value(), "Token abc123");
}

#[test]
fn test_debug_redacts_key() {
    let token = ApiToken::new("very-secret").unwrap();
    let debug = format!("{token:?}");
    assert!(!debug.contains("very-secret"));
    assert!(debug.contains("redacted"));
}

#[test]
fn test_apply_sets_authorization_header() {
    let token = ApiToken::new("test-key").unwrap();

    let client = reqwest::Client::new();
    let req = token.apply(client.get("https://example.com/api"));

    // Build the request to inspect headers
    let built = req.build().unwrap();
    assert_eq!(built.headers().get("Authorization").unwrap(), "Token test-key");
}
