use super::*;
use std::error::Error as StdError;

#[test]
fn test_api_error() {
    let error = Error::ApiError("Server Error".to_string());

    assert_eq!(error.to_string(), "API request failed: Server Error");
    assert!(error.source().is_none());
}

#[test]
fn test_auth_error() {
    let error = Error::AuthError("Bad credentials".to_string());

    assert_eq!(
        error.to_string(),
        "Failed to authenticate or initialize GitHub client: Bad credentials"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_invalid_response_error() {
    let error = Error::InvalidResponse;

    assert_eq!(error.to_string(), "Invalid response format");
    assert!(error.source().is_none());
}

#[test]
fn test_not_found_error() {
    let error = Error::NotFound;

    assert_eq!(error.to_string(), "Resource not found");
}

#[test]
fn test_rate_limit_error() {
    let error = Error::RateLimitExceeded;

    assert_eq!(error.to_string(), "Rate limit exceeded");
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
