//! HTTP client factory with consistent timeout configuration.
//!
//! Outbound clients MUST come from `try_build_client()` or
//! `try_build_upload_client()` rather than constructing `reqwest::Client`
//! directly.

use reqwest::Client;
use std::time::Duration;

/// Connect timeout (TCP handshake + TLS).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Total request/response time for ordinary API calls.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Total request time for the logo upload.
pub const UPLOAD_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub fn try_build_client() -> Result<Client, reqwest::Error> {
    build_with_timeout(DEFAULT_REQUEST_TIMEOUT)
}

pub fn try_build_upload_client() -> Result<Client, reqwest::Error> {
    build_with_timeout(UPLOAD_REQUEST_TIMEOUT)
}

fn build_with_timeout(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
        .timeout(timeout)
        .build()
}
