//! HTTP client wrapper for the download service.

use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::config::HTTP_CONNECT_TIMEOUT_SECS;
use crate::error::{DeltaError, Result};

/// User agent string identifying this tool.
const USER_AGENT: &str = concat!("gar-delta-report/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// Only the connect phase has a timeout. The blocking client otherwise
/// defaults to a 30 second total timeout, which a multi-hundred-megabyte
/// delta archive would exceed.
pub fn create_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .timeout(None)
        .user_agent(USER_AGENT)
        .build()
        .map_err(DeltaError::Client)
}

/// Send a GET request and fail on any non-success status.
///
/// There is no retry: one attempt per request.
pub fn get_checked(client: &Client, url: &str) -> reqwest::Result<Response> {
    let response = client.get(url).send()?;
    tracing::debug!(url, status = %response.status(), "Received response");
    response.error_for_status()
}

/// Convert bytes to a string, replacing invalid UTF-8 with U+FFFD.
///
/// Logs a warning when replacement happens.
pub fn bytes_to_string(bytes: &[u8], what: &str) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            tracing::warn!(what, "Response is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
