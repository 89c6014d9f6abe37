//! Pooled HTTP client construction and header helpers.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};

use crate::error::{RelayError, Result};

/// Build the pooled client shared by the inference client and page fetcher.
///
/// `reqwest::Client` is a handle to one connection pool; clones share it and
/// a connection goes back to the pool once its response body is consumed or
/// dropped.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("relaybot/", env!("CARGO_PKG_VERSION"))),
    );
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .default_headers(headers)
        .build()
        .map_err(|e| RelayError::Configuration(format!("failed to build HTTP client: {e}")))
}

/// JSON content type plus an optional Bearer token.
pub fn json_headers(api_key: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(key) = api_key.filter(|k| !k.is_empty()) {
        if let Ok(val) = HeaderValue::from_str(&format!("Bearer {key}")) {
            headers.insert(AUTHORIZATION, val);
        }
    }
    headers
}

/// Read the body of a non-success response for the error message.
pub async fn status_error(resp: reqwest::Response) -> RelayError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    RelayError::status(status, body)
}
