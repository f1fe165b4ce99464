//! Manifest fetching over HTTP(S)

use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Desktop-browser User-Agent sent with every manifest request.
///
/// Some manifest hosts (notably GitLab instances) reject requests carrying a
/// default library User-Agent as bot traffic.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.11 (KHTML, like Gecko) Chrome/23.0.1271.64 Safari/537.11";

/// Errors from fetching a manifest
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Server returned {status} for {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },
}

/// Fetch the raw manifest body from `url`.
///
/// Issues a single GET with the browser User-Agent. Without a timeout the
/// request blocks as long as the client defaults allow.
pub async fn fetch_manifest(url: &str, timeout: Option<Duration>) -> Result<String, FetchError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder
        .build()
        .map_err(|e| FetchError::NetworkError(e.to_string()))?;

    debug!(url, timeout = ?timeout, "fetching source manifest");

    let response = client
        .get(url)
        .header("User-Agent", BROWSER_USER_AGENT)
        .send()
        .await
        .map_err(|e| FetchError::NetworkError(e.to_string()))?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus {
            status: response.status(),
            url: url.to_string(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::NetworkError(e.to_string()))
}

/// Whether `source` is an http(s) URL rather than a local path.
pub fn is_http_url(source: &str) -> bool {
    matches!(
        url::Url::parse(source),
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https"
    )
}
