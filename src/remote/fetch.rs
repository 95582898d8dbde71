// src/remote/fetch.rs
// =============================================================================
// Downloads raw file contents, e.g. from raw.githubusercontent.com.
//
// Strategy:
// - One reqwest Client for the whole run (connection pooling)
// - Anything but 200 OK is a RemoteStatus error; the caller decides if
//   that stops the run
// - Connection and body-streaming failures are Transport errors
//
// Rust concepts:
// - async functions: For network I/O
// - Result: For error handling
// - map_err: Turning a library error into our own error type
// =============================================================================

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::FetchConfig;
use crate::error::FetchError;

// Builds the HTTP client shared by downloads and release lookups.
//
// Settings come from the config:
//   timeout_secs: a hung connection fails that one request instead of
//                 stalling the run forever
pub fn build_client(config: &FetchConfig) -> Result<Client, FetchError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(FetchError::Client)
}

// Fetches the body of `uri` as text
//
// Parameters:
//   client: reqwest HTTP client
//   uri: URL to fetch
//
// Returns: the body, or RemoteStatus / Transport errors
pub async fn fetch_raw(client: &Client, uri: &str) -> Result<String, FetchError> {
    debug!(uri, "GET");

    let response = client.get(uri).send().await.map_err(|source| FetchError::Transport {
        uri: uri.to_string(),
        source,
    })?;

    if response.status() != StatusCode::OK {
        return Err(FetchError::RemoteStatus {
            uri: uri.to_string(),
            status: response.status(),
        });
    }

    response.text().await.map_err(|source| FetchError::Transport {
        uri: uri.to_string(),
        source,
    })
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why compare against StatusCode::OK instead of is_success()?
//    - A 204 No Content or 206 Partial Content would give us an empty or
//      partial document, which we'd then happily write to disk
//    - Only a full 200 response counts as "we have the file"
//
// 2. Why map_err twice?
//    - send() fails on connect/DNS/TLS problems
//    - text() fails if the body stream breaks halfway
//    - Both are transport problems for the same URI, so both become
//      FetchError::Transport
// -----------------------------------------------------------------------------
