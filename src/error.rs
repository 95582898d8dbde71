// src/error.rs
// =============================================================================
// Error types for the fetch pipeline.
//
// Two layers:
// - ValidationError: something is wrong with a single manifest entry. The
//   entry is skipped and the rest of the manifest carries on.
// - FetchError: something went wrong while resolving, downloading or writing
//   one entry. Only RemoteStatus can stop a whole run, and only when the
//   configured StatusPolicy says so.
//
// The application layer (main.rs) uses anyhow on top of these.
// =============================================================================

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// A manifest entry that cannot be turned into a download.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field (`src`, `src.repoName`, `dest`, `dest.path`) is absent
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The entry isn't shaped like an entry at all (e.g. a bare string)
    #[error("malformed entry: {0}")]
    Malformed(String),

    /// `dest.path` would land outside the destination root
    #[error("`dest.path` must be a relative path inside the destination root, got `{0}`")]
    UnsafeDestination(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("entry #{index}: {source}")]
    Validation {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error("{uri}: remote responded with HTTP {status}")]
    RemoteStatus { uri: String, status: StatusCode },

    #[error("{uri}: transport error: {source}")]
    Transport {
        uri: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("latest release lookup for `{package}` failed: {reason}")]
    ReleaseLookup { package: String, reason: String },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }
}
