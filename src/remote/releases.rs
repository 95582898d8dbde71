// src/remote/releases.rs
// =============================================================================
// Finds the latest release of a package, used as the commit when a manifest
// entry doesn't pin one.
//
// The default implementation asks the npm registry:
//   GET <registry_base>/<package>/latest  ->  { "version": "8.0.0", ... }
//
// Plugin repos tag their releases with the bare version, so the version
// string doubles as the git ref.
// =============================================================================

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::join_uri;
use crate::error::FetchError;

#[async_trait]
pub trait ReleaseLookup: Send + Sync {
    async fn latest_release(&self, package: &str) -> Result<String, FetchError>;
}

pub struct NpmRegistry {
    client: Client,
    base: String,
}

#[derive(Debug, Deserialize)]
struct LatestManifest {
    version: String,
}

impl NpmRegistry {
    pub fn new(client: Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }
}

#[async_trait]
impl ReleaseLookup for NpmRegistry {
    async fn latest_release(&self, package: &str) -> Result<String, FetchError> {
        let failed = |reason: String| FetchError::ReleaseLookup {
            package: package.to_string(),
            reason,
        };

        // Scoped names ("@scope/name") keep the slash escaped in registry URLs
        let name = package.replace('/', "%2f");
        let uri = join_uri(&self.base, &[&name, "latest"]);

        let response = self
            .client
            .get(&uri)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(failed(format!("{uri} responded with HTTP {}", response.status())));
        }

        let latest: LatestManifest = response.json().await.map_err(|e| failed(e.to_string()))?;
        Ok(latest.version)
    }
}

// A lookup table instead of a registry
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FixedReleases(std::collections::HashMap<String, String>);

#[cfg(test)]
impl FixedReleases {
    pub fn new<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(package, version)| (package.to_string(), version.to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
#[async_trait]
impl ReleaseLookup for FixedReleases {
    async fn latest_release(&self, package: &str) -> Result<String, FetchError> {
        self.0
            .get(package)
            .cloned()
            .ok_or_else(|| FetchError::ReleaseLookup {
                package: package.to_string(),
                reason: "no release known".to_string(),
            })
    }
}
