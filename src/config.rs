// src/config.rs
// =============================================================================
// Process-wide settings for the fetch pipeline.
//
// Every component that needs a setting gets a &FetchConfig passed in; nothing
// reads a global. Values come from the built-in defaults below, optionally
// overridden field-by-field by a TOML file:
//
//   fetch_base = "https://raw.githubusercontent.com"
//   concurrency = 4
//   status_policy = "skip"
//
// Rust concepts:
// - #[serde(default)]: missing fields fall back to Default::default()
// - Enums with serde(rename_all): "abort" / "skip" in TOML
// =============================================================================

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Warning placed above every generated document
pub const DEFAULT_WARNING_COMMENT: &str =
    "<!-- WARNING: This file is generated by docs-fetch. Edit the upstream source instead. -->";

// What to do when the remote answers with anything other than 200 OK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPolicy {
    /// Stop the whole manifest and report the error to the caller
    #[default]
    Abort,
    /// Log it, abandon that entry, keep going
    Skip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Raw-content host: `<fetch_base>/<repo>/<commit>/<path>`
    pub fetch_base: String,
    /// Browsable host for edit links: `<edit_base>/<repo>/blob/<commit>/<path>`
    pub edit_base: String,
    /// npm registry used to find a package's latest release
    pub registry_base: String,
    /// File fetched when an entry gives no `src.path`
    pub default_doc_path: String,
    /// Package-name prefix that marks a plugin
    pub plugin_prefix: String,
    pub warning_comment: String,
    /// How many downloads may be in flight at once
    pub concurrency: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    pub status_policy: StatusPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            fetch_base: "https://raw.githubusercontent.com".to_string(),
            edit_base: "https://github.com".to_string(),
            registry_base: "https://registry.npmjs.org".to_string(),
            default_doc_path: "README.md".to_string(),
            plugin_prefix: "cordova-plugin-".to_string(),
            warning_comment: DEFAULT_WARNING_COMMENT.to_string(),
            concurrency: 8,
            timeout_secs: 30,
            status_policy: StatusPolicy::Abort,
        }
    }
}

impl FetchConfig {
    /// Load defaults, then overlay the TOML file at `path` if one was given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("fetch_base", &self.fetch_base),
            ("edit_base", &self.edit_base),
            ("registry_base", &self.registry_base),
        ] {
            let url = Url::parse(value).with_context(|| format!("`{name}` is not a URL: {value}"))?;
            if !matches!(url.scheme(), "http" | "https") {
                bail!("`{name}` must be an http(s) URL, got {value}");
            }
        }

        if self.concurrency == 0 {
            bail!("`concurrency` must be at least 1");
        }
        if self.default_doc_path.trim().is_empty() {
            bail!("`default_doc_path` must not be empty");
        }

        Ok(())
    }
}

// Joins a base URI and path segments with single slashes
pub fn join_uri(base: &str, segments: &[&str]) -> String {
    let mut uri = base.trim_end_matches('/').to_string();
    for segment in segments {
        uri.push('/');
        uri.push_str(segment.trim_matches('/'));
    }
    uri
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = FetchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.status_policy, StatusPolicy::Abort);
        assert_eq!(config.default_doc_path, "README.md");
    }

    #[test]
    fn test_toml_overrides_only_given_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "concurrency = 2\nstatus_policy = \"skip\"").unwrap();

        let config = FetchConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.status_policy, StatusPolicy::Skip);
        assert_eq!(config.edit_base, "https://github.com");
    }

    #[test]
    fn test_rejects_non_http_base() {
        let config = FetchConfig {
            fetch_base: "ftp://example.com".to_string(),
            ..FetchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let config = FetchConfig {
            concurrency: 0,
            ..FetchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_join_uri() {
        assert_eq!(
            join_uri("https://github.com/", &["apache/cordova-plugin-camera", "blob", "8.0.0", "README.md"]),
            "https://github.com/apache/cordova-plugin-camera/blob/8.0.0/README.md"
        );
    }
}
