// src/manifest/resolve.rs
// =============================================================================
// Turns a validated Entry into a FetchSpec: where to download from, where to
// write to, and which front matter to stamp on the result.
//
// URI conventions (GitHub-style):
//   download: <fetch_base>/<repoName>/<commit>/<path>
//   edit:     <edit_base>/<repoName>/blob/<commit>/<path>
//
// Only the commit default may need the network (latest release lookup);
// everything else is plain string work.
// =============================================================================

use std::path::PathBuf;

use serde_yaml::Value;
use tracing::debug;

use super::entry::Entry;
use crate::config::{join_uri, FetchConfig};
use crate::error::FetchError;
use crate::frontmatter::FrontMatter;
use crate::remote::ReleaseLookup;

/// Resolved, ready-to-run form of one entry
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSpec {
    pub front_matter: FrontMatter,
    pub download_uri: String,
    pub save_path: PathBuf,
}

impl Entry {
    /// Last path segment of the repo name unless the entry names the package
    pub fn package_name(&self) -> &str {
        self.package_name
            .as_deref()
            .unwrap_or_else(|| {
                self.repo_name
                    .rsplit('/')
                    .find(|segment| !segment.is_empty())
                    .unwrap_or(&self.repo_name)
            })
    }

    pub fn doc_path<'a>(&'a self, config: &'a FetchConfig) -> &'a str {
        self.path.as_deref().unwrap_or(&config.default_doc_path)
    }
}

// Resolves an entry, asking `releases` for the commit when none is given.
pub async fn resolve(
    entry: &Entry,
    config: &FetchConfig,
    releases: &dyn ReleaseLookup,
) -> Result<FetchSpec, FetchError> {
    let commit = match &entry.commit {
        Some(commit) => commit.clone(),
        None => {
            let package = entry.package_name();
            let latest = releases.latest_release(package).await?;
            debug!(package, commit = %latest, "no commit given, using latest release");
            latest
        }
    };

    Ok(resolve_at(entry, &commit, config))
}

// Resolves an entry against a known commit.
pub fn resolve_at(entry: &Entry, commit: &str, config: &FetchConfig) -> FetchSpec {
    let package_name = entry.package_name();
    let path = entry.doc_path(config);
    let repo = entry.repo_name.as_str();

    let mut front_matter = FrontMatter::new();
    front_matter.insert(
        "edit_link".to_string(),
        Value::from(join_uri(&config.edit_base, &[repo, "blob", commit, path])),
    );
    front_matter.insert("title".to_string(), Value::from(package_name));

    if is_plugin(package_name, &config.plugin_prefix) {
        front_matter.insert("plugin_name".to_string(), Value::from(package_name));
        front_matter.insert("plugin_version".to_string(), Value::from(commit));
    }

    FetchSpec {
        front_matter,
        download_uri: join_uri(&config.fetch_base, &[repo, commit, path]),
        save_path: entry.dest_path.clone(),
    }
}

// "cordova-plugin-camera" is a plugin, "cordova-plugin-" on its own is not
fn is_plugin(package_name: &str, prefix: &str) -> bool {
    !prefix.is_empty()
        && package_name
            .strip_prefix(prefix)
            .is_some_and(|rest| !rest.is_empty())
}
