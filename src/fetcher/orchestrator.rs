// src/fetcher/orchestrator.rs
// =============================================================================
// Runs one manifest: resolve every entry, download it, stamp it with front
// matter, and write it under the destination root.
//
// Each entry goes through:
//   Pending -> Resolved -> Downloading -> Merging -> Written
// and can drop out as Skipped (bad entry) or Failed (lookup, transport, IO,
// or a non-200 under StatusPolicy::Skip). A non-200 under StatusPolicy::Abort
// ends the whole manifest.
//
// Downloads run concurrently on the current task (no threads): the entries
// become a stream of futures polled with buffer_unordered, in manifest order,
// at most `config.concurrency` at a time. fetch_manifest only returns once
// every entry has finished.
// =============================================================================

use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{debug, error, info, warn};

use super::report::{DumpReport, EntryFailure, ManifestReport};
use crate::config::{FetchConfig, StatusPolicy};
use crate::error::{FetchError, ValidationError};
use crate::frontmatter::{self, FrontMatter};
use crate::manifest::{resolve, RawEntry};
use crate::remote::{fetch_raw, ReleaseLookup};

/// One manifest row as handed to the orchestrator: parsed, or already
/// known to be malformed
pub type ManifestRow = Result<RawEntry, ValidationError>;

pub struct Fetcher {
    config: FetchConfig,
    client: Client,
    releases: Box<dyn ReleaseLookup>,
}

impl Fetcher {
    // `client` is shared with the release lookup, see remote::build_client
    pub fn new(config: FetchConfig, client: Client, releases: Box<dyn ReleaseLookup>) -> Self {
        Self {
            config,
            client,
            releases,
        }
    }

    // Fetches every entry of a manifest into `root`.
    //
    // Returns the per-entry outcomes once all entries are done, or the first
    // RemoteStatus error when the status policy is Abort. In that case the
    // downloads still in flight are dropped and nothing more is written.
    pub async fn fetch_manifest(
        &self,
        root: &Path,
        rows: Vec<ManifestRow>,
    ) -> Result<ManifestReport, FetchError> {
        let mut report = ManifestReport::default();

        let jobs = rows
            .into_iter()
            .enumerate()
            .map(move |(index, row)| async move { (index, self.fetch_entry(root, index, row).await) });

        let mut outcomes = stream::iter(jobs).buffer_unordered(self.config.concurrency);

        while let Some((index, outcome)) = outcomes.next().await {
            match outcome {
                Ok(path) => report.written.push((index, path)),
                Err(FetchError::Validation { index, source }) => {
                    warn!(index, "skipping entry: {source}");
                    report.skipped.push(EntryFailure::new(index, &source));
                }
                Err(err @ FetchError::RemoteStatus { .. })
                    if self.config.status_policy == StatusPolicy::Abort =>
                {
                    error!(index, "{err}; aborting manifest");
                    return Err(err);
                }
                Err(err) => {
                    warn!(index, "entry failed: {err}");
                    report.failed.push(EntryFailure::new(index, &err));
                }
            }
        }

        report.sort();
        Ok(report)
    }

    async fn fetch_entry(
        &self,
        root: &Path,
        index: usize,
        row: ManifestRow,
    ) -> Result<PathBuf, FetchError> {
        let entry = row
            .and_then(|raw| raw.validate())
            .map_err(|source| FetchError::Validation { index, source })?;

        let spec = resolve(&entry, &self.config, self.releases.as_ref()).await?;
        debug!(index, uri = %spec.download_uri, dest = %spec.save_path.display(), "resolved");

        let target = root.join(&spec.save_path);
        ensure_parent_dir(&target).await?;

        let content = fetch_raw(&self.client, &spec.download_uri).await?;
        let document = render_document(&self.config.warning_comment, &spec.front_matter, &content);

        tokio::fs::write(&target, document)
            .await
            .map_err(|e| FetchError::io(&target, e))?;

        info!(index, "wrote {}", target.display());
        Ok(target)
    }
}

// Dry run: validates every row and creates the directories the real run
// would write into. No network, no files.
pub async fn dump_manifest(root: &Path, rows: Vec<ManifestRow>) -> Result<DumpReport, FetchError> {
    let mut report = DumpReport::default();

    for (index, row) in rows.into_iter().enumerate() {
        match row.and_then(|raw| raw.validate()) {
            Ok(entry) => {
                let target = root.join(&entry.dest_path);
                ensure_parent_dir(&target).await?;
                report.paths.push(target);
            }
            Err(source) => {
                warn!(index, "invalid entry: {source}");
                report.invalid.push(EntryFailure::new(index, &source));
            }
        }
    }

    Ok(report)
}

// Builds the final document: warning comment, blank line, merged front
// matter, then the fetched body with its own block removed.
pub fn render_document(warning: &str, generated: &FrontMatter, content: &str) -> String {
    let (from_file, body) = frontmatter::split(content);
    let merged = frontmatter::merge(generated, &from_file);
    format!("{warning}\n\n{}", frontmatter::join(body, &merged))
}

async fn ensure_parent_dir(target: &Path) -> Result<(), FetchError> {
    match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| FetchError::io(dir, e)),
        _ => Ok(()),
    }
}
