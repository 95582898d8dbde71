// src/fetcher/report.rs
// =============================================================================
// What happened to each entry of a manifest.
//
// #[derive(Serialize)] lets main.rs print these as JSON with --json.
// =============================================================================

use std::fmt::Display;
use std::path::PathBuf;

use serde::Serialize;

/// An entry that didn't make it, with the manifest index to find it by
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFailure {
    pub index: usize,
    pub reason: String,
}

impl EntryFailure {
    pub fn new(index: usize, reason: &impl Display) -> Self {
        Self {
            index,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ManifestReport {
    /// (manifest index, file written)
    pub written: Vec<(usize, PathBuf)>,
    /// Entries dropped because they are invalid
    pub skipped: Vec<EntryFailure>,
    /// Entries that were valid but could not be fetched or written
    pub failed: Vec<EntryFailure>,
}

impl ManifestReport {
    // Downloads finish in any order; reports read better in manifest order
    pub fn sort(&mut self) {
        self.written.sort_by_key(|(index, _)| *index);
        self.skipped.sort_by_key(|f| f.index);
        self.failed.sort_by_key(|f| f.index);
    }

    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len() + self.failed.len()
    }
}

/// Result of a dry run
#[derive(Debug, Default, Serialize)]
pub struct DumpReport {
    /// Where each valid entry would be written
    pub paths: Vec<PathBuf>,
    pub invalid: Vec<EntryFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_restores_manifest_order() {
        let mut report = ManifestReport {
            written: vec![(2, PathBuf::from("c.md")), (0, PathBuf::from("a.md"))],
            skipped: vec![EntryFailure::new(3, &"x"), EntryFailure::new(1, &"y")],
            failed: vec![],
        };

        report.sort();

        assert_eq!(report.written[0].0, 0);
        assert_eq!(report.skipped[0].index, 1);
        assert_eq!(report.total(), 4);
    }

    #[test]
    fn test_serializes_to_json() {
        let report = DumpReport {
            paths: vec![PathBuf::from("docs/camera/index.md")],
            invalid: vec![EntryFailure::new(1, &"missing required field `dest`")],
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["paths"][0], "docs/camera/index.md");
        assert_eq!(json["invalid"][0]["index"], 1);
    }
}
