// src/manifest/entry.rs
// =============================================================================
// Manifest entries, as read from disk and after validation.
//
// A manifest is a JSON array. Each element looks like:
//
//   {
//     "src":  { "repoName": "apache/cordova-plugin-camera",
//               "commit": "8.0.0", "path": "README.md" },
//     "dest": { "path": "camera/index.md" }
//   }
//
// Reading happens in two steps:
// 1. RawEntry: everything optional, straight from serde
// 2. Entry: required fields checked, dest.path checked for safety
//
// Defaults that need no network (package name, doc path) are filled in by
// the resolver, together with the commit lookup.
// =============================================================================

use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ValidationError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSource {
    pub repo_name: Option<String>,
    pub path: Option<String>,
    pub commit: Option<String>,
    pub package_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDestination {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntry {
    pub src: Option<RawSource>,
    pub dest: Option<RawDestination>,
}

/// An entry with its required fields present and its destination checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub repo_name: String,
    pub path: Option<String>,
    pub commit: Option<String>,
    pub package_name: Option<String>,
    pub dest_path: PathBuf,
}

impl RawEntry {
    // Builds a RawEntry from one element of the manifest array.
    // A JSON value of the wrong shape becomes ValidationError::Malformed
    // instead of failing the whole manifest.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value).map_err(|e| ValidationError::Malformed(e.to_string()))
    }

    pub fn validate(&self) -> Result<Entry, ValidationError> {
        let src = self
            .src
            .as_ref()
            .ok_or(ValidationError::MissingField("src"))?;
        // "apache/cordova-plugin-camera/" names the same repo; the package
        // name is taken from the last segment, so it must not be empty
        let repo_name = non_empty(&src.repo_name)
            .map(|name| name.trim_matches('/'))
            .filter(|name| !name.is_empty())
            .ok_or(ValidationError::MissingField("src.repoName"))?;
        let dest = self
            .dest
            .as_ref()
            .ok_or(ValidationError::MissingField("dest"))?;
        let dest_path = non_empty(&dest.path).ok_or(ValidationError::MissingField("dest.path"))?;

        Ok(Entry {
            repo_name: repo_name.to_string(),
            path: non_empty(&src.path).map(str::to_string),
            commit: non_empty(&src.commit).map(str::to_string),
            package_name: non_empty(&src.package_name).map(str::to_string),
            dest_path: safe_relative_path(dest_path)?,
        })
    }
}

// Treats "" and "   " the same as a missing field
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// Only plain relative paths are allowed: no root, no drive prefix, no "..".
fn safe_relative_path(raw: &str) -> Result<PathBuf, ValidationError> {
    let path = Path::new(raw);
    let mut clean = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ValidationError::UnsafeDestination(raw.to_string()));
            }
        }
    }

    if clean.as_os_str().is_empty() {
        return Err(ValidationError::UnsafeDestination(raw.to_string()));
    }

    Ok(clean)
}

// Reads a manifest file into its raw entries.
//
// The file must hold a JSON array; anything else is a broken manifest and
// is reported as an error for the whole file. Individual elements are not
// checked here so that one bad row can't sink the others.
pub fn load_manifest(path: &Path) -> Result<Vec<Result<RawEntry, ValidationError>>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading manifest {}", path.display()))?;
    parse_manifest(&raw).with_context(|| format!("parsing manifest {}", path.display()))
}

pub fn parse_manifest(raw: &str) -> Result<Vec<Result<RawEntry, ValidationError>>> {
    let value: Value = serde_json::from_str(raw)?;

    let Value::Array(items) = value else {
        bail!("a manifest must be a JSON array of entries");
    };

    Ok(items.into_iter().map(RawEntry::from_value).collect())
}
