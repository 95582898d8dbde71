// src/remote/mod.rs
// =============================================================================
// This module talks to the outside world.
//
// Currently implements:
// - Fetching raw file contents (GitHub's raw host by default)
// - Looking up a package's latest release on the npm registry
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Traits: ReleaseLookup lets tests swap the registry for a table
// =============================================================================

mod fetch;
mod releases;

pub use fetch::{build_client, fetch_raw};
pub use releases::{NpmRegistry, ReleaseLookup};

#[cfg(test)]
pub use releases::FixedReleases;
