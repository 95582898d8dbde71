// src/manifest/mod.rs
// =============================================================================
// Everything about manifest entries: reading them, checking them, and
// resolving them into concrete downloads.
//
// Submodules:
// - entry: RawEntry (as parsed) and Entry (validated), manifest loading
// - resolve: Entry + config + release lookup -> FetchSpec
// =============================================================================

mod entry;
mod resolve;

pub use entry::{load_manifest, RawEntry};
pub use resolve::resolve;

#[cfg(test)]
pub use entry::parse_manifest;
