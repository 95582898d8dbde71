// src/fetcher/mod.rs
// =============================================================================
// This module runs manifests: the fetch-and-merge pipeline.
//
// Submodules:
// - orchestrator: resolve -> download -> merge front matter -> write
// - report: per-entry outcomes for printing
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers can write `fetcher::Fetcher` instead of
// `fetcher::orchestrator::Fetcher`.
// =============================================================================

mod orchestrator;
mod report;

pub use orchestrator::{dump_manifest, Fetcher};
pub use report::{DumpReport, ManifestReport};
