// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "docs-fetch",
    version,
    about = "Fetch plugin documentation into a local docs tree",
    long_about = "docs-fetch reads fetch manifests (JSON lists of source repo/commit/path -> destination \
                  path), downloads each file, stamps it with generated front matter, and writes it under \
                  the destination directory."
)]
pub struct Cli {
    /// Manifest files to process, in order
    ///
    /// Each is a JSON array of entries:
    /// {"src": {"repoName": "apache/cordova-plugin-camera", "commit": "8.0.0"}, "dest": {"path": "camera/index.md"}}
    #[arg(required = true)]
    pub manifests: Vec<PathBuf>,

    /// Directory the destination paths are relative to
    #[arg(long, short = 'd')]
    pub dest: PathBuf,

    /// TOML file overriding the built-in settings
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Write into the destination even if it already has files in it
    #[arg(long, visible_alias = "clean")]
    pub force: bool,

    /// Print debug-level progress (RUST_LOG overrides this)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Only resolve entries and create directories; no downloads, no writes
    #[arg(long)]
    pub dumponly: bool,

    /// Output reports in JSON format instead of a table
    #[arg(long)]
    pub json: bool,
}
