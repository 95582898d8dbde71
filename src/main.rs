// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and load the configuration
// 3. Run each manifest (or dry-run it with --dumponly)
// 4. Print a report per manifest
// 5. Exit with proper code (0 = success, 1 = invalid entries in a dry run,
//    2 = error)
//
// The pipeline itself never exits the process; errors come back up here and
// get turned into an exit code.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - settings and their defaults
mod error;         // src/error.rs - typed pipeline errors
mod fetcher;       // src/fetcher/ - the fetch-and-merge pipeline
mod frontmatter;   // src/frontmatter/ - YAML blocks at the top of documents
mod manifest;      // src/manifest/ - manifest entries and their resolution
mod remote;        // src/remote/ - downloads and release lookups

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::FetchConfig;
use fetcher::{DumpReport, Fetcher, ManifestReport};
use remote::{build_client, NpmRegistry};

// A single-threaded runtime: downloads overlap, but nothing runs in parallel
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every manifest ran (individual entries may have been skipped)
//   Ok(1) = dry run found invalid entries
//   Err   = fatal: bad config, unreadable manifest, non-200 response, ...
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = FetchConfig::load(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    if cli.dumponly {
        return handle_dump(&cli).await;
    }

    prepare_destination(&cli.dest, cli.force)?;

    let client = build_client(&config)?;
    let releases = NpmRegistry::new(client.clone(), config.registry_base.clone());
    let fetcher = Fetcher::new(config, client, Box::new(releases));

    for manifest_path in &cli.manifests {
        info!("fetching manifest {}", manifest_path.display());
        let rows = manifest::load_manifest(manifest_path)?;

        let report = fetcher
            .fetch_manifest(&cli.dest, rows)
            .await
            .with_context(|| format!("manifest {}", manifest_path.display()))?;

        print_report(manifest_path, &report, cli.json)?;
    }

    Ok(0)
}

// Handles --dumponly: report where every entry would go, touch nothing else
async fn handle_dump(cli: &Cli) -> Result<i32> {
    let mut invalid = 0;

    for manifest_path in &cli.manifests {
        let rows = manifest::load_manifest(manifest_path)?;
        let report = fetcher::dump_manifest(&cli.dest, rows).await?;
        invalid += report.invalid.len();
        print_dump(manifest_path, &report, cli.json)?;
    }

    Ok(dump_exit_code(invalid))
}

// A dry run that met invalid entries still prints everything, then fails
fn dump_exit_code(invalid: usize) -> i32 {
    if invalid > 0 {
        1
    } else {
        0
    }
}

// RUST_LOG wins; otherwise info, or debug with --verbose.
// Logs go to stderr so --json output on stdout stays clean.
fn init_logging(verbose: bool) {
    let default = if verbose { "docs_fetch=debug" } else { "docs_fetch=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Refuses to write into a directory that already has something in it,
// unless --force/--clean was given.
fn prepare_destination(dest: &Path, force: bool) -> Result<()> {
    if !dest.exists() {
        return Ok(());
    }
    if !dest.is_dir() {
        bail!("destination {} exists and is not a directory", dest.display());
    }

    let has_files = std::fs::read_dir(dest)
        .with_context(|| format!("reading destination {}", dest.display()))?
        .next()
        .is_some();

    if has_files && !force {
        bail!(
            "destination {} is not empty; use --force to write into it anyway",
            dest.display()
        );
    }

    Ok(())
}

fn print_report(manifest: &Path, report: &ManifestReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("📄 {}", manifest.display());
    println!("{:<8} {:<12} {}", "ENTRY", "STATUS", "DETAIL");
    println!("{}", "=".repeat(80));

    for (index, path) in &report.written {
        println!("{:<8} {:<12} {}", index, "✅ WRITTEN", path.display());
    }
    for failure in &report.skipped {
        println!("{:<8} {:<12} {}", failure.index, "⏭️  SKIPPED", failure.reason);
    }
    for failure in &report.failed {
        println!("{:<8} {:<12} {}", failure.index, "❌ FAILED", failure.reason);
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Written: {}", report.written.len());
    println!("   ⏭️  Skipped: {}", report.skipped.len());
    println!("   ❌ Failed: {}", report.failed.len());
    println!("   📋 Total: {}", report.total());
    println!();

    Ok(())
}

fn print_dump(manifest: &Path, report: &DumpReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("📄 {}", manifest.display());
    for path in &report.paths {
        println!("   {}", path.display());
    }
    for failure in &report.invalid {
        println!("   ⚠️  entry #{}: {}", failure.index, failure.reason);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_exit_code() {
        assert_eq!(dump_exit_code(0), 0);
        assert_eq!(dump_exit_code(2), 1);
    }

    #[tokio::test]
    async fn test_dump_with_invalid_entry_exits_non_zero() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("fetch.json");
        std::fs::write(
            &manifest,
            r#"[
                { "src": { "repoName": "apache/cordova-plugin-camera" }, "dest": { "path": "camera/index.md" } },
                { "src": { "repoName": "apache/cordova-plugin-file" } }
            ]"#,
        )
        .unwrap();

        let out = dir.path().join("out");
        let cli = Cli::try_parse_from([
            "docs-fetch".to_string(),
            "--dumponly".to_string(),
            "--dest".to_string(),
            out.display().to_string(),
            manifest.display().to_string(),
        ])
        .unwrap();

        assert_eq!(handle_dump(&cli).await.unwrap(), 1);
        assert!(out.join("camera").is_dir());
        assert!(!out.join("camera/index.md").exists());
    }

    #[test]
    fn test_missing_destination_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        assert!(prepare_destination(&dir.path().join("new"), false).is_ok());
    }

    #[test]
    fn test_non_empty_destination_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.md"), "old").unwrap();

        assert!(prepare_destination(dir.path(), false).is_err());
        assert!(prepare_destination(dir.path(), true).is_ok());
    }

    #[test]
    fn test_empty_destination_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        assert!(prepare_destination(dir.path(), false).is_ok());
    }
}
