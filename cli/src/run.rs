//! Scan orchestration for the `modmeta` binary.

use std::io::Write;

use log::{info, warn};
use modmeta::classification::ClassificationMap;
use modmeta::config::ScanConfig;
use modmeta::manifest::DistributionManifest;
use modmeta::scan::{BatchScanner, scan_directory};
use modmeta::{ArchiveResolver, StrategyRegistry, Target, ZipArchiveReader};
use modmeta_common::LogDiagnostics;

use crate::cli::Cli;
use crate::error::{CliError, Result};

const TARGET: &str = "modmeta";

/// Counts reported once a run completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Archives resolved into the manifest.
    pub resolved: usize,
    /// Archives skipped after a failure.
    pub failed: usize,
}

/// Scan the mods directory named by `cli` and emit the manifest.
///
/// The manifest goes to `--output` when given, otherwise to `stdout`.
///
/// # Errors
///
/// Returns [`CliError`] when an input file cannot be loaded, the directory
/// cannot be listed, the scan aborts, or the manifest cannot be written.
pub fn run(cli: &Cli, stdout: &mut dyn Write) -> Result<RunSummary> {
    let config = load_config(cli)?;
    let classifications = load_classifications(cli)?;

    let paths = scan_directory(&cli.mods_dir).map_err(|source| CliError::ListArchives {
        path: cli.mods_dir.clone(),
        source,
    })?;
    info!(target: TARGET, "Found {} archives in {}", paths.len(), cli.mods_dir);

    let registry = StrategyRegistry::builtin();
    let diagnostics = LogDiagnostics;
    let resolver = ArchiveResolver::new(
        &registry,
        &ZipArchiveReader,
        &classifications,
        &config,
        &diagnostics,
    );
    let target = Target::new(cli.platform, cli.library.clone());
    let report = BatchScanner::new(resolver, &diagnostics)
        .with_jobs(config.jobs())
        .with_policy(config.on_missing_strategy)
        .scan(&paths, &target)?;

    let manifest = DistributionManifest::build(&report, &config)?;
    match &cli.output {
        Some(path) => {
            manifest.write(path)?;
            info!(target: TARGET, "Wrote manifest to {path}");
        }
        None => stdout
            .write_all(manifest.to_json()?.as_bytes())
            .map_err(CliError::Output)?,
    }

    Ok(RunSummary {
        resolved: report.resolved.len(),
        failed: report.failures.len(),
    })
}

fn load_config(cli: &Cli) -> Result<ScanConfig> {
    let config = match &cli.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    };
    Ok(cli.apply_overrides(config))
}

fn load_classifications(cli: &Cli) -> Result<ClassificationMap> {
    if let Some(path) = &cli.classification {
        return Ok(ClassificationMap::load(path)?);
    }
    warn!(
        target: TARGET,
        "No static analysis results supplied; every archive will report a missing classification."
    );
    Ok(ClassificationMap::default())
}
