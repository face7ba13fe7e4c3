//! CLI argument definitions for the `modmeta` binary.

use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;
use modmeta::config::{MissingStrategyPolicy, ScanConfig};
use modmeta_common::PlatformVersion;

/// Resolve mod archive metadata and write a distribution manifest.
#[derive(Parser, Debug, Clone)]
#[command(name = "modmeta")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Resolve a 1.12.2 mods directory and print the manifest:\n",
    "    $ modmeta servers/main/forgemods --platform 1.12.2 --library 14.23.5.2860\n\n",
    "  Use analyzer output and write to a file with four workers:\n",
    "    $ modmeta mods --platform 1.16.5 --library 36.2.39 \\\n",
    "        --classification analysis.json -o distribution.json -j 4\n",
))]
pub struct Cli {
    /// Directory containing the mod archives.
    #[arg(value_name = "DIR")]
    pub mods_dir: Utf8PathBuf,

    /// Target platform version, for example 1.12.2.
    #[arg(long, value_name = "VERSION")]
    pub platform: PlatformVersion,

    /// Reference library (mod loader) version.
    #[arg(long, value_name = "VERSION")]
    pub library: String,

    /// Configuration file (TOML).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Static analysis results (JSON) keyed by archive path.
    #[arg(long, value_name = "FILE")]
    pub classification: Option<Utf8PathBuf>,

    /// Write the manifest here instead of standard output.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    /// Number of worker threads.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Fallback identifier namespace.
    #[arg(long, value_name = "NAMESPACE")]
    pub namespace: Option<String>,

    /// Base URL for artifact downloads.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Record unsupported platforms per archive instead of aborting.
    #[arg(long)]
    pub skip_missing_strategy: bool,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Maximum log level implied by `-v` and `-q`.
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Apply command-line overrides on top of file configuration.
    #[must_use]
    pub fn apply_overrides(&self, mut config: ScanConfig) -> ScanConfig {
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        if let Some(namespace) = &self.namespace {
            config.namespace.clone_from(namespace);
        }
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if self.skip_missing_strategy {
            config.on_missing_strategy = MissingStrategyPolicy::Skip;
        }
        config
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
