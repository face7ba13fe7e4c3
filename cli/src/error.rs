//! Error type for the `modmeta` binary.

use camino::Utf8PathBuf;
use modmeta::classification::ClassificationError;
use modmeta::config::ConfigError;
use modmeta::manifest::ManifestError;
use modmeta::ResolveError;
use thiserror::Error;

/// Everything that can stop a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The static analysis results could not be loaded.
    #[error(transparent)]
    Classification(#[from] ClassificationError),

    /// The scan aborted on a structural failure.
    #[error("scan aborted: {0}")]
    Scan(#[from] ResolveError),

    /// The manifest could not be built or written.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The mods directory could not be listed.
    #[error("failed to list archives in {path}")]
    ListArchives {
        /// Directory being listed.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Writing to standard output failed.
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

/// Result type alias using [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;
