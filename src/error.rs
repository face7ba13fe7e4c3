//! Error types for archive resolution.
//!
//! Data-quality problems (missing or malformed embedded metadata, missing
//! classification results) are not errors: they are reported through the
//! injected diagnostics sink and resolution continues with a fallback. The
//! variants here cover the two failure kinds a batch scan must react to:
//! structural misconfiguration and archive-scoped I/O failure.

use camino::Utf8PathBuf;
use modmeta_common::PlatformVersion;
use thiserror::Error;

/// Errors that stop resolution of a single archive.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No registered strategy accepts the requested platform version.
    #[error("no extraction strategy accepts platform {platform} with library version {library}")]
    NoStrategyFound {
        /// Requested platform version.
        platform: PlatformVersion,
        /// Requested reference library version.
        library: String,
    },

    /// The archive could not be opened for reading.
    #[error("failed to open archive {path}")]
    ArchiveOpen {
        /// Path of the archive.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file opened but is not a readable archive.
    #[error("{path} is not a readable archive: {reason}")]
    ArchiveFormat {
        /// Path of the archive.
        path: Utf8PathBuf,
        /// Description of the format failure.
        reason: String,
    },
}

impl ResolveError {
    /// Whether the failure is confined to one archive.
    ///
    /// Archive-scoped failures let a batch scan report and skip the archive.
    /// Anything else signals misconfiguration that would affect every archive.
    #[must_use]
    pub const fn is_archive_scoped(&self) -> bool {
        matches!(self, Self::ArchiveOpen { .. } | Self::ArchiveFormat { .. })
    }
}

/// Result type alias using [`ResolveError`].
pub type Result<T> = std::result::Result<T, ResolveError>;
