//! Scan configuration loaded from TOML.
//!
//! `ScanConfig` captures the per-rebuild settings shared by every archive in a
//! scan: the fallback identifier namespace, the placeholder id authors leave
//! behind, the crude inference fallback version, worker count, the policy for
//! platforms no strategy supports, and the artifact URL layout. Every field is
//! optional in the file and falls back to the defaults below, so an empty file
//! is a valid configuration.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use modmeta_common::is_malformed_version;
use serde::Deserialize;

/// Namespace used when the classification result carries no group.
pub const DEFAULT_NAMESPACE: &str = "generated.localdevice";

/// Crude inference version used when none is configured.
pub const DEFAULT_FALLBACK_VERSION: &str = "0.0.0";

/// Placeholder id shipped in the mod template.
pub const DEFAULT_PLACEHOLDER_ID: &str = "examplemod";

/// Errors raised while loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration from {path}")]
    Io {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration TOML.
    #[error("invalid configuration in {path}: {source}")]
    Toml {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Parser failure.
        #[source]
        source: toml::de::Error,
    },
}

/// What a batch scan does when no strategy supports the target platform.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MissingStrategyPolicy {
    /// Record the failure per archive and carry on.
    Skip,
    /// Stop the scan with the error.
    #[default]
    Abort,
}

/// Settings for one rebuild pass.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Fallback identifier namespace. Whitespace-only values are ignored.
    pub namespace: String,
    /// Id treated as unfilled template data.
    pub placeholder_id: String,
    /// Version used by crude inference when the filename carries none.
    pub fallback_version: String,
    /// Worker threads for the batch scan. Zero behaves as one.
    pub jobs: usize,
    /// Reaction to an unsupported platform version.
    pub on_missing_strategy: MissingStrategyPolicy,
    /// Base URL prefixed to artifact paths in the manifest.
    pub base_url: String,
    /// Directory segment between the base URL and the archive filename.
    pub relative_root: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            placeholder_id: DEFAULT_PLACEHOLDER_ID.to_owned(),
            fallback_version: DEFAULT_FALLBACK_VERSION.to_owned(),
            jobs: Self::default_jobs(),
            on_missing_strategy: MissingStrategyPolicy::default(),
            base_url: String::new(),
            relative_root: "forgemods".to_owned(),
        }
    }
}

impl ScanConfig {
    const fn default_jobs() -> usize {
        1
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the parser error for malformed TOML, wrongly typed values, or
    /// unknown keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use modmeta::config::ScanConfig;
    ///
    /// let config = ScanConfig::from_toml("jobs = 4\n").expect("valid configuration");
    /// assert_eq!(config.jobs, 4);
    /// assert_eq!(config.namespace(), "generated.localdevice");
    /// ```
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Toml`] if it does not parse.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        Self::load_with(path, |path| fs::read_to_string(path))
    }

    /// Load configuration using the supplied reader.
    ///
    /// Allows tests to supply file contents without touching the file system.
    ///
    /// # Errors
    ///
    /// As for [`Self::load`].
    pub fn load_with<F>(path: &Utf8Path, read: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&Utf8Path) -> std::io::Result<String>,
    {
        let source = read(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&source).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })
    }

    /// The fallback namespace, ignoring blank overrides.
    #[must_use]
    pub fn namespace(&self) -> &str {
        let trimmed = self.namespace.trim();
        if trimmed.is_empty() {
            DEFAULT_NAMESPACE
        } else {
            trimmed
        }
    }

    /// The crude inference fallback version, ignoring blank or templated
    /// overrides.
    #[must_use]
    pub fn fallback_version(&self) -> &str {
        if is_malformed_version(&self.fallback_version) {
            DEFAULT_FALLBACK_VERSION
        } else {
            self.fallback_version.trim()
        }
    }

    /// Worker thread count, at least one.
    #[must_use]
    pub fn jobs(&self) -> usize {
        self.jobs.max(1)
    }
}
