//! Distribution manifest emission.
//!
//! The manifest is serialised deterministically: records are keyed by
//! filename in sorted order, modules follow the same order, and no timestamps
//! are embedded, so identical inputs produce byte-identical output.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use modmeta_common::capitalize;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::ScanConfig;
use crate::identifier::CanonicalIdentifier;
use crate::record::ModuleRecord;
use crate::resolver::ResolvedArchive;
use crate::scan::ScanReport;

/// Module type recorded for every resolved archive.
pub const MODULE_TYPE: &str = "ForgeMod";

/// Errors raised while building or writing the manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Reading an archive or writing the manifest failed.
    #[error("I/O error on {path}")]
    Io {
        /// Path being read or written.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Serialisation failed.
    #[error("manifest serialisation failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Download details for one archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    /// Size in bytes.
    pub size: u64,
    /// Lowercase hex SHA-256 digest of the archive bytes.
    pub sha256: String,
    /// Download URL.
    pub url: String,
}

/// One module listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleEntry {
    /// Canonical identifier.
    pub id: CanonicalIdentifier,
    /// Capitalised display name.
    pub name: String,
    /// Module type tag.
    #[serde(rename = "type")]
    pub module_type: &'static str,
    /// Download details.
    pub artifact: Artifact,
}

/// The generated distribution document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DistributionManifest {
    /// Resolved records keyed by archive filename.
    pub records: BTreeMap<String, ModuleRecord>,
    /// Module listing in filename order.
    pub modules: Vec<ModuleEntry>,
}

impl DistributionManifest {
    /// Build the manifest for every resolved archive in `report`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Io`] if an archive cannot be read for hashing.
    pub fn build(report: &ScanReport, config: &ScanConfig) -> Result<Self, ManifestError> {
        let mut manifest = Self::default();
        for (filename, resolved) in &report.resolved {
            manifest
                .records
                .insert(filename.clone(), resolved.record().clone());
            manifest.modules.push(module_entry(resolved, config)?);
        }
        Ok(manifest)
    }

    /// Pretty-printed JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Json`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Write the JSON form to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if serialisation or the write fails.
    pub fn write(&self, path: &Utf8Path) -> Result<(), ManifestError> {
        fs::write(path, self.to_json()?).map_err(|source| ManifestError::Io {
            path: path.to_owned(),
            source,
        })
    }
}

fn module_entry(resolved: &ResolvedArchive, config: &ScanConfig) -> Result<ModuleEntry, ManifestError> {
    let path = resolved.path();
    let io_error = |source| ManifestError::Io {
        path: path.to_owned(),
        source,
    };
    let (size, sha256) = digest(path).map_err(io_error)?;

    Ok(ModuleEntry {
        id: resolved.identifier().clone(),
        name: capitalize(resolved.record().name()),
        module_type: MODULE_TYPE,
        artifact: Artifact {
            size,
            sha256,
            url: artifact_url(&config.base_url, &config.relative_root, resolved.filename()),
        },
    })
}

/// Size and lowercase hex SHA-256 of the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn digest(path: &Utf8Path) -> io::Result<(u64, String)> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let size = io::copy(&mut file, &mut hasher)?;
    Ok((size, format!("{:x}", hasher.finalize())))
}

/// Join the URL parts with single slashes, skipping empty parts.
///
/// # Examples
///
/// ```
/// use modmeta::manifest::artifact_url;
///
/// assert_eq!(
///     artifact_url("https://cdn.example.com/", "forgemods", "jei.jar"),
///     "https://cdn.example.com/forgemods/jei.jar"
/// );
/// assert_eq!(artifact_url("", "forgemods", "jei.jar"), "forgemods/jei.jar");
/// ```
#[must_use]
pub fn artifact_url(base_url: &str, relative_root: &str, filename: &str) -> String {
    [
        base_url.trim_end_matches('/'),
        relative_root.trim_matches('/'),
        filename,
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join("/")
}
