//! Static-analysis classification results and their lookup adapter.
//!
//! An external analyzer inspects every archive once per rebuild and writes a
//! JSON document keyed by archive path. [`ClassificationMap`] holds that
//! document read-only for the duration of a scan, and
//! [`StaticAnalysisAdapter`] performs the per-archive lookup, reporting gaps
//! and limited-inference categories through the injected diagnostics.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use modmeta_common::Diagnostics;
use serde::Deserialize;

use crate::context::ArchiveContext;

/// The analyzer's verdict on an archive's mod category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum ModType {
    /// A regular mod with a `@Mod` annotation.
    Normal,
    /// A coremod without a `@Mod` annotation.
    CoreMod,
    /// A launch tweaker without a `@Mod` annotation.
    Tweaker,
    /// Not recognisably a mod, for example a library.
    #[default]
    Unknown,
}

impl From<String> for ModType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "NORMAL" => Self::Normal,
            "CORE_MOD" => Self::CoreMod,
            "TWEAKER" => Self::Tweaker,
            _ => Self::Unknown,
        }
    }
}

/// Fields inferred for one archive by the analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Inferred mod id.
    #[serde(default)]
    pub id: Option<String>,
    /// Inferred display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Inferred version.
    #[serde(default)]
    pub version: Option<String>,
    /// Inferred package group, used as the identifier namespace.
    #[serde(default)]
    pub group: Option<String>,
    /// Mod category.
    #[serde(default)]
    pub mod_type: ModType,
}

impl ClassificationResult {
    /// A result of the given category with no inferred fields.
    #[must_use]
    pub fn of_type(mod_type: ModType) -> Self {
        Self {
            mod_type,
            ..Self::default()
        }
    }
}

/// Errors arising while loading the analyzer output.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    /// The file could not be read.
    #[error("failed to read classification results from {path}")]
    Io {
        /// Path of the results file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The JSON is malformed.
    #[error("classification results parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassificationDocument {
    Wrapped {
        results: BTreeMap<Utf8PathBuf, ClassificationResult>,
    },
    Bare(BTreeMap<Utf8PathBuf, ClassificationResult>),
}

/// Read-only mapping from archive path to classification result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationMap {
    results: BTreeMap<Utf8PathBuf, ClassificationResult>,
}

impl ClassificationMap {
    /// Parse the analyzer's JSON output.
    ///
    /// Accepts `{"results": {path: result}}` or a bare `{path: result}` map.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::Json`] on malformed input.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use modmeta::classification::{ClassificationMap, ModType};
    ///
    /// let json = r#"{"results": {"mods/a.jar": {"modType": "CORE_MOD", "id": "a"}}}"#;
    /// let map = ClassificationMap::from_json(json).expect("valid results");
    /// let result = map.get(Utf8Path::new("mods/a.jar")).expect("present");
    /// assert_eq!(result.mod_type, ModType::CoreMod);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ClassificationError> {
        let document: ClassificationDocument = serde_json::from_str(json)?;
        let results = match document {
            ClassificationDocument::Wrapped { results } | ClassificationDocument::Bare(results) => {
                results
            }
        };
        Ok(Self { results })
    }

    /// Load the analyzer output from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Utf8Path) -> Result<Self, ClassificationError> {
        let json = std::fs::read_to_string(path).map_err(|source| ClassificationError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Add a result, replacing any previous entry for `path`.
    #[must_use]
    pub fn with(mut self, path: impl Into<Utf8PathBuf>, result: ClassificationResult) -> Self {
        self.results.insert(path.into(), result);
        self
    }

    /// Look up the result for `path`.
    ///
    /// Keys are matched literally first. A relative `path` that misses is
    /// retried in its canonical absolute form.
    #[must_use]
    pub fn get(&self, path: &Utf8Path) -> Option<&ClassificationResult> {
        self.results.get(path).or_else(|| {
            if path.is_absolute() {
                return None;
            }
            let absolute = path.canonicalize_utf8().ok()?;
            self.results.get(&absolute)
        })
    }

    /// Number of classified archives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no archive was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Per-archive lookup into a [`ClassificationMap`].
pub struct StaticAnalysisAdapter<'a> {
    results: &'a ClassificationMap,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> StaticAnalysisAdapter<'a> {
    /// Create an adapter over `results` reporting to `diagnostics`.
    #[must_use]
    pub fn new(results: &'a ClassificationMap, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            results,
            diagnostics,
        }
    }

    /// Look up the classification for the archive in `context`.
    ///
    /// A missing result is reported as a data-quality error and yields
    /// `None`. The mod type of a present result only affects logging.
    #[must_use]
    pub fn lookup(&self, context: &ArchiveContext<'_>) -> Option<&'a ClassificationResult> {
        let target = context.strategy();
        let filename = context.filename();

        let Some(result) = self.results.get(context.path()) else {
            self.diagnostics.error(
                target,
                &format!("Static analysis failed to yield metadata for {filename}!"),
            );
            self.diagnostics.error(
                target,
                "Is this archive malformed, or does the analyzer need an update?",
            );
            return None;
        };

        match result.mod_type {
            ModType::Normal => {}
            ModType::CoreMod => self.diagnostics.info(
                target,
                &format!(
                    "CORE_MOD discovered: {filename} has no @Mod annotation. \
                     Metadata inference capabilities are limited."
                ),
            ),
            ModType::Tweaker => self.diagnostics.info(
                target,
                &format!(
                    "TWEAKER discovered: {filename} has no @Mod annotation. \
                     Metadata inference capabilities may be limited."
                ),
            ),
            ModType::Unknown => self.diagnostics.error(
                target,
                &format!("Archive {filename} is not a recognised mod. Is it a library?"),
            ),
        }

        Some(result)
    }
}
