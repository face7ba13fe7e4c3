//! Author-supplied metadata embedded in mod archives.
//!
//! Each strategy reads one fixed-name entry and parses it with a
//! [`MetadataSchema`]. Whatever the on-disk format, the result is normalised to
//! an [`EmbeddedMetadataEntry`].
//!
//! # Sub-modules
//!
//! - [`mcmod_info`]: `mcmod.info` JSON (bare list or versioned wrapper).
//! - [`mods_toml`]: `META-INF/mods.toml` with a `[[mods]]` table array.
//! - [`jar_manifest`]: `META-INF/MANIFEST.MF` attribute lookup.

pub mod jar_manifest;
pub mod mcmod_info;
pub mod mods_toml;

/// The first (authoritative) mod declared by an archive's metadata entry.
///
/// Every field is optional: authors routinely omit or blank them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedMetadataEntry {
    /// Declared mod id.
    pub id: Option<String>,
    /// Declared display name.
    pub name: Option<String>,
    /// Declared version, possibly an unfilled template.
    pub version: Option<String>,
}

impl EmbeddedMetadataEntry {
    /// Build an entry from its three fields.
    #[must_use]
    pub fn new(
        id: impl Into<Option<String>>,
        name: impl Into<Option<String>>,
        version: impl Into<Option<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Errors arising while parsing a metadata entry.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The entry is not valid UTF-8.
    #[error("entry is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// JSON syntax or shape mismatch.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// TOML syntax or shape mismatch.
    #[error("{0}")]
    Toml(#[from] toml::de::Error),

    /// The document parsed but declares no mods.
    #[error("entry declares no mods")]
    NoEntries,
}

/// Supported metadata entry formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataSchema {
    /// Legacy `mcmod.info` JSON.
    McModInfo,
    /// `META-INF/mods.toml`.
    ModsToml,
}

impl MetadataSchema {
    /// Parse raw entry bytes and return the first declared mod.
    ///
    /// Later entries are ignored: archives bundling several mods list the
    /// primary one first.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if the bytes match neither accepted shape or
    /// the document declares no mods.
    pub fn parse_first(self, raw: &[u8]) -> Result<EmbeddedMetadataEntry, SchemaError> {
        let text = std::str::from_utf8(raw)?;
        let first = match self {
            Self::McModInfo => mcmod_info::parse_first(text)?,
            Self::ModsToml => mods_toml::parse_first(text)?,
        };
        first.ok_or(SchemaError::NoEntries)
    }
}
