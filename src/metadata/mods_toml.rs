//! `META-INF/mods.toml` parsing.

use serde::Deserialize;

use super::EmbeddedMetadataEntry;

/// Template left in `version` when the jar manifest should supply the value.
pub const JAR_VERSION_TOKEN: &str = "${file.jarVersion}";

#[derive(Debug, Deserialize)]
struct ModsToml {
    #[serde(default)]
    mods: Vec<ModsTomlEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModsTomlEntry {
    mod_id: Option<String>,
    display_name: Option<String>,
    version: Option<String>,
}

/// Parse `text` and return the first `[[mods]]` table, if any.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or `mods` has the wrong shape.
///
/// # Examples
///
/// ```
/// use modmeta::metadata::mods_toml::parse_first;
///
/// let raw = "modLoader = \"javafml\"\n[[mods]]\nmodId = \"jei\"\nversion = \"11.6.0\"\n";
/// let entry = parse_first(raw).expect("valid").expect("one mod");
/// assert_eq!(entry.id.as_deref(), Some("jei"));
/// ```
pub fn parse_first(text: &str) -> Result<Option<EmbeddedMetadataEntry>, toml::de::Error> {
    let document: ModsToml = toml::from_str(text)?;
    Ok(document
        .mods
        .into_iter()
        .next()
        .map(|entry| EmbeddedMetadataEntry::new(entry.mod_id, entry.display_name, entry.version)))
}
