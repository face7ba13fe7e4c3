//! `mcmod.info` parsing.
//!
//! Two shapes exist in the wild: a bare JSON array of mod objects, and an
//! object carrying `modListVersion` with the array under `modList`.

use serde::Deserialize;
use serde::de::IgnoredAny;

use super::EmbeddedMetadataEntry;

#[derive(Debug, Deserialize)]
struct McModInfo {
    modid: Option<String>,
    name: Option<String>,
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum McModInfoDocument {
    Versioned {
        #[serde(rename = "modListVersion")]
        _mod_list_version: IgnoredAny,
        #[serde(rename = "modList")]
        mod_list: Vec<McModInfo>,
    },
    Bare(Vec<McModInfo>),
}

impl From<McModInfo> for EmbeddedMetadataEntry {
    fn from(info: McModInfo) -> Self {
        Self::new(info.modid, info.name, info.version)
    }
}

/// Parse `text` and return the first declared mod, if any.
///
/// # Errors
///
/// Returns an error if the JSON matches neither accepted shape.
///
/// # Examples
///
/// ```
/// use modmeta::metadata::mcmod_info::parse_first;
///
/// let raw = r#"{"modListVersion": 2, "modList": [{"modid": "jei", "version": "4.16.1"}]}"#;
/// let entry = parse_first(raw).expect("valid").expect("one mod");
/// assert_eq!(entry.id.as_deref(), Some("jei"));
/// ```
pub fn parse_first(text: &str) -> Result<Option<EmbeddedMetadataEntry>, serde_json::Error> {
    let document: McModInfoDocument = serde_json::from_str(text)?;
    let mods = match document {
        McModInfoDocument::Versioned { mod_list, .. } => mod_list,
        McModInfoDocument::Bare(mods) => mods,
    };
    Ok(mods.into_iter().next().map(EmbeddedMetadataEntry::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_bare_list_and_keeps_first() {
        let raw = r#"[
            {"modid": "primary", "name": "Primary", "version": "1.0", "authorList": ["a"]},
            {"modid": "secondary", "name": "Secondary", "version": "2.0"}
        ]"#;
        let entry = parse_first(raw).expect("valid").expect("entry");
        assert_eq!(
            entry,
            EmbeddedMetadataEntry::new(
                Some("primary".to_owned()),
                Some("Primary".to_owned()),
                Some("1.0".to_owned())
            )
        );
    }

    #[test]
    fn parses_versioned_wrapper() {
        let raw = r#"{"modListVersion": 2, "modList": [{"modid": "ic2", "version": "${version}"}]}"#;
        let entry = parse_first(raw).expect("valid").expect("entry");
        assert_eq!(entry.id.as_deref(), Some("ic2"));
        assert_eq!(entry.name, None);
        assert_eq!(entry.version.as_deref(), Some("${version}"));
    }

    #[test]
    fn null_fields_are_absent() {
        let entry = parse_first(r#"[{"modid": null, "version": null}]"#)
            .expect("valid")
            .expect("entry");
        assert_eq!(entry, EmbeddedMetadataEntry::default());
    }

    #[rstest]
    #[case::syntax("{not json")]
    #[case::scalar("42")]
    #[case::wrapper_without_version(r#"{"modList": [{"modid": "x"}]}"#)]
    #[case::numeric_version(r#"[{"modid": "x", "version": 1.0}]"#)]
    fn rejects_unaccepted_shapes(#[case] raw: &str) {
        assert!(parse_first(raw).is_err(), "expected rejection for {raw}");
    }
}
