//! Text helpers shared by the metadata sources.
//!
//! Author-supplied metadata is frequently incomplete. These helpers encode the
//! small set of rules used everywhere a value may be missing, blank, or an
//! unfilled build template.

/// Returns `primary` when it is present and non-empty, otherwise `fallback`.
///
/// Only emptiness is checked; whitespace-only values count as present.
///
/// # Examples
///
/// ```
/// use modmeta_common::discern;
///
/// assert_eq!(discern(Some("jei"), "fallback"), "jei");
/// assert_eq!(discern(Some(""), "fallback"), "fallback");
/// assert_eq!(discern(None, "fallback"), "fallback");
/// ```
#[must_use]
pub fn discern<'a>(primary: Option<&'a str>, fallback: &'a str) -> &'a str {
    match primary {
        Some(value) if !value.is_empty() => value,
        _ => fallback,
    }
}

/// Returns true when the value is absent or contains only whitespace.
#[must_use]
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|text| text.trim().is_empty())
}

/// Whether a version string is an unfilled template or otherwise unusable.
///
/// Build tools substitute tokens such as `${version}` or `@VERSION@` at
/// packaging time. When the substitution never ran, the token survives in the
/// shipped metadata.
///
/// # Examples
///
/// ```
/// use modmeta_common::is_malformed_version;
///
/// assert!(is_malformed_version("${version}"));
/// assert!(is_malformed_version("@VERSION@"));
/// assert!(is_malformed_version("   "));
/// assert!(!is_malformed_version("1.2.3"));
/// ```
#[must_use]
pub fn is_malformed_version(version: &str) -> bool {
    version.trim().is_empty() || version.contains('@') || version.contains('$')
}

/// Uppercases the first character of `value`, leaving the rest untouched.
///
/// # Examples
///
/// ```
/// use modmeta_common::capitalize;
///
/// assert_eq!(capitalize("journeymap"), "Journeymap");
/// assert_eq!(capitalize(""), "");
/// ```
#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::present(Some("x"), "x")]
    #[case::empty(Some(""), "fb")]
    #[case::absent(None, "fb")]
    #[case::whitespace_counts(Some(" "), " ")]
    fn discern_prefers_non_empty_primary(#[case] primary: Option<&str>, #[case] expected: &str) {
        assert_eq!(discern(primary, "fb"), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::spaces("  \t")]
    #[case::maven_token("${version}")]
    #[case::forge_token("${file.jarVersion}")]
    #[case::ant_token("@VERSION@")]
    #[case::partial("1.0-@BUILD@")]
    fn detects_malformed_versions(#[case] version: &str) {
        assert!(is_malformed_version(version), "{version:?} should be malformed");
    }

    #[rstest]
    #[case("1.2.3")]
    #[case("4.16.1.302")]
    #[case("1.12.2-14.23.5.2860")]
    #[case("r1.0+build.5")]
    fn accepts_filled_versions(#[case] version: &str) {
        assert!(!is_malformed_version(version));
    }

    #[test]
    fn capitalize_handles_multibyte_first_char() {
        assert_eq!(capitalize("éclair"), "Éclair");
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(None));
        assert!(is_blank(Some(" ")));
        assert!(!is_blank(Some("a")));
    }
}
