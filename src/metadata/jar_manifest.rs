//! Minimal `META-INF/MANIFEST.MF` attribute lookup.
//!
//! The manifest is a list of `Name: value` lines. Values longer than 72 bytes
//! continue on following lines that start with a single space.

/// Path of the jar manifest inside an archive.
pub const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

/// Attribute carrying the packaged version.
pub const IMPLEMENTATION_VERSION: &str = "Implementation-Version";

/// Return the value of `attribute` from the main section of `manifest`.
///
/// Attribute names compare case-insensitively. Blank values count as absent.
///
/// # Examples
///
/// ```
/// use modmeta::metadata::jar_manifest::main_attribute;
///
/// let manifest = "Manifest-Version: 1.0\r\nImplementation-Version: 2.3.1\r\n";
/// assert_eq!(main_attribute(manifest, "Implementation-Version").as_deref(), Some("2.3.1"));
/// ```
#[must_use]
pub fn main_attribute(manifest: &str, attribute: &str) -> Option<String> {
    let mut current: Option<(String, String)> = None;

    for line in manifest.lines() {
        if let Some(continuation) = line.strip_prefix(' ') {
            if let Some((_, value)) = current.as_mut() {
                value.push_str(continuation);
            }
            continue;
        }

        if let Some(found) = take_match(current.take(), attribute) {
            return Some(found);
        }

        // A blank line ends the main section.
        if line.is_empty() {
            return None;
        }

        current = line
            .split_once(':')
            .map(|(name, value)| (name.trim().to_owned(), value.trim_start().to_owned()));
    }

    take_match(current, attribute)
}

fn take_match(entry: Option<(String, String)>, attribute: &str) -> Option<String> {
    entry
        .filter(|(name, value)| name.eq_ignore_ascii_case(attribute) && !value.trim().is_empty())
        .map(|(_, value)| value.trim_end().to_owned())
}
