//! Filename-based crude inference.
//!
//! The last-resort source of a name and version: a pure function of the
//! archive filename that always succeeds. `ExampleMod-1.2.3.jar` yields name
//! `ExampleMod` and version `1.2.3`.

use modmeta_common::capitalize;

const SEPARATORS: [char; 3] = ['-', '_', ' '];
const UNNAMED: &str = "Unnamed";

/// Best-effort name and version derived from a filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrudeInference {
    name: String,
    version: String,
}

impl CrudeInference {
    /// Infer a name and version from `filename`.
    ///
    /// The extension is dropped and the stem split on `-`, `_` and spaces.
    /// Leading segments without digits or template characters form the name,
    /// each capitalised and joined without separators. The last version-like
    /// segment (a digit, optionally after a `v`, followed by alphanumerics,
    /// `.` or `+`) becomes the version; `fallback_version` is used when there
    /// is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use modmeta::inference::CrudeInference;
    ///
    /// let crude = CrudeInference::from_filename("just_enough_items-1.12.2-4.16.1.jar", "0.0.0");
    /// assert_eq!(crude.name(), "JustEnoughItems");
    /// assert_eq!(crude.version(), "4.16.1");
    /// ```
    #[must_use]
    pub fn from_filename(filename: &str, fallback_version: &str) -> Self {
        let stem = strip_extension(filename);
        let segments: Vec<&str> = stem
            .split(SEPARATORS)
            .filter(|segment| !segment.is_empty())
            .collect();

        Self {
            name: infer_name(&segments),
            version: infer_version(&segments).unwrap_or_else(|| fallback_version.to_owned()),
        }
    }

    /// Inferred display name, never empty.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inferred version, never empty when the fallback is non-empty.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

fn strip_extension(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, extension))
            if !stem.is_empty()
                && extension.chars().any(|c| c.is_ascii_alphabetic())
                && extension.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            stem
        }
        _ => filename,
    }
}

fn infer_name(segments: &[&str]) -> String {
    let leading: Vec<&str> = segments
        .iter()
        .copied()
        .take_while(|segment| is_name_segment(segment))
        .collect();

    let chosen: Vec<&str> = if leading.is_empty() {
        segments
            .iter()
            .copied()
            .find(|segment| version_token(segment).is_none())
            .or_else(|| segments.first().copied())
            .into_iter()
            .collect()
    } else {
        leading
    };

    let name: String = chosen.iter().map(|segment| capitalize(segment)).collect();
    if name.is_empty() {
        UNNAMED.to_owned()
    } else {
        name
    }
}

fn is_name_segment(segment: &str) -> bool {
    !segment
        .chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '$' | '@' | '{' | '}'))
}

fn infer_version(segments: &[&str]) -> Option<String> {
    segments
        .iter()
        .rev()
        .find_map(|segment| version_token(segment))
        .map(str::to_owned)
}

fn version_token(segment: &str) -> Option<&str> {
    let candidate = segment
        .strip_prefix(['v', 'V'])
        .unwrap_or(segment);
    let starts_with_digit = candidate.chars().next().is_some_and(|c| c.is_ascii_digit());
    let well_formed = candidate
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '+');
    (starts_with_digit && well_formed).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modmeta_common::is_malformed_version;
    use rstest::rstest;

    const FALLBACK: &str = "0.0.0";

    #[rstest]
    #[case::simple("ExampleMod-1.2.3.jar", "ExampleMod", "1.2.3")]
    #[case::underscored("jei_1.12.2-4.16.1.302.jar", "Jei", "4.16.1.302")]
    #[case::multi_word("just-enough-items-4.0.jar", "JustEnoughItems", "4.0")]
    #[case::v_prefix("Waila-v1.5.10.jar", "Waila", "1.5.10")]
    #[case::build_metadata("appleskin-1.0.14+mc1.12.jar", "Appleskin", "1.0.14+mc1.12")]
    #[case::no_version("Baubles.jar", "Baubles", FALLBACK)]
    #[case::digit_in_name("Ex2Mod-1.0.jar", "Ex2Mod", "1.0")]
    #[case::version_first("1.12.2-foo-3.1.jar", "Foo", "3.1")]
    #[case::only_version("1.0.jar", "1.0", "1.0")]
    #[case::no_extension("mod-1.2.3", "Mod", "1.2.3")]
    #[case::spaces("Iron Chests 7.0.jar", "IronChests", "7.0")]
    #[case::template_segment("mod-${version}.jar", "Mod", FALLBACK)]
    fn infers_name_and_version(
        #[case] filename: &str,
        #[case] name: &str,
        #[case] version: &str,
    ) {
        let crude = CrudeInference::from_filename(filename, FALLBACK);
        assert_eq!(crude.name(), name);
        assert_eq!(crude.version(), version);
    }

    #[rstest]
    #[case(".jar")]
    #[case("---.jar")]
    #[case("")]
    fn degenerate_filenames_still_yield_a_name(#[case] filename: &str) {
        let crude = CrudeInference::from_filename(filename, FALLBACK);
        assert!(!crude.name().is_empty());
        assert!(!is_malformed_version(crude.version()));
    }

    #[test]
    fn inference_is_deterministic() {
        let first = CrudeInference::from_filename("Thaumcraft-1.7.10-4.2.3.5.jar", FALLBACK);
        let second = CrudeInference::from_filename("Thaumcraft-1.7.10-4.2.3.5.jar", FALLBACK);
        assert_eq!(first, second);
    }
}
