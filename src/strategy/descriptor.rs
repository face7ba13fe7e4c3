//! Strategy descriptor type.

use modmeta_common::{PlatformVersion, VersionRange};

use crate::metadata::MetadataSchema;

/// Predicate over the reference library version.
pub type LibraryPredicate = fn(&str) -> bool;

/// Accepts every library version.
#[must_use]
pub fn accepts_any_library(_library: &str) -> bool {
    true
}

/// Format-specific adjustments applied after the entry is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quirk {
    /// Fill a `${file.jarVersion}` version from the jar manifest's
    /// `Implementation-Version` attribute.
    JarVersionFromManifest,
}

/// One registered extraction strategy.
#[derive(Debug, Clone, Copy)]
pub struct StrategyDescriptor {
    label: &'static str,
    range: VersionRange,
    accepts_library: LibraryPredicate,
    entry: &'static str,
    schema: MetadataSchema,
    quirks: &'static [Quirk],
}

impl StrategyDescriptor {
    /// Describe a strategy reading `entry` with `schema` for platform versions
    /// within `range`.
    #[must_use]
    pub const fn new(
        label: &'static str,
        range: VersionRange,
        entry: &'static str,
        schema: MetadataSchema,
    ) -> Self {
        Self {
            label,
            range,
            accepts_library: accepts_any_library,
            entry,
            schema,
            quirks: &[],
        }
    }

    /// Restrict the strategy to library versions accepted by `predicate`.
    #[must_use]
    pub const fn with_library_predicate(mut self, predicate: LibraryPredicate) -> Self {
        self.accepts_library = predicate;
        self
    }

    /// Apply `quirks` after parsing.
    #[must_use]
    pub const fn with_quirks(mut self, quirks: &'static [Quirk]) -> Self {
        self.quirks = quirks;
        self
    }

    /// Whether this strategy handles `platform` with library `library`.
    ///
    /// The platform range is inclusive at both ends.
    #[must_use]
    pub fn accepts(&self, platform: &PlatformVersion, library: &str) -> bool {
        self.range.contains(platform) && (self.accepts_library)(library)
    }

    /// Diagnostics target and display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Accepted platform range.
    #[must_use]
    pub const fn range(&self) -> VersionRange {
        self.range
    }

    /// Name of the metadata entry inside the archive.
    #[must_use]
    pub const fn entry(&self) -> &'static str {
        self.entry
    }

    /// Schema used to parse the entry.
    #[must_use]
    pub const fn schema(&self) -> MetadataSchema {
        self.schema
    }

    /// Whether `quirk` applies to this strategy.
    #[must_use]
    pub fn has_quirk(&self, quirk: Quirk) -> bool {
        self.quirks.contains(&quirk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn stable_only(library: &str) -> bool {
        !library.contains("beta")
    }

    #[rstest]
    #[case::lower_bound(PlatformVersion::new(1, 7, Some(10)), true)]
    #[case::upper_bound(PlatformVersion::new(1, 12, Some(2)), true)]
    #[case::past_upper(PlatformVersion::new(1, 13, None), false)]
    #[case::below_lower(PlatformVersion::new(1, 6, Some(4)), false)]
    fn range_is_inclusive(#[case] platform: PlatformVersion, #[case] expected: bool) {
        let descriptor = StrategyDescriptor::new(
            "legacy",
            VersionRange::between(1, 7, 12),
            "mcmod.info",
            MetadataSchema::McModInfo,
        );
        assert_eq!(descriptor.accepts(&platform, "14.23.5.2860"), expected);
    }

    #[test]
    fn library_predicate_gates_acceptance() {
        let descriptor = StrategyDescriptor::new(
            "stable",
            VersionRange::at_least(1, 13),
            "META-INF/mods.toml",
            MetadataSchema::ModsToml,
        )
        .with_library_predicate(stable_only);
        let platform = PlatformVersion::new(1, 16, Some(5));
        assert!(descriptor.accepts(&platform, "36.2.0"));
        assert!(!descriptor.accepts(&platform, "37.0.0-beta"));
    }

    #[test]
    fn quirks_default_to_none() {
        let descriptor = StrategyDescriptor::new(
            "plain",
            VersionRange::at_least(1, 13),
            "META-INF/mods.toml",
            MetadataSchema::ModsToml,
        );
        assert!(!descriptor.has_quirk(Quirk::JarVersionFromManifest));
        let quirky = descriptor.with_quirks(&[Quirk::JarVersionFromManifest]);
        assert!(quirky.has_quirk(Quirk::JarVersionFromManifest));
    }
}
