//! Built-in Forge mod strategies.

use modmeta_common::VersionRange;

use super::{Quirk, StrategyDescriptor};
use crate::metadata::MetadataSchema;

/// Forge mods for platform 1.7 through 1.12, described by `mcmod.info`.
pub const LEGACY: StrategyDescriptor = StrategyDescriptor::new(
    "forge-mod (1.7-1.12)",
    VersionRange::between(1, 7, 12),
    "mcmod.info",
    MetadataSchema::McModInfo,
);

/// Forge mods for platform 1.13 onwards, described by `META-INF/mods.toml`.
pub const MODERN: StrategyDescriptor = StrategyDescriptor::new(
    "forge-mod (1.13+)",
    VersionRange::at_least(1, 13),
    "META-INF/mods.toml",
    MetadataSchema::ModsToml,
)
.with_quirks(&[Quirk::JarVersionFromManifest]);
