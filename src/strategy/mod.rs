//! Version-specific extraction strategies.
//!
//! A strategy is a data-driven [`StrategyDescriptor`]: an acceptance predicate
//! over platform and library versions plus the extraction behaviour for that
//! range (metadata entry name, schema, and quirks). The [`StrategyRegistry`]
//! holds descriptors in registration order and selects the first that accepts
//! a requested version.

mod descriptor;
pub mod forge;
mod registry;

pub use descriptor::{LibraryPredicate, Quirk, StrategyDescriptor, accepts_any_library};
pub use registry::StrategyRegistry;
