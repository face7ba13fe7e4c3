//! The finalised per-archive metadata record.

use serde::Serialize;

/// Resolved id, name and version for one archive.
///
/// Records are only produced by [`crate::reconciler::MetadataReconciler`],
/// which guarantees that `id` is non-empty and not the placeholder id, that
/// `name` is non-empty, and that `version` is non-empty and free of template
/// tokens. Once built a record is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRecord {
    id: String,
    name: String,
    version: String,
}

impl ModuleRecord {
    pub(crate) const fn new(id: String, name: String, version: String) -> Self {
        Self { id, name, version }
    }

    /// Resolved mod id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Resolved display name, as declared (not capitalised).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}
