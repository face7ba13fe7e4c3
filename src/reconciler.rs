//! Precedence-based merge of embedded metadata, classification and crude
//! inference into one [`ModuleRecord`].
//!
//! Precedence, in order:
//!
//! 1. The id is replaced when embedded metadata is absent, its id is blank, or
//!    it equals the placeholder id. The replacement is the classification id,
//!    else the lowercased crude name. The name is replaced together with the
//!    id, from the classification name, else the crude name.
//! 2. The version is replaced when absent or malformed (blank, or containing
//!    `@` or `$`), from the classification version, else the crude version.
//!    A well-formed embedded version is never overridden.
//!
//! Resolution cannot fail: crude inference always supplies a fallback.

use modmeta_common::{Diagnostics, discern, is_blank, is_malformed_version};

use crate::classification::ClassificationResult;
use crate::context::ArchiveContext;
use crate::inference::CrudeInference;
use crate::metadata::EmbeddedMetadataEntry;
use crate::record::ModuleRecord;

/// Working copy of a record, mutated as each source is applied.
#[derive(Debug, Default)]
struct RecordDraft {
    id: Option<String>,
    name: Option<String>,
    version: Option<String>,
}

impl From<EmbeddedMetadataEntry> for RecordDraft {
    fn from(entry: EmbeddedMetadataEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            version: entry.version,
        }
    }
}

/// The classification fields usable as repair sources.
struct Inferred<'a> {
    id: Option<&'a str>,
    name: Option<&'a str>,
    version: Option<&'a str>,
}

impl<'a> Inferred<'a> {
    fn from_classification(classification: Option<&'a ClassificationResult>) -> Self {
        Self {
            id: classification.and_then(|c| c.id.as_deref()),
            name: classification.and_then(|c| c.name.as_deref()),
            // A templated classification version would break the version
            // invariant, so it is skipped in favour of crude inference.
            version: classification
                .and_then(|c| c.version.as_deref())
                .filter(|version| !is_malformed_version(version)),
        }
    }
}

/// Merges the three metadata sources under a fixed precedence policy.
pub struct MetadataReconciler<'a> {
    placeholder_id: &'a str,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> MetadataReconciler<'a> {
    /// Create a reconciler treating `placeholder_id` as an unfilled id.
    #[must_use]
    pub fn new(placeholder_id: &'a str, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            placeholder_id,
            diagnostics,
        }
    }

    /// Merge the sources into a finalised record.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use modmeta::context::ArchiveContext;
    /// use modmeta::inference::CrudeInference;
    /// use modmeta::metadata::EmbeddedMetadataEntry;
    /// use modmeta::reconciler::MetadataReconciler;
    /// use modmeta_common::NoopDiagnostics;
    ///
    /// let context = ArchiveContext::new(Utf8Path::new("mods/Demo-2.0.jar"), "demo");
    /// let crude = CrudeInference::from_filename(context.filename(), "0.0.0");
    /// let embedded = EmbeddedMetadataEntry::new(
    ///     "examplemod".to_owned(),
    ///     "Example Mod".to_owned(),
    ///     "${version}".to_owned(),
    /// );
    ///
    /// let record = MetadataReconciler::new("examplemod", &NoopDiagnostics)
    ///     .reconcile(Some(embedded), None, &crude, &context);
    /// assert_eq!(record.id(), "demo");
    /// assert_eq!(record.name(), "Demo");
    /// assert_eq!(record.version(), "2.0");
    /// ```
    #[must_use]
    pub fn reconcile(
        &self,
        embedded: Option<EmbeddedMetadataEntry>,
        classification: Option<&ClassificationResult>,
        crude: &CrudeInference,
        context: &ArchiveContext<'_>,
    ) -> ModuleRecord {
        let inferred = Inferred::from_classification(classification);
        let crude_id = crude.name().to_lowercase();

        let draft = match embedded {
            Some(entry) => self.repair(RecordDraft::from(entry), &inferred, crude, &crude_id, context),
            None => RecordDraft {
                id: Some(discern(inferred.id, &crude_id).to_owned()),
                name: Some(discern(inferred.name, crude.name()).to_owned()),
                version: Some(discern(inferred.version, crude.version()).to_owned()),
            },
        };

        self.finalise(draft, &inferred, crude, context)
    }

    fn repair(
        &self,
        mut draft: RecordDraft,
        inferred: &Inferred<'_>,
        crude: &CrudeInference,
        crude_id: &str,
        context: &ArchiveContext<'_>,
    ) -> RecordDraft {
        if self.needs_new_id(draft.id.as_deref()) {
            self.diagnostics.debug(
                context.strategy(),
                &format!(
                    "{}: replacing unusable id {:?} and its name",
                    context.filename(),
                    draft.id.as_deref().unwrap_or_default()
                ),
            );
            draft.id = Some(discern(inferred.id, crude_id).to_owned());
            draft.name = Some(discern(inferred.name, crude.name()).to_owned());
        }

        if draft.version.as_deref().is_none_or(is_malformed_version) {
            self.diagnostics.debug(
                context.strategy(),
                &format!(
                    "{}: replacing missing or malformed version {:?}",
                    context.filename(),
                    draft.version.as_deref().unwrap_or_default()
                ),
            );
            draft.version = Some(discern(inferred.version, crude.version()).to_owned());
        }

        draft
    }

    /// Enforce the record invariants on whatever the precedence rules chose.
    fn finalise(
        &self,
        draft: RecordDraft,
        inferred: &Inferred<'_>,
        crude: &CrudeInference,
        context: &ArchiveContext<'_>,
    ) -> ModuleRecord {
        let id = match draft.id {
            Some(id) if !self.needs_new_id(Some(&id)) => id,
            _ => {
                let crude_id = crude.name().to_lowercase();
                if self.needs_new_id(Some(&crude_id)) {
                    self.stem_id(context.filename())
                } else {
                    crude_id
                }
            }
        };
        let name = match draft.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => discern(inferred.name, crude.name()).to_owned(),
        };
        let version = match draft.version {
            Some(version) if !is_malformed_version(&version) => version,
            _ => crude.version().to_owned(),
        };

        ModuleRecord::new(id, name, version)
    }

    fn needs_new_id(&self, id: Option<&str>) -> bool {
        is_blank(id) || id == Some(self.placeholder_id)
    }

    /// Id derived from the filename stem when the crude name is also the
    /// placeholder.
    fn stem_id(&self, filename: &str) -> String {
        let stem = filename
            .rsplit_once('.')
            .map_or(filename, |(stem, _)| stem);
        let mut id: String = stem
            .chars()
            .map(|c| {
                if c.is_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        id = id.trim_matches('_').to_owned();
        if id.is_empty() || id == self.placeholder_id {
            id.push_str(if id.is_empty() { "mod" } else { "_mod" });
        }
        id
    }
}
