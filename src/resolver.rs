//! Single-archive resolution pipeline.
//!
//! [`ArchiveResolver`] wires the components together for one archive: select
//! a strategy, extract embedded metadata, look up the classification, infer
//! from the filename, reconcile, and generate the identifier. It holds only
//! shared read-only inputs, so resolving the same archive twice yields the same
//! result.

use camino::{Utf8Path, Utf8PathBuf};
use modmeta_common::{Diagnostics, PlatformVersion};
use serde::Serialize;

use crate::archive::ArchiveReader;
use crate::classification::{ClassificationMap, StaticAnalysisAdapter};
use crate::config::ScanConfig;
use crate::context::ArchiveContext;
use crate::error::Result;
use crate::extractor::JarMetadataExtractor;
use crate::identifier::{CanonicalIdentifier, IdentifierGenerator};
use crate::inference::CrudeInference;
use crate::reconciler::MetadataReconciler;
use crate::record::ModuleRecord;
use crate::strategy::StrategyRegistry;

const TARGET: &str = "modmeta::resolver";

/// Platform and reference library versions a rebuild targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Game platform version, for example `1.12.2`.
    pub platform: PlatformVersion,
    /// Reference library (mod loader) version.
    pub library: String,
}

impl Target {
    /// Build a target from its parts.
    #[must_use]
    pub fn new(platform: PlatformVersion, library: impl Into<String>) -> Self {
        Self {
            platform,
            library: library.into(),
        }
    }
}

/// The outcome of resolving one archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedArchive {
    filename: String,
    #[serde(skip)]
    path: Utf8PathBuf,
    record: ModuleRecord,
    identifier: CanonicalIdentifier,
    strategy: &'static str,
}

impl ResolvedArchive {
    /// Archive filename, the output mapping key.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Path the archive was read from.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Finalised metadata record.
    #[must_use]
    pub const fn record(&self) -> &ModuleRecord {
        &self.record
    }

    /// Canonical identifier.
    #[must_use]
    pub const fn identifier(&self) -> &CanonicalIdentifier {
        &self.identifier
    }

    /// Label of the strategy that resolved the archive.
    #[must_use]
    pub const fn strategy(&self) -> &'static str {
        self.strategy
    }
}

/// Resolves archives against shared, read-only rebuild inputs.
pub struct ArchiveResolver<'a> {
    registry: &'a StrategyRegistry,
    reader: &'a dyn ArchiveReader,
    classifications: &'a ClassificationMap,
    config: &'a ScanConfig,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> ArchiveResolver<'a> {
    /// Create a resolver over the given collaborators.
    #[must_use]
    pub fn new(
        registry: &'a StrategyRegistry,
        reader: &'a dyn ArchiveReader,
        classifications: &'a ClassificationMap,
        config: &'a ScanConfig,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            registry,
            reader,
            classifications,
            config,
            diagnostics,
        }
    }

    /// Resolve the archive at `path` for `target`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ResolveError::NoStrategyFound`] when no strategy
    /// supports the target, and an archive-scoped error when the archive
    /// cannot be read. Data-quality problems never fail resolution.
    pub fn resolve(&self, path: &Utf8Path, target: &Target) -> Result<ResolvedArchive> {
        let strategy = self
            .registry
            .select(&target.platform, &target.library, self.diagnostics)?;
        let context = ArchiveContext::new(path, strategy.label());

        let embedded = JarMetadataExtractor::new(strategy, self.reader, self.diagnostics)
            .extract(&context)?
            .into_entry();
        let classification =
            StaticAnalysisAdapter::new(self.classifications, self.diagnostics).lookup(&context);
        let crude = CrudeInference::from_filename(context.filename(), self.config.fallback_version());

        let record = MetadataReconciler::new(&self.config.placeholder_id, self.diagnostics)
            .reconcile(embedded, classification, &crude, &context);
        let identifier = IdentifierGenerator::new(self.config.namespace()).generate(
            &record,
            classification,
            context.filename(),
        );

        self.diagnostics.debug(
            TARGET,
            &format!("{} resolved to {identifier}", context.filename()),
        );

        Ok(ResolvedArchive {
            filename: context.filename().to_owned(),
            path: path.to_owned(),
            record,
            identifier,
            strategy: strategy.label(),
        })
    }
}
