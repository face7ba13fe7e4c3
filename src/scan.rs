//! Batch resolution over many archives.
//!
//! Archives are independent, so [`BatchScanner`] may spread them across a
//! `rayon` worker pool. Workers only read shared inputs; every result is
//! merged into the output mapping on the calling thread. Cancellation is
//! cooperative and checked between archives, never mid-resolution.

use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use modmeta_common::Diagnostics;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::config::MissingStrategyPolicy;
use crate::error::{ResolveError, Result};
use crate::record::ModuleRecord;
use crate::resolver::{ArchiveResolver, ResolvedArchive, Target};

const TARGET: &str = "modmeta::scan";

/// File extensions recognised as mod archives.
pub const ARCHIVE_EXTENSIONS: &[&str] = &["jar", "zip", "litemod"];

/// List the mod archives directly inside `dir`, sorted by filename.
///
/// Only regular files whose extension is in [`ARCHIVE_EXTENSIONS`]
/// (case-insensitively) are returned. A missing directory yields no archives.
/// Returned paths are absolute, matching how the analyzer keys its results.
///
/// # Errors
///
/// Returns an error if the directory exists but cannot be read.
pub fn scan_directory(dir: &Utf8Path) -> io::Result<Vec<Utf8PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let dir = dir.canonicalize_utf8()?;
    let mut archives = Vec::new();
    for entry in dir.read_dir_utf8()? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let is_archive = entry.path().extension().is_some_and(|extension| {
            ARCHIVE_EXTENSIONS
                .iter()
                .any(|known| extension.eq_ignore_ascii_case(known))
        });
        if is_archive {
            archives.push(entry.into_path());
        }
    }

    archives.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(archives)
}

/// Cooperative cancellation flag shared between a scan and its owner.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// A token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the scan stop before its next archive.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// An archive that could not be resolved.
#[derive(Debug)]
pub struct ArchiveFailure {
    /// Path of the archive.
    pub path: Utf8PathBuf,
    /// Why resolution failed.
    pub error: ResolveError,
}

/// Results of a batch scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Resolved archives keyed by filename.
    pub resolved: BTreeMap<String, ResolvedArchive>,
    /// Archives skipped because of archive-scoped (or, under the skip policy,
    /// structural) failures, sorted by path.
    pub failures: Vec<ArchiveFailure>,
    /// Whether the scan stopped early on request.
    pub cancelled: bool,
}

impl ScanReport {
    /// The `filename → record` output mapping.
    #[must_use]
    pub fn records(&self) -> BTreeMap<&str, &ModuleRecord> {
        self.resolved
            .iter()
            .map(|(filename, resolved)| (filename.as_str(), resolved.record()))
            .collect()
    }
}

type Outcome = (Utf8PathBuf, Result<ResolvedArchive>);

/// Resolves a set of archives, optionally in parallel.
pub struct BatchScanner<'a> {
    resolver: ArchiveResolver<'a>,
    policy: MissingStrategyPolicy,
    jobs: usize,
    cancellation: CancellationToken,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> BatchScanner<'a> {
    /// Create a sequential scanner aborting on unsupported platforms.
    #[must_use]
    pub fn new(resolver: ArchiveResolver<'a>, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            resolver,
            policy: MissingStrategyPolicy::default(),
            jobs: 1,
            cancellation: CancellationToken::default(),
            diagnostics,
        }
    }

    /// Set the policy for unsupported platforms.
    #[must_use]
    pub const fn with_policy(mut self, policy: MissingStrategyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use up to `jobs` worker threads. Zero behaves as one.
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Observe `token` between archives.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Resolve every archive in `paths` for `target`.
    ///
    /// Archive-scoped failures are collected in the report. A missing
    /// strategy is collected under [`MissingStrategyPolicy::Skip`] and
    /// returned as the error under [`MissingStrategyPolicy::Abort`].
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoStrategyFound`] under the abort policy.
    pub fn scan(&self, paths: &[Utf8PathBuf], target: &Target) -> Result<ScanReport> {
        let halted = AtomicBool::new(false);
        let outcomes = if self.jobs == 1 || paths.len() <= 1 {
            self.resolve_sequential(paths, target, &halted)
        } else {
            self.resolve_parallel(paths, target, &halted)
        };

        let processed = outcomes.len();
        let mut report = self.merge(outcomes)?;
        report.cancelled = processed < paths.len() && self.cancellation.is_cancelled();

        self.diagnostics.info(
            TARGET,
            &format!(
                "Resolved {} of {} archives ({} failed{})",
                report.resolved.len(),
                paths.len(),
                report.failures.len(),
                if report.cancelled { ", cancelled" } else { "" }
            ),
        );
        Ok(report)
    }

    fn resolve_parallel(
        &self,
        paths: &[Utf8PathBuf],
        target: &Target,
        halted: &AtomicBool,
    ) -> Vec<Outcome> {
        let pool = match ThreadPoolBuilder::new().num_threads(self.jobs).build() {
            Ok(pool) => pool,
            Err(err) => {
                self.diagnostics.warn(
                    TARGET,
                    &format!("Worker pool unavailable, resolving sequentially: {err}"),
                );
                return self.resolve_sequential(paths, target, halted);
            }
        };

        pool.install(|| {
            paths
                .par_iter()
                .filter_map(|path| self.resolve_one(path, target, halted))
                .collect()
        })
    }

    fn resolve_sequential(
        &self,
        paths: &[Utf8PathBuf],
        target: &Target,
        halted: &AtomicBool,
    ) -> Vec<Outcome> {
        paths
            .iter()
            .map_while(|path| self.resolve_one(path, target, halted))
            .collect()
    }

    /// Resolve one archive unless the scan was cancelled or halted.
    fn resolve_one(
        &self,
        path: &Utf8Path,
        target: &Target,
        halted: &AtomicBool,
    ) -> Option<Outcome> {
        if self.cancellation.is_cancelled() || halted.load(Ordering::SeqCst) {
            return None;
        }
        let outcome = self.resolver.resolve(path, target);
        if outcome.as_ref().is_err_and(|err| self.halts_on(err)) {
            halted.store(true, Ordering::SeqCst);
        }
        Some((path.to_owned(), outcome))
    }

    fn halts_on(&self, error: &ResolveError) -> bool {
        !error.is_archive_scoped() && self.policy == MissingStrategyPolicy::Abort
    }

    /// Single-writer merge of worker outcomes.
    fn merge(&self, outcomes: Vec<Outcome>) -> Result<ScanReport> {
        let mut report = ScanReport::default();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(resolved) => {
                    let filename = resolved.filename().to_owned();
                    if let Some(previous) = report.resolved.insert(filename, resolved) {
                        self.diagnostics.warn(
                            TARGET,
                            &format!(
                                "{} shadows {} with the same filename",
                                path,
                                previous.path()
                            ),
                        );
                    }
                }
                Err(error) if self.halts_on(&error) => return Err(error),
                Err(error) => {
                    self.diagnostics.error(TARGET, &format!("Skipping {path}: {error}"));
                    report.failures.push(ArchiveFailure { path, error });
                }
            }
        }
        report.failures.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ZipArchiveReader;
    use crate::classification::{ClassificationMap, ClassificationResult};
    use crate::config::ScanConfig;
    use crate::strategy::StrategyRegistry;
    use log::Level;
    use modmeta_common::PlatformVersion;
    use modmeta_common::test_support::{ArchiveFixture, RecordingDiagnostics};
    use rstest::{fixture, rstest};

    struct Inputs {
        fixture: ArchiveFixture,
        registry: StrategyRegistry,
        classifications: ClassificationMap,
        config: ScanConfig,
        diagnostics: RecordingDiagnostics,
    }

    impl Inputs {
        fn dir(&self) -> Utf8PathBuf {
            Utf8PathBuf::from_path_buf(self.fixture.path().to_path_buf()).expect("utf-8 path")
        }

        fn add_mod(&self, filename: &str, modid: &str, version: &str) {
            let info = format!(r#"[{{"modid":"{modid}","name":"{modid}","version":"{version}"}}]"#);
            self.fixture
                .write_archive(filename, &[("mcmod.info", info.as_bytes())])
                .expect("archive");
        }

        fn scanner(&self) -> BatchScanner<'_> {
            let resolver = ArchiveResolver::new(
                &self.registry,
                &ZipArchiveReader,
                &self.classifications,
                &self.config,
                &self.diagnostics,
            );
            BatchScanner::new(resolver, &self.diagnostics)
        }
    }

    #[fixture]
    fn inputs() -> Inputs {
        Inputs {
            fixture: ArchiveFixture::new().expect("fixture"),
            registry: StrategyRegistry::builtin(),
            classifications: ClassificationMap::default(),
            config: ScanConfig::default(),
            diagnostics: RecordingDiagnostics::default(),
        }
    }

    fn legacy() -> Target {
        Target::new(PlatformVersion::new(1, 12, Some(2)), "14.23.5.2860")
    }

    fn modern_only() -> Target {
        Target::new(PlatformVersion::new(1, 6, Some(4)), "9.11.1.1345")
    }

    #[rstest]
    fn lists_archives_sorted_and_filtered(inputs: Inputs) {
        inputs.add_mod("b.jar", "b", "1");
        inputs.add_mod("a.ZIP", "a", "1");
        inputs.add_mod("c.litemod", "c", "1");
        inputs.fixture.write_file("notes.txt", b"x").expect("file");
        std::fs::create_dir(inputs.fixture.path().join("d.jar")).expect("dir");

        let found = scan_directory(&inputs.dir()).expect("listing");
        let names: Vec<_> = found.iter().filter_map(|p| p.file_name()).collect();
        assert_eq!(names, vec!["a.ZIP", "b.jar", "c.litemod"]);
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let found = scan_directory(Utf8Path::new("/nonexistent/modmeta/dir")).expect("listing");
        assert!(found.is_empty());
    }

    #[rstest]
    #[case::sequential(1)]
    #[case::parallel(3)]
    fn resolves_every_archive(inputs: Inputs, #[case] jobs: usize) {
        for (index, name) in ["alpha", "beta", "gamma", "delta", "epsilon"].iter().enumerate() {
            inputs.add_mod(&format!("{name}-1.{index}.jar"), name, &format!("1.{index}"));
        }
        let paths = scan_directory(&inputs.dir()).expect("listing");

        let report = inputs
            .scanner()
            .with_jobs(jobs)
            .scan(&paths, &legacy())
            .expect("scan");

        assert_eq!(report.resolved.len(), 5);
        assert!(report.failures.is_empty());
        assert!(!report.cancelled);
        let records = report.records();
        assert_eq!(records.get("gamma-1.2.jar").map(|r| r.version()), Some("1.2"));
    }

    /// `absolute` spelled relative to the current directory.
    #[cfg(unix)]
    fn relative_to_cwd(absolute: &Utf8Path) -> Utf8PathBuf {
        let cwd = std::env::current_dir().expect("current directory");
        let mut relative = Utf8PathBuf::new();
        for _ in 1..cwd.components().count() {
            relative.push("..");
        }
        relative.push(absolute.strip_prefix("/").expect("absolute path"));
        relative
    }

    #[cfg(unix)]
    #[rstest]
    fn relative_directory_matches_absolute_classification_keys(mut inputs: Inputs) {
        inputs
            .fixture
            .write_archive("Widgets-1.0.jar", &[])
            .expect("archive");
        let absolute_dir = inputs.dir().canonicalize_utf8().expect("canonical dir");
        inputs.classifications = ClassificationMap::default().with(
            absolute_dir.join("Widgets-1.0.jar"),
            ClassificationResult {
                id: Some("widgetsmod".to_owned()),
                version: Some("7.7.7".to_owned()),
                ..ClassificationResult::default()
            },
        );
        let relative_dir = relative_to_cwd(&absolute_dir);
        assert!(relative_dir.is_relative());

        let paths = scan_directory(&relative_dir).expect("listing");
        assert!(paths.iter().all(|path| path.is_absolute()));
        let report = inputs.scanner().scan(&paths, &legacy()).expect("scan");

        let records = report.records();
        let record = records.get("Widgets-1.0.jar").expect("resolved");
        assert_eq!(record.id(), "widgetsmod");
        assert_eq!(record.version(), "7.7.7");
        assert!(!inputs.diagnostics.contains(Level::Error, "failed to yield metadata"));
    }

    #[rstest]
    fn broken_archive_is_reported_and_skipped(inputs: Inputs) {
        inputs.add_mod("good-1.0.jar", "good", "1.0");
        inputs
            .fixture
            .write_file("broken.jar", &[b'x'; 256])
            .expect("file");
        let paths = scan_directory(&inputs.dir()).expect("listing");

        let report = inputs.scanner().scan(&paths, &legacy()).expect("scan");

        assert_eq!(report.resolved.len(), 1);
        assert_eq!(report.failures.len(), 1);
        let failure = report.failures.first().expect("failure");
        assert_eq!(failure.path.file_name(), Some("broken.jar"));
        assert!(failure.error.is_archive_scoped());
        assert!(inputs.diagnostics.contains(Level::Error, "Skipping"));
    }

    #[rstest]
    #[case::sequential(1)]
    #[case::parallel(3)]
    fn missing_strategy_aborts_by_default(inputs: Inputs, #[case] jobs: usize) {
        for name in ["old", "older", "oldest", "ancient"] {
            inputs.add_mod(&format!("{name}-1.0.jar"), name, "1.0");
        }
        let paths = scan_directory(&inputs.dir()).expect("listing");

        let err = inputs
            .scanner()
            .with_jobs(jobs)
            .scan(&paths, &modern_only())
            .expect_err("abort");
        assert!(matches!(err, ResolveError::NoStrategyFound { .. }));
    }

    #[rstest]
    fn missing_strategy_is_collected_when_skipping(inputs: Inputs) {
        inputs.add_mod("old-1.0.jar", "old", "1.0");
        inputs.add_mod("older-0.9.jar", "older", "0.9");
        let paths = scan_directory(&inputs.dir()).expect("listing");

        let report = inputs
            .scanner()
            .with_policy(MissingStrategyPolicy::Skip)
            .scan(&paths, &modern_only())
            .expect("scan");
        assert!(report.resolved.is_empty());
        assert_eq!(report.failures.len(), 2);
    }

    #[rstest]
    fn cancelled_scan_stops_between_archives(inputs: Inputs) {
        inputs.add_mod("one-1.jar", "one", "1");
        inputs.add_mod("two-2.jar", "two", "2");
        let paths = scan_directory(&inputs.dir()).expect("listing");
        let token = CancellationToken::new();
        token.cancel();

        let report = inputs
            .scanner()
            .with_cancellation(token)
            .scan(&paths, &legacy())
            .expect("scan");
        assert!(report.cancelled);
        assert!(report.resolved.is_empty());
    }

    #[rstest]
    fn empty_input_is_an_empty_report(inputs: Inputs) {
        let report = inputs
            .scanner()
            .with_jobs(4)
            .scan(&[], &legacy())
            .expect("scan");
        assert!(report.resolved.is_empty());
        assert!(!report.cancelled);
    }
}
