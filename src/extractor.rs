//! Reading author-supplied metadata from an archive.
//!
//! The extractor opens the archive, reads the strategy's metadata entry, and
//! closes the archive before returning. The handle lives in a local binding, so
//! it is released on every path out of [`JarMetadataExtractor::extract`],
//! parse failures included.

use modmeta_common::Diagnostics;

use crate::archive::{ArchiveError, ArchiveHandle, ArchiveReader};
use crate::context::ArchiveContext;
use crate::error::{ResolveError, Result};
use crate::metadata::jar_manifest::{IMPLEMENTATION_VERSION, MANIFEST_ENTRY, main_attribute};
use crate::metadata::mods_toml::JAR_VERSION_TOKEN;
use crate::metadata::EmbeddedMetadataEntry;
use crate::strategy::{Quirk, StrategyDescriptor};

/// Outcome of reading an archive's metadata entry.
///
/// Neither `Absent` nor `Unparsable` is an error: both are reported as
/// diagnostics and resolution falls back to the other sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The entry parsed; holds its first declared mod.
    Found(EmbeddedMetadataEntry),
    /// The archive has no such entry.
    Absent,
    /// The entry exists but matches no accepted shape.
    Unparsable,
}

impl Extraction {
    /// The parsed entry, if any.
    #[must_use]
    pub fn into_entry(self) -> Option<EmbeddedMetadataEntry> {
        match self {
            Self::Found(entry) => Some(entry),
            Self::Absent | Self::Unparsable => None,
        }
    }
}

/// Reads the metadata entry named by a strategy.
pub struct JarMetadataExtractor<'a> {
    strategy: &'a StrategyDescriptor,
    reader: &'a dyn ArchiveReader,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> JarMetadataExtractor<'a> {
    /// Create an extractor for `strategy` reading archives through `reader`.
    #[must_use]
    pub fn new(
        strategy: &'a StrategyDescriptor,
        reader: &'a dyn ArchiveReader,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            strategy,
            reader,
            diagnostics,
        }
    }

    /// Read and parse the metadata entry of the archive in `context`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ArchiveOpen`] or [`ResolveError::ArchiveFormat`]
    /// when the archive itself cannot be read. A missing or malformed entry is
    /// not an error.
    pub fn extract(&self, context: &ArchiveContext<'_>) -> Result<Extraction> {
        let mut handle = self
            .reader
            .open(context.path())
            .map_err(|err| archive_failure(context, err))?;

        let entry = self.strategy.entry();
        let Some(raw) = read(handle.as_mut(), entry, context)? else {
            self.diagnostics.warn(
                context.strategy(),
                &format!("{} does not contain {entry}.", context.filename()),
            );
            return Ok(Extraction::Absent);
        };

        let mut parsed = match self.strategy.schema().parse_first(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.diagnostics.error(
                    context.strategy(),
                    &format!(
                        "{} contains an invalid {entry} file: {err}",
                        context.filename()
                    ),
                );
                return Ok(Extraction::Unparsable);
            }
        };

        if self.strategy.has_quirk(Quirk::JarVersionFromManifest)
            && parsed.version.as_deref() == Some(JAR_VERSION_TOKEN)
        {
            if let Some(version) = jar_version(handle.as_mut(), context)? {
                self.diagnostics.debug(
                    context.strategy(),
                    &format!(
                        "{}: using {IMPLEMENTATION_VERSION} {version} from {MANIFEST_ENTRY}",
                        context.filename()
                    ),
                );
                parsed.version = Some(version);
            }
        }

        Ok(Extraction::Found(parsed))
    }
}

fn read(
    handle: &mut dyn ArchiveHandle,
    entry: &str,
    context: &ArchiveContext<'_>,
) -> Result<Option<Vec<u8>>> {
    handle
        .read_entry(entry)
        .map_err(|err| archive_failure(context, err))
}

fn jar_version(handle: &mut dyn ArchiveHandle, context: &ArchiveContext<'_>) -> Result<Option<String>> {
    let Some(raw) = read(handle, MANIFEST_ENTRY, context)? else {
        return Ok(None);
    };
    Ok(main_attribute(&String::from_utf8_lossy(&raw), IMPLEMENTATION_VERSION))
}

fn archive_failure(context: &ArchiveContext<'_>, error: ArchiveError) -> ResolveError {
    let path = context.path().to_owned();
    match error {
        ArchiveError::Io(source) => ResolveError::ArchiveOpen { path, source },
        ArchiveError::Format(reason) => ResolveError::ArchiveFormat { path, reason },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::archive::{MockArchiveReader, ZipArchiveReader};
    use crate::strategy::forge;
    use camino::{Utf8Path, Utf8PathBuf};
    use log::Level;
    use modmeta_common::test_support::{ArchiveFixture, RecordingDiagnostics};
    use rstest::{fixture, rstest};

    /// In-memory handle that flags when it is dropped.
    struct TrackedHandle {
        entries: BTreeMap<&'static str, &'static [u8]>,
        released: Arc<AtomicBool>,
    }

    impl ArchiveHandle for TrackedHandle {
        fn read_entry(&mut self, name: &str) -> std::result::Result<Option<Vec<u8>>, ArchiveError> {
            Ok(self.entries.get(name).map(|bytes| bytes.to_vec()))
        }
    }

    impl Drop for TrackedHandle {
        fn drop(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    fn tracked_reader(
        entries: &[(&'static str, &'static [u8])],
        released: &Arc<AtomicBool>,
    ) -> MockArchiveReader {
        let entries: BTreeMap<_, _> = entries.iter().copied().collect();
        let released = Arc::clone(released);
        let mut reader = MockArchiveReader::new();
        reader.expect_open().times(1).returning(move |_| {
            Ok(Box::new(TrackedHandle {
                entries: entries.clone(),
                released: Arc::clone(&released),
            }))
        });
        reader
    }

    #[fixture]
    fn diagnostics() -> RecordingDiagnostics {
        RecordingDiagnostics::default()
    }

    fn extract_with(
        strategy: &StrategyDescriptor,
        reader: &dyn ArchiveReader,
        diagnostics: &RecordingDiagnostics,
        path: &str,
    ) -> Result<Extraction> {
        let context = ArchiveContext::new(Utf8Path::new(path), strategy.label());
        JarMetadataExtractor::new(strategy, reader, diagnostics).extract(&context)
    }

    #[rstest]
    fn parses_first_listed_mod(diagnostics: RecordingDiagnostics) {
        let released = Arc::new(AtomicBool::new(false));
        let reader = tracked_reader(
            &[(
                "mcmod.info",
                br#"[{"modid":"first","name":"First","version":"1.0"},{"modid":"second"}]"#,
            )],
            &released,
        );

        let extraction = extract_with(&forge::LEGACY, &reader, &diagnostics, "mods/first.jar")
            .expect("extraction");
        let entry = extraction.into_entry().expect("entry");
        assert_eq!(entry.id.as_deref(), Some("first"));
        assert!(released.load(Ordering::SeqCst));
        assert!(diagnostics.is_empty());
    }

    #[rstest]
    fn absent_entry_warns(diagnostics: RecordingDiagnostics) {
        let released = Arc::new(AtomicBool::new(false));
        let reader = tracked_reader(&[], &released);

        let extraction = extract_with(&forge::LEGACY, &reader, &diagnostics, "mods/bare.jar")
            .expect("extraction");
        assert_eq!(extraction, Extraction::Absent);
        assert!(diagnostics.contains(Level::Warn, "bare.jar does not contain mcmod.info."));
        assert!(released.load(Ordering::SeqCst));
    }

    #[rstest]
    #[case::garbage(b"not json at all")]
    #[case::wrong_shape(br#"{"modid":"x"}"#)]
    #[case::empty_list(b"[]")]
    fn unparsable_entry_releases_handle(
        diagnostics: RecordingDiagnostics,
        #[case] contents: &'static [u8],
    ) {
        let released = Arc::new(AtomicBool::new(false));
        let reader = tracked_reader(&[("mcmod.info", contents)], &released);

        let extraction = extract_with(&forge::LEGACY, &reader, &diagnostics, "mods/bad.jar")
            .expect("extraction");
        assert_eq!(extraction, Extraction::Unparsable);
        assert!(diagnostics.contains(Level::Error, "bad.jar contains an invalid mcmod.info"));
        assert!(released.load(Ordering::SeqCst));
    }

    #[rstest]
    fn open_failure_is_archive_scoped(diagnostics: RecordingDiagnostics) {
        let mut reader = MockArchiveReader::new();
        reader
            .expect_open()
            .withf(|path| path.as_str() == "mods/gone.jar")
            .returning(|_| Err(ArchiveError::Io(std::io::ErrorKind::NotFound.into())));

        let err = extract_with(&forge::LEGACY, &reader, &diagnostics, "mods/gone.jar")
            .expect_err("open fails");
        assert!(matches!(
            &err,
            ResolveError::ArchiveOpen { path, .. } if path == &Utf8PathBuf::from("mods/gone.jar")
        ));
        assert!(err.is_archive_scoped());
    }

    #[rstest]
    fn jar_version_token_filled_from_manifest(diagnostics: RecordingDiagnostics) {
        let released = Arc::new(AtomicBool::new(false));
        let reader = tracked_reader(
            &[
                (
                    "META-INF/mods.toml",
                    b"[[mods]]\nmodId = \"jei\"\nversion = \"${file.jarVersion}\"\n",
                ),
                (
                    "META-INF/MANIFEST.MF",
                    b"Manifest-Version: 1.0\r\nImplementation-Version: 11.6.0.1016\r\n",
                ),
            ],
            &released,
        );

        let entry = extract_with(&forge::MODERN, &reader, &diagnostics, "jei.jar")
            .expect("extraction")
            .into_entry()
            .expect("entry");
        assert_eq!(entry.version.as_deref(), Some("11.6.0.1016"));
        assert!(diagnostics.contains(Level::Debug, "Implementation-Version 11.6.0.1016"));
    }

    #[rstest]
    fn jar_version_token_kept_without_manifest(diagnostics: RecordingDiagnostics) {
        let released = Arc::new(AtomicBool::new(false));
        let reader = tracked_reader(
            &[(
                "META-INF/mods.toml",
                b"[[mods]]\nmodId = \"jei\"\nversion = \"${file.jarVersion}\"\n",
            )],
            &released,
        );

        let entry = extract_with(&forge::MODERN, &reader, &diagnostics, "jei.jar")
            .expect("extraction")
            .into_entry()
            .expect("entry");
        assert_eq!(entry.version.as_deref(), Some(JAR_VERSION_TOKEN));
    }

    #[rstest]
    fn reads_real_zip_archive(diagnostics: RecordingDiagnostics) {
        let fixture = ArchiveFixture::new().expect("fixture");
        let path = fixture
            .write_archive(
                "waila.jar",
                &[(
                    "mcmod.info",
                    br#"{"modListVersion":2,"modList":[{"modid":"waila","name":"Waila","version":"1.5.10"}]}"#,
                )],
            )
            .expect("archive");
        let path = Utf8PathBuf::from_path_buf(path).expect("utf-8 path");

        let entry = extract_with(&forge::LEGACY, &ZipArchiveReader, &diagnostics, path.as_str())
            .expect("extraction")
            .into_entry()
            .expect("entry");
        assert_eq!(entry.name.as_deref(), Some("Waila"));
        assert_eq!(entry.version.as_deref(), Some("1.5.10"));
    }
}
