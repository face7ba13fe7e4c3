//! Scoped read access to mod archives.
//!
//! [`ArchiveReader`] opens an archive and hands back an [`ArchiveHandle`]. The
//! handle owns every resource tied to the open archive and releases them when
//! dropped, so callers get release on every exit path simply by letting the
//! handle fall out of scope.

use std::fs::File;
use std::io::{BufReader, Read};

use camino::Utf8Path;
use zip::ZipArchive;
use zip::result::ZipError;

/// Errors raised by archive access.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// I/O failure while opening or reading.
    #[error("archive I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes are not a valid archive, or an entry is corrupt.
    #[error("invalid archive: {0}")]
    Format(String),
}

/// An open archive. Dropping the handle releases the underlying file.
pub trait ArchiveHandle {
    /// Read the entry named `name` in full.
    ///
    /// Returns `Ok(None)` when the archive has no such entry.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError`] if the entry exists but cannot be read.
    fn read_entry(&mut self, name: &str) -> Result<Option<Vec<u8>>, ArchiveError>;
}

/// Opens archives for reading, enabling test mocking.
///
/// Readers are shared across batch scan workers.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use modmeta::archive::{ArchiveReader, ZipArchiveReader};
///
/// let mut handle = ZipArchiveReader
///     .open(Utf8Path::new("mods/jei-4.16.1.302.jar"))
///     .expect("readable archive");
/// let info = handle.read_entry("mcmod.info").expect("readable entry");
/// println!("mcmod.info present: {}", info.is_some());
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveReader: Send + Sync {
    /// Open the archive at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Io`] if the file cannot be opened and
    /// [`ArchiveError::Format`] if it is not a readable archive.
    fn open(&self, path: &Utf8Path) -> Result<Box<dyn ArchiveHandle>, ArchiveError>;
}

/// Default reader for zip-based archives (`.jar`, `.zip`, `.litemod`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveReader;

impl ArchiveReader for ZipArchiveReader {
    fn open(&self, path: &Utf8Path) -> Result<Box<dyn ArchiveHandle>, ArchiveError> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(BufReader::new(file)).map_err(zip_error)?;
        Ok(Box::new(ZipHandle { archive }))
    }
}

struct ZipHandle {
    archive: ZipArchive<BufReader<File>>,
}

impl ArchiveHandle for ZipHandle {
    fn read_entry(&mut self, name: &str) -> Result<Option<Vec<u8>>, ArchiveError> {
        let mut entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(other) => return Err(zip_error(other)),
        };
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents)?;
        Ok(Some(contents))
    }
}

fn zip_error(error: ZipError) -> ArchiveError {
    match error {
        ZipError::Io(source) => ArchiveError::Io(source),
        other => ArchiveError::Format(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use modmeta_common::test_support::ArchiveFixture;

    fn utf8(path: std::path::PathBuf) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(path).expect("utf-8 temp path")
    }

    #[test]
    fn reads_present_entry() {
        let fixture = ArchiveFixture::new().expect("fixture");
        let path = fixture
            .write_archive("demo.jar", &[("mcmod.info", b"[]")])
            .expect("archive");

        let mut handle = ZipArchiveReader.open(&utf8(path)).expect("open");
        let bytes = handle.read_entry("mcmod.info").expect("read");
        assert_eq!(bytes.as_deref(), Some(&b"[]"[..]));
    }

    #[test]
    fn absent_entry_is_not_an_error() {
        let fixture = ArchiveFixture::new().expect("fixture");
        let path = fixture
            .write_archive("demo.jar", &[("other.txt", b"x")])
            .expect("archive");

        let mut handle = ZipArchiveReader.open(&utf8(path)).expect("open");
        assert!(handle.read_entry("mcmod.info").expect("read").is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let fixture = ArchiveFixture::new().expect("fixture");
        let path = utf8(fixture.path().join("nope.jar"));
        let result = ZipArchiveReader.open(&path);
        assert!(matches!(result, Err(ArchiveError::Io(_))));
    }

    #[test]
    fn non_zip_file_is_format_error() {
        let fixture = ArchiveFixture::new().expect("fixture");
        let path = fixture
            .write_file("fake.jar", &[b'x'; 256])
            .expect("file");
        let result = ZipArchiveReader.open(&utf8(path));
        assert!(matches!(result, Err(ArchiveError::Format(_))));
    }
}
