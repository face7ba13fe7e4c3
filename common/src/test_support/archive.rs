//! Temporary mod archive fixtures.
//!
//! Builds real zip archives inside a temporary directory so extraction code
//! is exercised against the same reader used in production.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// A temporary directory holding archive fixtures, removed on drop.
///
/// # Examples
///
/// ```
/// use modmeta_common::test_support::ArchiveFixture;
///
/// # fn demo() -> std::io::Result<()> {
/// let fixture = ArchiveFixture::new()?;
/// let path = fixture.write_archive("demo-1.0.jar", &[("mcmod.info", b"[]")])?;
/// assert!(path.exists());
/// # Ok(())
/// # }
/// # demo().expect("fixture");
/// ```
#[derive(Debug)]
pub struct ArchiveFixture {
    dir: TempDir,
}

impl ArchiveFixture {
    /// Create an empty fixture directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Root of the fixture directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a zip archive named `filename` containing `entries`.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be written.
    pub fn write_archive(&self, filename: &str, entries: &[(&str, &[u8])]) -> io::Result<PathBuf> {
        let path = self.dir.path().join(filename);
        let file = fs::File::create(&path)?;
        let mut writer = ZipWriter::new(file);
        for (name, contents) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .map_err(io::Error::other)?;
            writer.write_all(contents)?;
        }
        writer.finish().map_err(io::Error::other)?;
        Ok(path)
    }

    /// Write an arbitrary file, for example a corrupt archive.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_file(&self, filename: &str, contents: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.path().join(filename);
        fs::write(&path, contents)?;
        Ok(path)
    }
}
