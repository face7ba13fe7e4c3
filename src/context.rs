//! Per-archive resolution context.
//!
//! Every component that touches an archive receives the same
//! [`ArchiveContext`] instead of consulting shared maps keyed by filename. The
//! context is created fresh for each archive and dropped when its resolution
//! completes.

use camino::Utf8Path;

/// Identity of the archive being resolved and the strategy resolving it.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveContext<'a> {
    path: &'a Utf8Path,
    filename: &'a str,
    strategy: &'a str,
}

impl<'a> ArchiveContext<'a> {
    /// Create a context for the archive at `path`, resolved by `strategy`.
    ///
    /// The filename is the final path component, or the whole path when it
    /// has none.
    #[must_use]
    pub fn new(path: &'a Utf8Path, strategy: &'a str) -> Self {
        Self {
            path,
            filename: path.file_name().unwrap_or(path.as_str()),
            strategy,
        }
    }

    /// Full archive path, the classification lookup key.
    #[must_use]
    pub const fn path(&self) -> &'a Utf8Path {
        self.path
    }

    /// Archive filename, the output mapping key.
    #[must_use]
    pub const fn filename(&self) -> &'a str {
        self.filename
    }

    /// Label of the strategy in use, used as the diagnostics target.
    #[must_use]
    pub const fn strategy(&self) -> &'a str {
        self.strategy
    }
}
