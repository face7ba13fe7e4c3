//! Shared test helpers for modmeta crates.
//!
//! The helpers in this module are intended for use from unit and integration
//! tests so archive fixtures and diagnostic capture live in one place.

pub mod archive;
pub mod diagnostics;

pub use archive::ArchiveFixture;
pub use diagnostics::{RecordedMessage, RecordingDiagnostics};
