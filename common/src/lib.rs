//! Shared leaf utilities for the modmeta workspace: platform version ranges,
//! metadata text helpers, and the injected diagnostics capability.

pub mod diagnostics;
pub mod text;
pub mod version;

#[cfg(feature = "test-support")]
pub mod test_support;

pub use diagnostics::{Diagnostics, LogDiagnostics, NoopDiagnostics};
pub use text::{capitalize, discern, is_blank, is_malformed_version};
pub use version::{PlatformVersion, VersionParseError, VersionRange};
