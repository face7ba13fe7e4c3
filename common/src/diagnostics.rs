//! Injected diagnostics capability.
//!
//! Resolution components report data-quality findings through a
//! [`Diagnostics`] handle supplied at construction rather than reaching for a
//! global logger. Production code uses [`LogDiagnostics`], which forwards to the
//! `log` facade; tests substitute a recording sink.

use log::Level;

/// Sink for diagnostic messages emitted while resolving archives.
///
/// Every message carries a `target` naming the component (typically the
/// strategy label) so output from different strategies can be told apart.
pub trait Diagnostics: Send + Sync {
    /// Record a single message at `level`.
    fn record(&self, target: &str, level: Level, message: &str);

    /// Record an error-level message.
    fn error(&self, target: &str, message: &str) {
        self.record(target, Level::Error, message);
    }

    /// Record a warning-level message.
    fn warn(&self, target: &str, message: &str) {
        self.record(target, Level::Warn, message);
    }

    /// Record an info-level message.
    fn info(&self, target: &str, message: &str) {
        self.record(target, Level::Info, message);
    }

    /// Record a debug-level message.
    fn debug(&self, target: &str, message: &str) {
        self.record(target, Level::Debug, message);
    }
}

/// Forwards diagnostics to the `log` facade.
///
/// # Examples
///
/// ```
/// use modmeta_common::{Diagnostics, LogDiagnostics};
///
/// let diagnostics = LogDiagnostics;
/// diagnostics.warn("forge-mod (1.7-1.12)", "no mcmod.info in demo.jar");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn record(&self, target: &str, level: Level, message: &str) {
        log::log!(target: target, level, "{message}");
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn record(&self, _target: &str, _level: Level, _message: &str) {}
}
