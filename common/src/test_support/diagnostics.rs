//! Recording diagnostics sink for assertions.

use std::sync::{Mutex, PoisonError};

use log::Level;

use crate::diagnostics::Diagnostics;

/// A single captured diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMessage {
    /// Component target the message was emitted under.
    pub target: String,
    /// Severity.
    pub level: Level,
    /// Rendered message text.
    pub message: String,
}

/// Test sink that keeps every message for later inspection.
///
/// # Examples
///
/// ```
/// use log::Level;
/// use modmeta_common::Diagnostics;
/// use modmeta_common::test_support::RecordingDiagnostics;
///
/// let diagnostics = RecordingDiagnostics::default();
/// diagnostics.warn("demo", "missing entry");
/// assert!(diagnostics.contains(Level::Warn, "missing entry"));
/// ```
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    messages: Mutex<Vec<RecordedMessage>>,
}

impl RecordingDiagnostics {
    /// Snapshot of the recorded messages in emission order.
    #[must_use]
    pub fn messages(&self) -> Vec<RecordedMessage> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages recorded at exactly `level`.
    #[must_use]
    pub fn at_level(&self, level: Level) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|recorded| recorded.level == level)
            .map(|recorded| recorded.message)
            .collect()
    }

    /// Whether any message at `level` contains `needle`.
    #[must_use]
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.at_level(level)
            .iter()
            .any(|message| message.contains(needle))
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn record(&self, target: &str, level: Level, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedMessage {
                target: target.to_owned(),
                level,
                message: message.to_owned(),
            });
    }
}
