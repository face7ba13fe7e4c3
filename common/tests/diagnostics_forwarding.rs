//! Verifies that `LogDiagnostics` reaches the `log` facade with the caller's
//! target and level intact, and that the recording sink keeps emission order.

use log::Level;
use logtest::Logger;
use modmeta_common::test_support::RecordingDiagnostics;
use modmeta_common::{Diagnostics, LogDiagnostics, NoopDiagnostics};

#[test]
fn log_diagnostics_forwards_target_and_level() {
    let mut logger = Logger::start();
    LogDiagnostics.error("forge-mod (1.7-1.12)", "demo.jar contains an invalid mcmod.info file");

    let mut found = false;
    while let Some(record) = logger.pop() {
        if record.args().to_string().contains("invalid mcmod.info") {
            assert_eq!(record.level(), Level::Error);
            assert_eq!(record.target(), "forge-mod (1.7-1.12)");
            found = true;
        }
    }
    assert!(found, "expected forwarded error record");
}

#[test]
fn recording_diagnostics_keeps_order_and_targets() {
    let diagnostics = RecordingDiagnostics::default();
    diagnostics.warn("a", "first");
    diagnostics.info("b", "second");
    diagnostics.debug("a", "third");

    let messages = diagnostics.messages();
    let summary: Vec<(&str, Level, &str)> = messages
        .iter()
        .map(|m| (m.target.as_str(), m.level, m.message.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("a", Level::Warn, "first"),
            ("b", Level::Info, "second"),
            ("a", Level::Debug, "third"),
        ]
    );
    assert_eq!(diagnostics.at_level(Level::Info), vec!["second".to_owned()]);
}

#[test]
fn noop_diagnostics_accepts_everything() {
    let sink: &dyn Diagnostics = &NoopDiagnostics;
    sink.error("x", "ignored");
}
