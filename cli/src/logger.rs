//! Logging backend for the CLI.
//!
//! The engine reports through the `log` facade. A `tracing-subscriber`
//! formatter writing to stderr is installed as the global subscriber, and its
//! `log` bridge forwards those records to it.

use std::error::Error;

use log::LevelFilter;
use tracing_subscriber::filter::LevelFilter as SubscriberLevel;

/// Map a `log` threshold onto the subscriber's level filter.
#[must_use]
pub const fn subscriber_level(level: LevelFilter) -> SubscriberLevel {
    match level {
        LevelFilter::Off => SubscriberLevel::OFF,
        LevelFilter::Error => SubscriberLevel::ERROR,
        LevelFilter::Warn => SubscriberLevel::WARN,
        LevelFilter::Info => SubscriberLevel::INFO,
        LevelFilter::Debug => SubscriberLevel::DEBUG,
        LevelFilter::Trace => SubscriberLevel::TRACE,
    }
}

/// Install the stderr subscriber with `level` as the threshold.
///
/// # Errors
///
/// Returns an error if a global subscriber or `log` backend is already
/// installed.
pub fn install(level: LevelFilter) -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(subscriber_level(level))
        .without_time()
        .try_init()
}
