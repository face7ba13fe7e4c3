//! Command-line front end for the modmeta resolution engine.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Error type wrapping every failure the binary reports
//! - [`logger`] - stderr `tracing-subscriber` backend for the `log` facade
//! - [`run`] - Scan orchestration from parsed arguments to written manifest

pub mod cli;
pub mod error;
pub mod logger;
pub mod run;
