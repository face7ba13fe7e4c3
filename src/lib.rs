//! Metadata resolution for mod distribution manifests.
//!
//! For each packaged mod archive the engine determines a canonical
//! identifier, display name, and version by reconciling three partially
//! reliable sources: metadata embedded in the archive, precomputed static
//! analysis results, and inference from the filename.
//!
//! # Modules
//!
//! - [`strategy`]: version-specific extraction strategies and selection.
//! - [`extractor`]: reads the strategy's metadata entry from an archive.
//! - [`classification`]: static-analysis results and their lookup adapter.
//! - [`inference`]: filename-only fallback inference.
//! - [`reconciler`]: precedence-based merge into a [`ModuleRecord`].
//! - [`identifier`]: canonical identifier composition.
//! - [`resolver`]: the per-archive pipeline.
//! - [`scan`]: batch resolution with optional parallelism and cancellation.
//! - [`manifest`]: deterministic distribution manifest output.
//! - [`config`]: scan configuration loaded from TOML.
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use modmeta::classification::ClassificationMap;
//! use modmeta::config::ScanConfig;
//! use modmeta::resolver::{ArchiveResolver, Target};
//! use modmeta::{StrategyRegistry, ZipArchiveReader};
//! use modmeta_common::LogDiagnostics;
//!
//! let registry = StrategyRegistry::builtin();
//! let classifications = ClassificationMap::default();
//! let config = ScanConfig::default();
//! let resolver = ArchiveResolver::new(
//!     &registry,
//!     &ZipArchiveReader,
//!     &classifications,
//!     &config,
//!     &LogDiagnostics,
//! );
//! let target = Target::new("1.12.2".parse().expect("valid version"), "14.23.5.2860");
//! let resolved = resolver
//!     .resolve(Utf8Path::new("mods/jei_1.12.2-4.16.1.302.jar"), &target)
//!     .expect("resolvable archive");
//! println!("{}", resolved.identifier());
//! ```

pub mod archive;
pub mod classification;
pub mod config;
pub mod context;
pub mod error;
pub mod extractor;
pub mod identifier;
pub mod inference;
pub mod manifest;
pub mod metadata;
pub mod reconciler;
pub mod record;
pub mod resolver;
pub mod scan;
pub mod strategy;

pub use archive::{ArchiveReader, ZipArchiveReader};
pub use config::{MissingStrategyPolicy, ScanConfig};
pub use error::{ResolveError, Result};
pub use record::ModuleRecord;
pub use resolver::{ArchiveResolver, ResolvedArchive, Target};
pub use scan::{BatchScanner, CancellationToken, ScanReport};
pub use strategy::StrategyRegistry;
