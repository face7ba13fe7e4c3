//! Ordered strategy registry and selection.

use modmeta_common::{Diagnostics, PlatformVersion};

use super::{StrategyDescriptor, forge};
use crate::error::{ResolveError, Result};

const TARGET: &str = "modmeta::strategy";

/// Strategies in registration order.
#[derive(Debug, Clone, Default)]
pub struct StrategyRegistry {
    strategies: Vec<StrategyDescriptor>,
}

impl StrategyRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in Forge strategies.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new().register(forge::LEGACY).register(forge::MODERN)
    }

    /// Append `descriptor`. Earlier registrations take precedence.
    #[must_use]
    pub fn register(mut self, descriptor: StrategyDescriptor) -> Self {
        self.strategies.push(descriptor);
        self
    }

    /// Registered strategies in order.
    #[must_use]
    pub fn strategies(&self) -> &[StrategyDescriptor] {
        &self.strategies
    }

    /// Pairs of registered strategies whose platform ranges overlap, by label.
    #[must_use]
    pub fn overlapping(&self) -> Vec<(&'static str, &'static str)> {
        self.strategies
            .iter()
            .enumerate()
            .flat_map(|(index, first)| {
                self.strategies
                    .iter()
                    .skip(index + 1)
                    .filter(|second| first.range().overlaps(&second.range()))
                    .map(|second| (first.label(), second.label()))
            })
            .collect()
    }

    /// Select the first strategy accepting `platform` and `library`.
    ///
    /// Ranges are expected not to overlap. When they do, the first registered
    /// match wins and the ambiguity is reported as a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoStrategyFound`] when no strategy accepts the
    /// versions.
    ///
    /// # Examples
    ///
    /// ```
    /// use modmeta::strategy::StrategyRegistry;
    /// use modmeta_common::{NoopDiagnostics, PlatformVersion};
    ///
    /// let registry = StrategyRegistry::builtin();
    /// let platform: PlatformVersion = "1.12.2".parse().expect("valid version");
    /// let strategy = registry
    ///     .select(&platform, "14.23.5.2860", &NoopDiagnostics)
    ///     .expect("1.12 is supported");
    /// assert_eq!(strategy.entry(), "mcmod.info");
    /// ```
    pub fn select(
        &self,
        platform: &PlatformVersion,
        library: &str,
        diagnostics: &dyn Diagnostics,
    ) -> Result<&StrategyDescriptor> {
        let mut matches = self
            .strategies
            .iter()
            .filter(|strategy| strategy.accepts(platform, library));

        let selected = matches.next().ok_or_else(|| ResolveError::NoStrategyFound {
            platform: *platform,
            library: library.to_owned(),
        })?;

        for shadowed in matches {
            diagnostics.warn(
                TARGET,
                &format!(
                    "strategies {} and {} both accept platform {platform}; using {}",
                    selected.label(),
                    shadowed.label(),
                    selected.label()
                ),
            );
        }

        Ok(selected)
    }
}
