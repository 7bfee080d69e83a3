use std::sync::Arc;

use geomag_core::{GeomagConfig, GeomagError, MergeStrategy, TimeseriesFactory};

/// Orchestrator that fetches series from registered factories and merges them.
pub struct Geomag {
    pub(crate) factories: Vec<Arc<dyn TimeseriesFactory>>,
    pub(crate) cfg: GeomagConfig,
}

/// Builder for constructing a `Geomag` orchestrator with custom configuration.
pub struct GeomagBuilder {
    factories: Vec<Arc<dyn TimeseriesFactory>>,
    cfg: GeomagConfig,
}

impl Default for GeomagBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeomagBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Starts with no factories; register at least one via [`Self::with_factory`].
    /// Defaults: deep merge, 5s factory timeout, no overall deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: vec![],
            cfg: GeomagConfig::default(),
        }
    }

    /// Register a factory.
    ///
    /// Registration order is merge priority: the first factory registered is
    /// preferred wherever it has a sample. Duplicates are not removed.
    #[must_use]
    pub fn with_factory(mut self, f: Arc<dyn TimeseriesFactory>) -> Self {
        self.factories.push(f);
        self
    }

    /// Replace the whole configuration, e.g. one loaded with serde.
    #[must_use]
    pub fn config(mut self, cfg: GeomagConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Select how series from several factories are fetched and merged.
    ///
    /// - `Deep`: query all factories concurrently and backfill gaps.
    /// - `Fallback`: query in priority order until the merged series is complete.
    #[must_use]
    pub const fn merge_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.cfg.merge_strategy = strategy;
        self
    }

    /// Set the per-factory request timeout.
    ///
    /// A factory that does not answer in time counts as failed with
    /// `FactoryTimeout`; the others are still merged.
    #[must_use]
    pub const fn factory_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.factory_timeout = timeout;
        self
    }

    /// Set an overall deadline for fetching and merging.
    ///
    /// Bounds total latency even when factories time out one after another in
    /// `Fallback` mode. When exceeded, returns `RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Build the `Geomag` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no factory has been registered via [`Self::with_factory`].
    pub fn build(self) -> Result<Geomag, GeomagError> {
        if self.factories.is_empty() {
            return Err(GeomagError::invalid_arg(
                "no factories registered; add at least one via with_factory(...)",
            ));
        }
        Ok(Geomag {
            factories: self.factories,
            cfg: self.cfg,
        })
    }
}

/// Attach the factory name to errors that do not already carry one.
pub(crate) fn tag_err(factory: &str, e: GeomagError) -> GeomagError {
    match e {
        e @ (GeomagError::NotFound { .. }
        | GeomagError::FactoryTimeout { .. }
        | GeomagError::Factory { .. }
        | GeomagError::RequestTimeout
        | GeomagError::AllFactoriesTimedOut
        | GeomagError::AllFactoriesFailed(_)) => e,
        other => GeomagError::Factory {
            factory: factory.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Run `fut` under an optional overall deadline.
///
/// # Errors
/// Returns `RequestTimeout` when the deadline passes first.
pub(crate) async fn with_request_deadline<T, Fut>(
    deadline: Option<std::time::Duration>,
    fut: Fut,
) -> Result<T, GeomagError>
where
    Fut: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| GeomagError::RequestTimeout),
        None => Ok(fut.await),
    }
}

impl Geomag {
    /// Start building a new `Geomag` instance.
    ///
    /// ```rust,ignore
    /// let geomag = geomag::Geomag::builder()
    ///     .with_factory(edge.clone())
    ///     .with_factory(archive.clone())
    ///     .merge_strategy(geomag::MergeStrategy::Deep)
    ///     .factory_timeout(std::time::Duration::from_secs(2))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> GeomagBuilder {
        GeomagBuilder::new()
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &GeomagConfig {
        &self.cfg
    }

    /// Wrap a factory future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "geomag::core::factory_call_with_timeout",
            skip(fut),
            fields(
                factory = factory_name,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn factory_call_with_timeout<T, Fut>(
        factory_name: &'static str,
        timeout: std::time::Duration,
        fut: Fut,
    ) -> Result<T, GeomagError>
    where
        Fut: core::future::Future<Output = Result<T, GeomagError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(GeomagError::factory_timeout(factory_name)))
    }
}
