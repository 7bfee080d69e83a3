//! Configuration types for the orchestrator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Strategy for combining series from multiple factories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MergeStrategy {
    /// Fetch from all factories concurrently and merge their data.
    /// This produces the most complete series by backfilling gaps from lower-priority factories.
    #[default]
    Deep,
    /// Query factories sequentially and stop as soon as the merged series has no
    /// absent samples. Fewer requests, same result whenever an early factory is complete.
    Fallback,
}

/// Global configuration for the `Geomag` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeomagConfig {
    /// Strategy for fetching and merging from multiple factories.
    pub merge_strategy: MergeStrategy,
    /// Timeout for individual factory requests.
    pub factory_timeout: Duration,
    /// Optional overall request timeout. When set, the whole fetch-and-merge
    /// operation is bounded by this deadline.
    pub request_timeout: Option<Duration>,
}

impl Default for GeomagConfig {
    fn default() -> Self {
        Self {
            merge_strategy: MergeStrategy::default(),
            factory_timeout: Duration::from_secs(5),
            request_timeout: None,
        }
    }
}
