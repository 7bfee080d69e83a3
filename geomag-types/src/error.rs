use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the geomag workspace.
///
/// Missing data is never an error: absent samples, out-of-range lookups, and
/// off-grid lookups are reported as `None` by the core. This enum covers
/// invalid construction arguments, the degenerate rate derivation, data
/// inconsistencies, and failures reported by data factories.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeomagError {
    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with the returned or combined data (mismatched shapes, gaps, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// A sample rate could not be derived because the elapsed time does not
    /// support a finite, positive rate for the sample count.
    #[error("cannot derive sample rate for {count} samples over {elapsed_ms} ms")]
    DegenerateRate {
        /// Number of samples the rate was derived for.
        count: usize,
        /// Milliseconds between the first and last sample.
        elapsed_ms: i64,
    },

    /// The requested series could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing series, e.g. "BOU/H".
        what: String,
    },

    /// An individual factory returned an error (typically I/O).
    #[error("{factory} failed: {msg}")]
    Factory {
        /// Factory name that failed.
        factory: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An individual factory call exceeded the configured timeout.
    #[error("factory timed out: {factory}")]
    FactoryTimeout {
        /// Factory name that timed out.
        factory: String,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out")]
    RequestTimeout,

    /// Every attempted factory timed out.
    #[error("all factories timed out")]
    AllFactoriesTimedOut,

    /// All factories failed; contains the individual failures.
    #[error("all factories failed: {0:?}")]
    AllFactoriesFailed(Vec<GeomagError>),
}

impl GeomagError {
    /// Helper: build an `InvalidArg` error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Helper: build a `Data` error.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Helper: build a `Factory` error with the factory name and message.
    pub fn factory(factory: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Factory {
            factory: factory.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing series.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `FactoryTimeout` error.
    pub fn factory_timeout(factory: impl Into<String>) -> Self {
        Self::FactoryTimeout {
            factory: factory.into(),
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// A not-found series is benign; aggregates are classified based on their contents.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::NotFound { .. } => false,
            Self::AllFactoriesFailed(inner) => inner.iter().any(Self::is_actionable),
            _ => true,
        }
    }

    /// Flatten nested `AllFactoriesFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllFactoriesFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
