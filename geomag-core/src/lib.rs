//! geomag-core
//!
//! Core types, traits, and arithmetic shared across the geomag workspace.
//!
//! - `timeseries`: the immutable [`TimeSeries`] value, the time/index
//!   conversions it is built on, and the priority merge.
//! - `factory`: the `TimeseriesFactory` trait implemented by data sources.
//! - `iso8601`: parsing and formatting of timestamps exchanged with factories.
//! - `types`: re-exports of errors and configuration from `geomag-types`.
//!
//! Time and index
//! --------------
//! Sample `i` of a series lies at `start + trunc(i * 1000 / rate)` milliseconds,
//! and a time maps to the nearest index by rounding. The truncate/round pair is
//! what makes exact lookups land back on the index they came from:
//!
//! ```
//! use geomag_core::{TimeSeries, iso8601};
//! use rust_decimal::Decimal;
//!
//! let start = iso8601::parse("2014-01-01T01:01:00Z").unwrap();
//! let end = iso8601::parse("2014-01-01T01:01:04Z").unwrap();
//! let samples = (0..5).map(|i| Some(Decimal::new(10 + i, 1))).collect();
//! let series = TimeSeries::new(start, end, samples).unwrap();
//!
//! let t = series.sample_time(1).unwrap();
//! assert_eq!(iso8601::format(&t), "2014-01-01T01:01:01.000Z");
//! assert_eq!(series.sample_index(t), Some(1));
//! assert_eq!(series.sample_index(iso8601::parse("2014-01-01T01:01:01.5Z").unwrap()), None);
//! ```
#![warn(missing_docs)]

/// Data source trait and request type.
pub mod factory;
/// ISO-8601 timestamp parsing and formatting.
pub mod iso8601;
/// Time series value, sampling arithmetic, and merge utilities.
pub mod timeseries;
pub mod types;

pub use factory::{TimeseriesFactory, TimeseriesRequest};
pub use timeseries::merge::{merge, merge_with_attribution};
pub use timeseries::sampling::{
    RATE_SECOND, compute_sample_index, compute_sample_rate, compute_sample_time, rate_minute,
};
pub use timeseries::series::TimeSeries;
pub use timeseries::util::{ensure_same_shape, shape_mismatch};
pub use types::*;
