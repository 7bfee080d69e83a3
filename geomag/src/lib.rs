//! Geomag fetches a geomagnetic time series from several prioritised factories
//! and merges them into one.
//!
//! Overview
//! - Queries data sources that implement [`geomag_core::TimeseriesFactory`].
//! - Registration order is priority order: earlier factories win wherever they
//!   have a sample.
//! - Applies a per-factory timeout and an optional overall deadline.
//! - Reports which factory supplied each run of samples via [`Attribution`].
//!
//! Merge strategies
//! - `Deep`: query every factory concurrently and fill gaps from lower-priority
//!   factories; most complete series, most requests.
//! - `Fallback`: query factories one at a time and stop as soon as the merged
//!   series has no absent samples; fewer requests when the preferred factory is
//!   complete.
//!
//! Failures
//! - A factory whose series differs in shape (count, start, end, or rate) from
//!   the first successful one is left out of the merge.
//! - If no factory succeeds: all timed out gives `AllFactoriesTimedOut`; all
//!   reported the series missing gives `NotFound`; anything else gives
//!   `AllFactoriesFailed` with the individual errors.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use geomag::{Geomag, MergeStrategy, TimeseriesRequest, iso8601};
//! use geomag_mock::MockFactory;
//!
//! # async fn run() -> Result<(), geomag::GeomagError> {
//! let geomag = Geomag::builder()
//!     .with_factory(Arc::new(MockFactory::new("primary").gaps(5, 0)))
//!     .with_factory(Arc::new(MockFactory::new("backup")))
//!     .merge_strategy(MergeStrategy::Fallback)
//!     .build()?;
//!
//! let start = iso8601::parse("2014-01-01T00:00:00Z").unwrap();
//! let end = iso8601::parse("2014-01-01T01:00:00Z").unwrap();
//! let req = TimeseriesRequest::new("BOU", "H", start, end)?;
//! let (series, attribution) = geomag.timeseries_with_attribution(&req).await?;
//! println!("{series}: {} samples from backup", attribution.samples_from("backup"));
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use crate::core::{Geomag, GeomagBuilder};
pub use router::util::{collapse_errors, join_with_deadline};

pub use geomag_core::{
    Attribution, GeomagConfig, GeomagError, Interval, MergeStrategy, Span, TimeSeries,
    TimeseriesFactory, TimeseriesRequest, iso8601,
};
