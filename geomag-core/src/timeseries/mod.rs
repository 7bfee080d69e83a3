//! Time-series utilities shared by factories and the orchestrator.
//!
//! Modules include:
//! - `sampling`: time/index/rate arithmetic
//! - `series`: the immutable `TimeSeries` value and its bounds-checked lookups
//! - `merge`: combine same-shaped series respecting priority
//! - `util`: shape checks the merge leaves to its callers
/// Static time/index/rate computations.
pub mod sampling;
/// The `TimeSeries` value type.
pub mod series;
/// Priority merge of same-shaped series.
pub mod merge;
/// Shape validation helpers.
pub mod util;
