//! Re-export of foundational types from `geomag-types`.
// Consolidated re-exports so downstream crates can depend on `geomag-core` only

pub use geomag_types::{Attribution, GeomagConfig, GeomagError, Interval, MergeStrategy, Span};

pub use chrono::{DateTime, Utc};
pub use rust_decimal::Decimal;
