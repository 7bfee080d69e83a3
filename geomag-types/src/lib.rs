//! Geomag-specific error, configuration, and attribution primitives shared by
//! the core arithmetic, data factories, and the orchestrator.
#![warn(missing_docs)]

mod attribution;
mod config;
mod error;
mod interval;

pub use attribution::{Attribution, Span};
pub use config::{GeomagConfig, MergeStrategy};
pub use error::GeomagError;
pub use interval::Interval;
