use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::GeomagError;

/// Nominal sampling interval of an observatory data product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Interval {
    /// One sample per second.
    Second,
    /// One sample per minute.
    #[default]
    Minute,
    /// One sample per hour.
    Hour,
    /// One sample per day.
    Day,
}

impl Interval {
    /// Stable, lowercase identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }

    /// Seconds between consecutive samples.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 3_600,
            Self::Day => 86_400,
        }
    }

    /// Time between consecutive samples.
    #[must_use]
    pub const fn step(self) -> Duration {
        Duration::from_secs(self.seconds().unsigned_abs())
    }

    /// Sample rate in hertz (`1 / seconds`).
    #[must_use]
    pub fn sample_rate(self) -> Decimal {
        Decimal::ONE / Decimal::from(self.seconds())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = GeomagError;

    /// Accepts the identifiers produced by [`Interval::as_str`] as well as the
    /// adjective forms used by observatory data products ("hourly", "daily").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "second" => Ok(Self::Second),
            "minute" => Ok(Self::Minute),
            "hour" | "hourly" => Ok(Self::Hour),
            "day" | "daily" => Ok(Self::Day),
            other => Err(GeomagError::invalid_arg(format!(
                "unknown interval: {other}"
            ))),
        }
    }
}
