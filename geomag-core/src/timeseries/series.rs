use core::fmt;

use chrono::{DateTime, Utc};
use geomag_types::GeomagError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::sampling::{compute_sample_index, compute_sample_rate, compute_sample_time};
use crate::iso8601;

/// A sequence of samples collected at regular intervals.
///
/// Values are immutable once constructed: every operation that combines
/// series returns a new value. Absent samples are `None`, which keeps them
/// distinct from a measured zero through merges and comparisons.
///
/// Invariants upheld by every constructor (including deserialization):
/// - at least one sample;
/// - a strictly positive sample rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TimeSeriesRepr", into = "TimeSeriesRepr")]
pub struct TimeSeries {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    samples: Vec<Option<Decimal>>,
    sample_rate: Decimal,
}

// The series is never empty; `len` exists for sample counting only.
#[allow(clippy::len_without_is_empty)]
impl TimeSeries {
    /// Construct a series, deriving the rate from the sample count and the
    /// times of the first and last samples.
    ///
    /// # Errors
    /// - `InvalidArg` if `samples` is empty.
    /// - `DegenerateRate` if the elapsed time yields no finite positive rate
    ///   (for example a single sample, or `end` not after `start`).
    pub fn new(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        samples: Vec<Option<Decimal>>,
    ) -> Result<Self, GeomagError> {
        if samples.is_empty() {
            return Err(GeomagError::invalid_arg("time series requires at least one sample"));
        }
        let sample_rate = compute_sample_rate(samples.len(), start_time, end_time)?;
        if sample_rate <= Decimal::ZERO {
            return Err(GeomagError::DegenerateRate {
                count: samples.len(),
                elapsed_ms: (end_time - start_time).num_milliseconds(),
            });
        }
        Ok(Self::from_parts(start_time, end_time, samples, sample_rate))
    }

    /// Construct a series with an explicit sample rate in hertz.
    ///
    /// `end_time` is stored as given; it is not reconciled with the rate.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `samples` is empty or `sample_rate` is not positive.
    pub fn with_rate(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        samples: Vec<Option<Decimal>>,
        sample_rate: Decimal,
    ) -> Result<Self, GeomagError> {
        if samples.is_empty() {
            return Err(GeomagError::invalid_arg("time series requires at least one sample"));
        }
        if sample_rate <= Decimal::ZERO {
            return Err(GeomagError::invalid_arg(format!(
                "sample rate must be positive, got {sample_rate}"
            )));
        }
        Ok(Self::from_parts(start_time, end_time, samples, sample_rate))
    }

    /// Assemble a series whose invariants the caller already guarantees.
    pub(crate) const fn from_parts(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        samples: Vec<Option<Decimal>>,
        sample_rate: Decimal,
    ) -> Self {
        Self {
            start_time,
            end_time,
            samples,
            sample_rate,
        }
    }

    /// Time of the first sample.
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Time of the last sample.
    #[must_use]
    pub const fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// The samples, in time order.
    #[must_use]
    pub fn samples(&self) -> &[Option<Decimal>] {
        &self.samples
    }

    /// Sample rate in hertz.
    #[must_use]
    pub const fn sample_rate(&self) -> Decimal {
        self.sample_rate
    }

    /// Number of samples, present or absent.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Value of the sample at `index`; `None` when absent or out of range.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<Decimal> {
        self.samples.get(index).copied().flatten()
    }

    /// Number of absent samples.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_none()).count()
    }

    /// True when no sample is absent.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.samples.iter().all(Option::is_some)
    }

    /// Time of the sample at `index`, or `None` if `index` is out of range.
    #[must_use]
    pub fn sample_time(&self, index: i64) -> Option<DateTime<Utc>> {
        let in_range = usize::try_from(index).is_ok_and(|i| i < self.samples.len());
        in_range.then(|| compute_sample_time(index, self.start_time, self.sample_rate))
    }

    /// Index of the sample at exactly `time`.
    ///
    /// Equivalent to `sample_index_with(time, true)`.
    #[must_use]
    pub fn sample_index(&self, time: DateTime<Utc>) -> Option<usize> {
        self.sample_index_with(time, true)
    }

    /// Index of the sample for `time`.
    ///
    /// Returns `None` when `time` is before the first or after the last sample.
    /// With `exact`, `time` must be the exact time of the nearest sample
    /// (as produced by [`TimeSeries::sample_time`]); any sub-interval offset
    /// yields `None`. Without `exact`, the nearest index is returned as is; with
    /// an explicit rate that disagrees with `end_time` it may lie past the last
    /// sample.
    #[must_use]
    pub fn sample_index_with(&self, time: DateTime<Utc>, exact: bool) -> Option<usize> {
        if time < self.start_time || time > self.end_time {
            return None;
        }
        let index = compute_sample_index(time, self.start_time, self.sample_rate);
        if exact && self.sample_time(index)? != time {
            return None;
        }
        usize::try_from(index).ok()
    }

    /// Value of the sample at exactly `time`.
    ///
    /// Out-of-range times, off-grid times, and absent samples all yield `None`.
    #[must_use]
    pub fn value_at(&self, time: DateTime<Utc>) -> Option<Decimal> {
        self.sample_index(time).and_then(|i| self.value(i))
    }

    /// Iterate over `(time, value)` pairs in sample order.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, Option<Decimal>)> + '_ {
        (0_i64..).zip(&self.samples).map(|(i, v)| {
            (
                compute_sample_time(i, self.start_time, self.sample_rate),
                *v,
            )
        })
    }

    /// Concatenate `other` after this series.
    ///
    /// The result starts at this series' start, ends at `other`'s end, and keeps
    /// this series' rate.
    ///
    /// # Errors
    /// Returns `Data` if the rates differ or if `other` does not start exactly
    /// one sample interval after the last sample of this series.
    pub fn append(&self, other: &Self) -> Result<Self, GeomagError> {
        if self.sample_rate != other.sample_rate {
            return Err(GeomagError::data(format!(
                "cannot append, different rates ({} Hz vs {} Hz)",
                self.sample_rate, other.sample_rate
            )));
        }
        let next_index = i64::try_from(self.samples.len())
            .map_err(|_| GeomagError::invalid_arg("series too long to append"))?;
        let expected_start = compute_sample_time(next_index, self.start_time, self.sample_rate);
        if expected_start != other.start_time {
            return Err(GeomagError::data(format!(
                "cannot append, non-continuous series: expected start {}, got {}",
                iso8601::format(&expected_start),
                iso8601::format(&other.start_time)
            )));
        }
        let mut samples = Vec::with_capacity(self.samples.len() + other.samples.len());
        samples.extend_from_slice(&self.samples);
        samples.extend_from_slice(&other.samples);
        Ok(Self::from_parts(
            self.start_time,
            other.end_time,
            samples,
            self.sample_rate,
        ))
    }
}

impl fmt::Display for TimeSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TimeSeries {} samples at {} hertz ({} - {})",
            self.samples.len(),
            self.sample_rate.normalize(),
            iso8601::format(&self.start_time),
            iso8601::format(&self.end_time)
        )
    }
}

/// Wire shape of a series; converted through the validating constructor.
#[derive(Serialize, Deserialize)]
struct TimeSeriesRepr {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    samples: Vec<Option<Decimal>>,
    sample_rate: Decimal,
}

impl TryFrom<TimeSeriesRepr> for TimeSeries {
    type Error = GeomagError;

    fn try_from(r: TimeSeriesRepr) -> Result<Self, Self::Error> {
        Self::with_rate(r.start_time, r.end_time, r.samples, r.sample_rate)
    }
}

impl From<TimeSeries> for TimeSeriesRepr {
    fn from(s: TimeSeries) -> Self {
        Self {
            start_time: s.start_time,
            end_time: s.end_time,
            samples: s.samples,
            sample_rate: s.sample_rate,
        }
    }
}
