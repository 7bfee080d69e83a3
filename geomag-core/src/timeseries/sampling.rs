use chrono::{DateTime, TimeDelta, Utc};
use geomag_types::{GeomagError, Interval};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// One sample per second.
pub const RATE_SECOND: Decimal = Decimal::ONE;

/// One sample per minute (`1 / 60` Hz).
#[must_use]
pub fn rate_minute() -> Decimal {
    Interval::Minute.sample_rate()
}

/// Nearest binary64 value of a decimal rate.
///
/// `Decimal::to_f64` scales the mantissa by an inexact power of ten and can land
/// one ulp away; parsing the canonical text rounds exactly once.
fn rate_as_f64(rate: Decimal) -> f64 {
    // `Display` always emits a plain decimal literal, which `f64` parses.
    rate.to_string()
        .parse()
        .ok()
        .or_else(|| rate.to_f64())
        .unwrap_or_default()
}

/// Compute the time of a sample index.
///
/// The offset is computed in floating-point milliseconds and truncated toward
/// zero (negative offsets included) before it is added to `start`. Index
/// lookup rounds instead; exact lookups rely on that pairing.
///
/// Offsets beyond the representable range saturate at the chrono limits.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn compute_sample_time(index: i64, start: DateTime<Utc>, rate: Decimal) -> DateTime<Utc> {
    let offset_ms = (index as f64 * 1000.0 / rate_as_f64(rate)) as i64;
    TimeDelta::try_milliseconds(offset_ms)
        .and_then(|delta| start.checked_add_signed(delta))
        .unwrap_or(if offset_ms < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

/// Compute the index of the sample nearest to `time`.
///
/// Rounds half away from zero. The result may be negative or beyond the end of
/// any particular series; bounds are the caller's concern.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn compute_sample_index(time: DateTime<Utc>, start: DateTime<Utc>, rate: Decimal) -> i64 {
    let offset_ms = (time - start).num_milliseconds();
    (offset_ms as f64 * rate_as_f64(rate) / 1000.0).round() as i64
}

/// Compute the sample rate in hertz of `count` samples spanning `start..=end`.
///
/// The division is carried out in `Decimal` so long series at sub-second rates
/// do not accumulate binary floating-point error.
///
/// # Errors
/// Returns `GeomagError::DegenerateRate` when no finite rate exists: zero
/// elapsed time, or `count == 0`. The sign of the result is not checked here.
pub fn compute_sample_rate(
    count: usize,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Decimal, GeomagError> {
    let elapsed_ms = (end - start).num_milliseconds();
    let degenerate = || GeomagError::DegenerateRate { count, elapsed_ms };
    let intervals = count.checked_sub(1).ok_or_else(degenerate)?;
    let seconds = Decimal::new(elapsed_ms, 3);
    Decimal::from(intervals as u64)
        .checked_div(seconds)
        .ok_or_else(degenerate)
}
