//! Shared helpers for series shape invariants.

use geomag_types::GeomagError;

use super::series::TimeSeries;
use crate::iso8601;

/// Describe how `other` differs in shape from `reference`, if it does.
///
/// Shape is sample count, start time, end time, and sample rate. Sample
/// values are not compared.
#[must_use]
pub fn shape_mismatch(reference: &TimeSeries, other: &TimeSeries) -> Option<String> {
    if reference.len() != other.len() {
        return Some(format!(
            "sample count {} != {}",
            other.len(),
            reference.len()
        ));
    }
    if reference.start_time() != other.start_time() {
        return Some(format!(
            "start time {} != {}",
            iso8601::format(&other.start_time()),
            iso8601::format(&reference.start_time())
        ));
    }
    if reference.end_time() != other.end_time() {
        return Some(format!(
            "end time {} != {}",
            iso8601::format(&other.end_time()),
            iso8601::format(&reference.end_time())
        ));
    }
    if reference.sample_rate() != other.sample_rate() {
        return Some(format!(
            "sample rate {} != {}",
            other.sample_rate(),
            reference.sample_rate()
        ));
    }
    None
}

/// Ensure all series share the shape of the first one.
///
/// An empty slice is trivially uniform.
///
/// # Errors
/// Returns `Err(GeomagError::Data)` naming the first series (by position)
/// whose shape differs from `sources[0]`.
pub fn ensure_same_shape(sources: &[TimeSeries]) -> Result<(), GeomagError> {
    let Some((reference, rest)) = sources.split_first() else {
        return Ok(());
    };
    for (i, s) in rest.iter().enumerate() {
        if let Some(why) = shape_mismatch(reference, s) {
            return Err(GeomagError::data(format!(
                "series {} differs from series 0: {why}",
                i + 1
            )));
        }
    }
    Ok(())
}
