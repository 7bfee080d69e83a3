use geomag_types::{Attribution, GeomagError};
use rust_decimal::Decimal;

use super::series::TimeSeries;

/// First present value at `index`, with the rank of the source that held it.
fn first_present<'a, I>(sources: I, index: usize) -> Option<(usize, Decimal)>
where
    I: IntoIterator<Item = &'a TimeSeries>,
{
    sources
        .into_iter()
        .enumerate()
        .find_map(|(rank, s)| s.value(index).map(|v| (rank, v)))
}

/// Merge same-shaped series in priority order (first is highest).
///
/// - Each sample takes the first present value found across sources.
/// - A sample absent in every source stays absent.
/// - The result has the start, end, and rate of `sources[0]` and its length.
///
/// Sources are expected to share sample count, start, end, and rate; this is
/// not checked (see [`crate::ensure_same_shape`]). A source shorter than the
/// first reads as absent past its end.
///
/// # Errors
/// Returns `Err(GeomagError::InvalidArg)` if `sources` is empty.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "geomag_core::merge",
        skip(sources),
        fields(sources = sources.len()),
    )
)]
pub fn merge(sources: &[TimeSeries]) -> Result<TimeSeries, GeomagError> {
    let first = sources
        .first()
        .ok_or_else(|| GeomagError::invalid_arg("cannot merge an empty list of series"))?;
    let merged = (0..first.len())
        .map(|index| first_present(sources, index).map(|(_, v)| v))
        .collect();
    Ok(TimeSeries::from_parts(
        first.start_time(),
        first.end_time(),
        merged,
        first.sample_rate(),
    ))
}

/// Merge named series in priority order and record which source supplied
/// each run of samples.
///
/// Produces the same series as [`merge`] over the unnamed sources.
///
/// # Errors
/// Returns `Err(GeomagError::InvalidArg)` if `sources` is empty.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "geomag_core::merge_with_attribution",
        skip(sources),
        fields(sources = sources.len()),
    )
)]
pub fn merge_with_attribution(
    sources: &[(&'static str, TimeSeries)],
) -> Result<(TimeSeries, Attribution), GeomagError> {
    let (_, first) = sources
        .first()
        .ok_or_else(|| GeomagError::invalid_arg("cannot merge an empty list of series"))?;
    let mut attribution = Attribution::new();
    let merged = (0..first.len())
        .map(|index| {
            first_present(sources.iter().map(|(_, s)| s), index).map(|(rank, v)| {
                attribution.record(sources[rank].0, index);
                v
            })
        })
        .collect();
    let series = TimeSeries::from_parts(
        first.start_time(),
        first.end_time(),
        merged,
        first.sample_rate(),
    );
    Ok((series, attribution))
}
