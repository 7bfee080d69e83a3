//! Deterministic `TimeseriesFactory` for tests and examples.
//!
//! Generated data depends only on the request and the factory's settings, so
//! the same request always yields the same series. A few reserved observatory
//! codes simulate failure modes:
//!
//! - `"FAIL"`: returns a `Factory` error.
//! - `"TIMEOUT"`: sleeps for [`TIMEOUT_DELAY`] before answering.
//! - `"MISSING"`: returns `NotFound`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use geomag_core::{
    GeomagError, Interval, TimeSeries, TimeseriesFactory, TimeseriesRequest, compute_sample_index,
    compute_sample_time,
};
use rust_decimal::Decimal;

/// Delay applied to requests for the `"TIMEOUT"` observatory.
pub const TIMEOUT_DELAY: Duration = Duration::from_millis(200);

/// Mock factory producing regularly sampled synthetic data.
pub struct MockFactory {
    name: &'static str,
    interval: Interval,
    gaps: Option<(usize, usize)>,
    latency: Option<Duration>,
    fixtures: HashMap<(String, String), TimeSeries>,
    calls: AtomicUsize,
}

impl Default for MockFactory {
    fn default() -> Self {
        Self::new("geomag-mock")
    }
}

impl MockFactory {
    /// Create a factory named `name` producing gap-free minute data.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            interval: Interval::Minute,
            gaps: None,
            latency: None,
            fixtures: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Sampling interval of generated series.
    #[must_use]
    pub const fn interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Leave every `every`-th generated sample absent, starting at index
    /// `phase`. `every == 0` disables gaps.
    #[must_use]
    pub const fn gaps(mut self, every: usize, phase: usize) -> Self {
        self.gaps = if every == 0 {
            None
        } else {
            Some((every, phase % every))
        };
        self
    }

    /// Delay every answer by `latency`.
    #[must_use]
    pub const fn latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Serve `series` verbatim for `observatory`/`component`, whatever range is
    /// requested.
    #[must_use]
    pub fn with_fixture(
        mut self,
        observatory: impl Into<String>,
        component: impl Into<String>,
        series: TimeSeries,
    ) -> Self {
        self.fixtures
            .insert((observatory.into(), component.into()), series);
        self
    }

    /// Number of `timeseries` calls served so far, failures included.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn is_gap(&self, index: usize) -> bool {
        self.gaps
            .is_some_and(|(every, phase)| index % every == phase)
    }

    fn generate(&self, req: &TimeseriesRequest) -> Result<TimeSeries, GeomagError> {
        let rate = self.interval.sample_rate();
        let last = compute_sample_index(req.end(), req.start(), rate);
        // The request end may fall between samples; stop at the last one
        // not after it.
        let last = if compute_sample_time(last, req.start(), rate) > req.end() {
            last - 1
        } else {
            last
        };
        let count = usize::try_from(last + 1)
            .map_err(|_| GeomagError::invalid_arg("request range is too short"))?;
        let end = compute_sample_time(last, req.start(), rate);
        let base = baseline(req.component());
        let samples = (0..count)
            .map(|i| (!self.is_gap(i)).then(|| base + wobble(i)))
            .collect();
        TimeSeries::with_rate(req.start(), end, samples, rate)
    }
}

/// Typical magnitude of a geomagnetic component, in nT (degrees for `D`).
fn baseline(component: &str) -> Decimal {
    match component {
        "H" | "X" => Decimal::from(20_000),
        "D" => Decimal::new(105, 1),
        "Y" => Decimal::from(3_700),
        "Z" => Decimal::from(47_000),
        "F" => Decimal::from(52_000),
        _ => Decimal::ZERO,
    }
}

/// Small deterministic variation: a sawtooth in tenths.
fn wobble(index: usize) -> Decimal {
    Decimal::new(i64::try_from(index % 97).unwrap_or_default(), 1)
}

#[async_trait]
impl TimeseriesFactory for MockFactory {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn timeseries(&self, req: &TimeseriesRequest) -> Result<TimeSeries, GeomagError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match req.observatory() {
            "FAIL" => {
                return Err(GeomagError::factory(
                    self.name,
                    format!("forced failure: {}", req.label()),
                ));
            }
            "TIMEOUT" => tokio::time::sleep(TIMEOUT_DELAY).await,
            "MISSING" => return Err(GeomagError::not_found(req.label())),
            _ => {}
        }
        let key = (req.observatory().to_string(), req.component().to_string());
        if let Some(series) = self.fixtures.get(&key) {
            return Ok(series.clone());
        }
        self.generate(req)
    }
}
