use crate::Geomag;
use crate::core::tag_err;
use crate::router::util::{collapse_errors, join_with_deadline};
use geomag_core::{
    Attribution, GeomagError, MergeStrategy, TimeSeries, TimeseriesRequest,
    merge_with_attribution, shape_mismatch,
};

type FactoryResult = (&'static str, Result<TimeSeries, GeomagError>);
type NamedSeries = (&'static str, TimeSeries);
type CollectedSeries = (Vec<NamedSeries>, Vec<GeomagError>);

impl Geomag {
    /// Fetch a series from the registered factories and merge it.
    ///
    /// Behavior and trade-offs:
    /// - Factories are merged in registration order: a sample present in an
    ///   earlier factory's series is never replaced by a later one.
    /// - Merge behavior depends on [`MergeStrategy`]: `Deep` queries every
    ///   factory at once (most complete, most requests) while `Fallback` stops
    ///   as soon as no sample is absent.
    /// - Series whose shape differs from the first successful series are left out.
    ///
    /// # Errors
    /// Returns an error if no factory produced a series (see
    /// [`crate::collapse_errors`]) or the request deadline passed.
    pub async fn timeseries(&self, req: &TimeseriesRequest) -> Result<TimeSeries, GeomagError> {
        let (merged, _attr) = self.timeseries_with_attribution(req).await?;
        Ok(merged)
    }

    /// Fetch and merge a series, and report which factory supplied each run of
    /// samples.
    ///
    /// The [`Attribution`] lists inclusive index spans per factory, in index
    /// order. Absent samples in the merged series are not attributed.
    ///
    /// # Errors
    /// Returns `AllFactoriesTimedOut` if every factory timed out, `NotFound` if
    /// every factory reported the series missing, `AllFactoriesFailed` for any
    /// other combination of failures, and `RequestTimeout` when the overall
    /// deadline passes first.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "geomag::router::timeseries",
            skip(self, req),
            fields(series = %req.label(), strategy = ?self.cfg.merge_strategy),
        )
    )]
    pub async fn timeseries_with_attribution(
        &self,
        req: &TimeseriesRequest,
    ) -> Result<(TimeSeries, Attribution), GeomagError> {
        match self.cfg.merge_strategy {
            MergeStrategy::Fallback => {
                crate::core::with_request_deadline(
                    self.cfg.request_timeout,
                    self.sequential_timeseries(req),
                )
                .await?
            }
            _ => {
                let joined = self.parallel_timeseries(req).await?;
                Self::finalize_results(joined, req)
            }
        }
    }
}

impl Geomag {
    async fn parallel_timeseries(
        &self,
        req: &TimeseriesRequest,
    ) -> Result<Vec<FactoryResult>, GeomagError> {
        let timeout = self.cfg.factory_timeout;
        let tasks = self.factories.iter().map(|f| {
            let name = f.name();
            async move {
                let res = Self::factory_call_with_timeout(name, timeout, f.timeseries(req)).await;
                (name, res)
            }
        });
        join_with_deadline(tasks, self.cfg.request_timeout).await
    }

    async fn sequential_timeseries(
        &self,
        req: &TimeseriesRequest,
    ) -> Result<(TimeSeries, Attribution), GeomagError> {
        let mut accepted: Vec<NamedSeries> = Vec::new();
        let mut merged: Option<(TimeSeries, Attribution)> = None;
        let mut errors: Vec<GeomagError> = Vec::new();

        for f in &self.factories {
            let name = f.name();
            let res =
                Self::factory_call_with_timeout(name, self.cfg.factory_timeout, f.timeseries(req))
                    .await;
            match res {
                Ok(series) => {
                    if let Some((_, reference)) = accepted.first()
                        && Self::rejects_shape(name, reference, &series)
                    {
                        continue;
                    }
                    accepted.push((name, series));
                    let (series, attr) = merge_with_attribution(&accepted)?;
                    let complete = series.is_complete();
                    merged = Some((series, attr));
                    if complete {
                        break;
                    }
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(factory = name, error = %e, "factory failed");
                    errors.push(tag_err(name, e));
                }
            }
        }

        merged.ok_or_else(|| collapse_errors(errors, &req.label()))
    }

    fn collect_successes(joined: Vec<FactoryResult>) -> CollectedSeries {
        let mut successes: Vec<NamedSeries> = Vec::new();
        let mut errors: Vec<GeomagError> = Vec::new();

        for (name, res) in joined {
            match res {
                Ok(series) => {
                    if let Some((_, reference)) = successes.first()
                        && Self::rejects_shape(name, reference, &series)
                    {
                        continue;
                    }
                    successes.push((name, series));
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(factory = name, error = %e, "factory failed");
                    errors.push(tag_err(name, e));
                }
            }
        }
        (successes, errors)
    }

    fn finalize_results(
        joined: Vec<FactoryResult>,
        req: &TimeseriesRequest,
    ) -> Result<(TimeSeries, Attribution), GeomagError> {
        let (successes, errors) = Self::collect_successes(joined);
        if successes.is_empty() {
            return Err(collapse_errors(errors, &req.label()));
        }
        merge_with_attribution(&successes)
    }

    /// True when `series` cannot be merged with `reference` and must be skipped.
    fn rejects_shape(name: &'static str, reference: &TimeSeries, series: &TimeSeries) -> bool {
        let Some(reason) = shape_mismatch(reference, series) else {
            return false;
        };
        #[cfg(feature = "tracing")]
        tracing::warn!(factory = name, %reason, "dropping series with mismatched shape");
        #[cfg(not(feature = "tracing"))]
        let _ = (name, reason);
        true
    }
}
