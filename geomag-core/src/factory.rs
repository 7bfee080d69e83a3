use async_trait::async_trait;
use chrono::{DateTime, Utc};
use geomag_types::GeomagError;

use crate::TimeSeries;
use crate::iso8601;

/// Parameters identifying one observatory component over a time range.
///
/// Validated on construction: identifiers are non-empty and `end` is not
/// before `start`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeseriesRequest {
    observatory: String,
    component: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeseriesRequest {
    /// Build a request for `component` of `observatory` from `start` to `end`,
    /// both inclusive (times of the first and last sample).
    ///
    /// # Errors
    /// Returns `InvalidArg` if an identifier is blank or `end < start`.
    pub fn new(
        observatory: impl Into<String>,
        component: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, GeomagError> {
        let observatory = observatory.into().trim().to_string();
        let component = component.into().trim().to_string();
        if observatory.is_empty() {
            return Err(GeomagError::invalid_arg("observatory must not be empty"));
        }
        if component.is_empty() {
            return Err(GeomagError::invalid_arg("component must not be empty"));
        }
        if end < start {
            return Err(GeomagError::invalid_arg(format!(
                "end {} is before start {}",
                iso8601::format(&end),
                iso8601::format(&start)
            )));
        }
        Ok(Self {
            observatory,
            component,
            start,
            end,
        })
    }

    /// Observatory code, e.g. "BOU".
    #[must_use]
    pub fn observatory(&self) -> &str {
        &self.observatory
    }

    /// Component (channel) code, e.g. "H".
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Time of the first requested sample.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Time of the last requested sample.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Short label for logs and not-found errors, e.g. "BOU/H".
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.observatory, self.component)
    }
}

/// A source of time series data (network service, file archive, database).
///
/// Implementations return ordinary immutable [`TimeSeries`] values; nothing
/// downstream depends on how the data was obtained.
#[async_trait]
pub trait TimeseriesFactory: Send + Sync {
    /// A stable identifier used in attribution and error messages.
    fn name(&self) -> &'static str;

    /// Fetch the series for the requested observatory component and range.
    ///
    /// Implementations should report missing samples as absent values rather
    /// than failing, return `NotFound` when the series does not exist at all,
    /// and `Factory` for transport or I/O failures.
    async fn timeseries(&self, req: &TimeseriesRequest) -> Result<TimeSeries, GeomagError>;
}
