//! Attribution types for merged series.

/// A continuous run of sample indices [start..=end] that a source contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Inclusive first sample index.
    pub start: usize,
    /// Inclusive last sample index.
    pub end: usize,
}

/// Attribution of a merged series: which source supplied which index spans.
///
/// Spans are recorded in index order. Indices that were absent in every
/// source belong to no span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribution {
    /// Collected spans annotated by source name.
    pub spans: Vec<(&'static str, Span)>, // (source_name, span)
}

impl Attribution {
    /// Create an empty attribution.
    #[must_use]
    pub const fn new() -> Self {
        Self { spans: vec![] }
    }

    /// Record that `source` supplied sample `index`.
    ///
    /// Extends the last span when it belongs to the same source and ends at
    /// `index - 1`; otherwise opens a new span.
    pub fn record(&mut self, source: &'static str, index: usize) {
        if let Some((name, span)) = self.spans.last_mut()
            && *name == source
            && span.end + 1 == index
        {
            span.end = index;
            return;
        }
        self.spans.push((
            source,
            Span {
                start: index,
                end: index,
            },
        ));
    }

    /// Number of samples attributed to `source`.
    #[must_use]
    pub fn samples_from(&self, source: &str) -> usize {
        self.spans
            .iter()
            .filter(|(name, _)| *name == source)
            .map(|(_, s)| s.end - s.start + 1)
            .sum()
    }
}
