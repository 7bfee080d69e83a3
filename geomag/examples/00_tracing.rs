use std::sync::Arc;
use std::time::Duration;

use geomag::{Geomag, TimeseriesRequest, iso8601};
use geomag_mock::MockFactory;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=debug with `--features tracing`
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let geomag = Geomag::builder()
        .with_factory(Arc::new(MockFactory::new("edge").gaps(3, 0)))
        .with_factory(Arc::new(MockFactory::new("archive")))
        .factory_timeout(Duration::from_millis(100))
        .build()?;

    let start = iso8601::parse("2014-01-01T00:00:00Z").ok_or("bad start")?;
    let end = iso8601::parse("2014-01-01T00:30:00Z").ok_or("bad end")?;

    // Merged from both factories
    let req = TimeseriesRequest::new("BOU", "H", start, end)?;
    let _ = geomag.timeseries(&req).await?;

    // Every factory times out; each failure is logged, then collapsed
    let req = TimeseriesRequest::new("TIMEOUT", "H", start, end)?;
    if let Err(err) = geomag.timeseries(&req).await {
        println!("expected failure: {err}");
    }

    Ok(())
}
