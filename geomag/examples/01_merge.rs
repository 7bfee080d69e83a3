use std::sync::Arc;

use geomag::{Geomag, Interval, MergeStrategy, TimeseriesFactory, TimeseriesRequest, iso8601};
use geomag_mock::MockFactory;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Two factories with different gaps: the preferred one misses every
    //    fourth sample, the backup every seventh.
    let edge = Arc::new(MockFactory::new("edge").interval(Interval::Minute).gaps(4, 1));
    let archive = Arc::new(MockFactory::new("archive").interval(Interval::Minute).gaps(7, 0));

    // 2. Registration order is priority order.
    let geomag = Geomag::builder()
        .with_factory(edge.clone())
        .with_factory(archive.clone())
        .merge_strategy(MergeStrategy::Deep)
        .build()?;

    let start = iso8601::parse("2014-01-01T00:00:00Z").ok_or("bad start")?;
    let end = iso8601::parse("2014-01-01T00:29:00Z").ok_or("bad end")?;
    let req = TimeseriesRequest::new("BOU", "H", start, end)?;

    println!(
        "Fetching {} from [{}, {}]...",
        req.label(),
        edge.name(),
        archive.name()
    );

    // 3. Fetch with attribution to see which factory filled which samples.
    let (series, attribution) = geomag.timeseries_with_attribution(&req).await?;

    println!("\n## {series}");
    for (time, value) in series.iter().take(10) {
        match value {
            Some(v) => println!(" - {}: {v}", iso8601::format(&time)),
            None => println!(" - {}: (absent)", iso8601::format(&time)),
        }
    }
    if series.len() > 10 {
        println!("... and {} more", series.len() - 10);
    }
    println!("Absent samples: {}", series.missing_count());

    println!("\n## Data Attribution:");
    for (name, span) in &attribution.spans {
        println!(
            " - Factory '{}' provided samples {} to {}.",
            name, span.start, span.end
        );
    }

    Ok(())
}
