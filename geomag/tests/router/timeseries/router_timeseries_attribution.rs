use geomag::{Geomag, Span};

use crate::helpers::{Scripted, minutes, req};

#[tokio::test]
async fn attribution_lists_runs_in_index_order() {
    let a = Scripted::ok("a", minutes(&[Some(1), Some(1), None, None, Some(1), None]));
    let b = Scripted::ok("b", minutes(&[None, Some(2), Some(2), Some(2), None, None]));

    let geomag = Geomag::builder()
        .with_factory(a)
        .with_factory(b)
        .build()
        .unwrap();

    let (merged, attr) = geomag.timeseries_with_attribution(&req(6)).await.unwrap();
    assert_eq!(merged.missing_count(), 1);
    assert_eq!(
        attr.spans,
        vec![
            ("a", Span { start: 0, end: 1 }),
            ("b", Span { start: 2, end: 3 }),
            ("a", Span { start: 4, end: 4 }),
        ]
    );
}

#[tokio::test]
async fn plain_timeseries_matches_attributed_series() {
    let geomag = Geomag::builder()
        .with_factory(Scripted::ok("a", minutes(&[None, Some(4), None])))
        .with_factory(Scripted::ok("b", minutes(&[Some(3), Some(3), None])))
        .build()
        .unwrap();

    let plain = geomag.timeseries(&req(3)).await.unwrap();
    let (attributed, _) = geomag.timeseries_with_attribution(&req(3)).await.unwrap();
    assert_eq!(plain, attributed);
}
