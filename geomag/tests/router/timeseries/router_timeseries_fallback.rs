use geomag::{Geomag, GeomagError, MergeStrategy};

use crate::helpers::{Scripted, minutes, req, values};

#[tokio::test]
async fn fallback_stops_at_first_complete_series() {
    let a = Scripted::ok("a", minutes(&[Some(1), Some(2), Some(3)]));
    let b = Scripted::ok("b", minutes(&[Some(9), Some(9), Some(9)]));

    let geomag = Geomag::builder()
        .with_factory(a.clone())
        .with_factory(b.clone())
        .merge_strategy(MergeStrategy::Fallback)
        .build()
        .unwrap();

    let (merged, attr) = geomag.timeseries_with_attribution(&req(3)).await.unwrap();
    assert_eq!(values(&merged), vec![Some(1), Some(2), Some(3)]);
    assert_eq!(attr.samples_from("a"), 3);
    assert_eq!((a.calls(), b.calls()), (1, 0));
}

#[tokio::test]
async fn fallback_keeps_querying_while_samples_are_absent() {
    let a = Scripted::ok("a", minutes(&[Some(1), None, None]));
    let b = Scripted::ok("b", minutes(&[None, Some(2), None]));
    let c = Scripted::ok("c", minutes(&[Some(7), Some(7), Some(3)]));
    let d = Scripted::ok("d", minutes(&[Some(0), Some(0), Some(0)]));

    let geomag = Geomag::builder()
        .with_factory(a.clone())
        .with_factory(b.clone())
        .with_factory(c.clone())
        .with_factory(d.clone())
        .merge_strategy(MergeStrategy::Fallback)
        .build()
        .unwrap();

    let merged = geomag.timeseries(&req(3)).await.unwrap();
    assert_eq!(values(&merged), vec![Some(1), Some(2), Some(3)]);
    assert_eq!((a.calls(), b.calls(), c.calls(), d.calls()), (1, 1, 1, 0));
}

#[tokio::test]
async fn fallback_returns_partial_series_when_factories_run_out() {
    let a = Scripted::ok("a", minutes(&[Some(1), None, None]));
    let b = Scripted::err("b", GeomagError::not_found("BOU/H"));

    let geomag = Geomag::builder()
        .with_factory(a)
        .with_factory(b.clone())
        .merge_strategy(MergeStrategy::Fallback)
        .build()
        .unwrap();

    let merged = geomag.timeseries(&req(3)).await.unwrap();
    assert_eq!(values(&merged), vec![Some(1), None, None]);
    assert_eq!(b.calls(), 1);
}

#[tokio::test]
async fn fallback_moves_past_failures_and_shape_mismatches() {
    let a = Scripted::err("a", GeomagError::factory("a", "disk read failed"));
    let b = Scripted::ok("b", minutes(&[None, Some(2)]));
    let c = Scripted::ok("c", minutes(&[Some(5), Some(5), Some(5)]));
    let d = Scripted::ok("d", minutes(&[Some(1), None]));

    let geomag = Geomag::builder()
        .with_factory(a)
        .with_factory(b)
        .with_factory(c)
        .with_factory(d)
        .merge_strategy(MergeStrategy::Fallback)
        .build()
        .unwrap();

    let (merged, attr) = geomag.timeseries_with_attribution(&req(2)).await.unwrap();
    assert_eq!(values(&merged), vec![Some(1), Some(2)]);
    assert_eq!(attr.samples_from("c"), 0);
    assert_eq!(attr.samples_from("d"), 1);
}
