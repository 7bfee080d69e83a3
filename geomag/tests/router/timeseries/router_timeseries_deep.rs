use geomag::{Geomag, MergeStrategy};
use geomag_mock::MockFactory;
use std::sync::Arc;

use crate::helpers::{Scripted, minutes, req, values};

#[tokio::test]
async fn deep_fills_gaps_in_priority_order() {
    let a = Scripted::ok("a", minutes(&[None, None, None, Some(13), None]));
    let b = Scripted::ok("b", minutes(&[None, Some(21), None, Some(23), Some(24)]));
    let c = Scripted::ok("c", minutes(&[Some(30), None, None, Some(33), None]));

    let geomag = Geomag::builder()
        .with_factory(a.clone())
        .with_factory(b.clone())
        .with_factory(c.clone())
        .build()
        .unwrap();

    let merged = geomag.timeseries(&req(5)).await.unwrap();
    assert_eq!(values(&merged), vec![Some(30), Some(21), None, Some(13), Some(24)]);
    assert_eq!(merged.start_time(), minutes(&[None; 5]).start_time());
    assert_eq!((a.calls(), b.calls(), c.calls()), (1, 1, 1));
}

#[tokio::test]
async fn deep_queries_every_factory_even_when_first_is_complete() {
    let a = Scripted::ok("a", minutes(&[Some(1), Some(2), Some(3)]));
    let b = Scripted::ok("b", minutes(&[Some(9), Some(9), Some(9)]));

    let geomag = Geomag::builder()
        .with_factory(a.clone())
        .with_factory(b.clone())
        .merge_strategy(MergeStrategy::Deep)
        .build()
        .unwrap();

    let merged = geomag.timeseries(&req(3)).await.unwrap();
    assert_eq!(values(&merged), vec![Some(1), Some(2), Some(3)]);
    assert_eq!(b.calls(), 1);
}

#[tokio::test]
async fn deep_skips_failed_factories() {
    let a = Scripted::err("a", geomag::GeomagError::factory("a", "connection reset"));
    let b = Scripted::ok("b", minutes(&[Some(5), None]));

    let geomag = Geomag::builder()
        .with_factory(a)
        .with_factory(b)
        .build()
        .unwrap();

    let merged = geomag.timeseries(&req(2)).await.unwrap();
    assert_eq!(values(&merged), vec![Some(5), None]);
}

#[tokio::test]
async fn deep_drops_series_with_a_different_shape() {
    let a = Scripted::ok("a", minutes(&[None, Some(2), None]));
    // four samples: different count and end time
    let b = Scripted::ok("b", minutes(&[Some(7), Some(7), Some(7), Some(7)]));
    let c = Scripted::ok("c", minutes(&[Some(8), None, Some(8)]));

    let geomag = Geomag::builder()
        .with_factory(a)
        .with_factory(b)
        .with_factory(c)
        .build()
        .unwrap();

    let (merged, attr) = geomag.timeseries_with_attribution(&req(3)).await.unwrap();
    assert_eq!(values(&merged), vec![Some(8), Some(2), Some(8)]);
    assert_eq!(attr.samples_from("b"), 0);
}

#[tokio::test]
async fn deep_merges_mock_factories_with_complementary_gaps() {
    let primary = Arc::new(MockFactory::new("primary").gaps(2, 0));
    let backup = Arc::new(MockFactory::new("backup").gaps(2, 1));

    let geomag = Geomag::builder()
        .with_factory(primary)
        .with_factory(backup)
        .build()
        .unwrap();

    let (merged, attr) = geomag.timeseries_with_attribution(&req(60)).await.unwrap();
    assert!(merged.is_complete());
    assert_eq!(merged.len(), 60);
    assert_eq!(attr.samples_from("primary"), 30);
    assert_eq!(attr.samples_from("backup"), 30);
}
