use std::sync::Arc;
use std::time::Duration;

use geomag::{Geomag, GeomagError, MergeStrategy};
use geomag_mock::MockFactory;

use crate::helpers::{Scripted, minutes, req, req_for, values};

#[tokio::test]
async fn all_timeouts_collapse_to_all_timed_out() {
    for strategy in [MergeStrategy::Deep, MergeStrategy::Fallback] {
        let geomag = Geomag::builder()
            .with_factory(Arc::new(MockFactory::new("a")))
            .with_factory(Arc::new(MockFactory::new("b")))
            .merge_strategy(strategy)
            .factory_timeout(Duration::from_millis(20))
            .build()
            .unwrap();
        let err = geomag
            .timeseries(&req_for("TIMEOUT", 5))
            .await
            .unwrap_err();
        assert_eq!(err, GeomagError::AllFactoriesTimedOut, "{strategy:?}");
    }
}

#[tokio::test]
async fn slow_factory_is_left_out_of_deep_merge() {
    let slow = Scripted::slow("slow", minutes(&[Some(1), Some(1)]), Duration::from_millis(300));
    let fast = Scripted::ok("fast", minutes(&[Some(2), None]));

    let geomag = Geomag::builder()
        .with_factory(slow)
        .with_factory(fast)
        .factory_timeout(Duration::from_millis(30))
        .build()
        .unwrap();

    let (merged, attr) = geomag.timeseries_with_attribution(&req(2)).await.unwrap();
    assert_eq!(values(&merged), vec![Some(2), None]);
    assert_eq!(attr.samples_from("slow"), 0);
}

#[tokio::test]
async fn request_deadline_bounds_sequential_timeouts() {
    let geomag = Geomag::builder()
        .with_factory(Scripted::slow("a", minutes(&[None, None]), Duration::from_millis(200)))
        .with_factory(Scripted::slow("b", minutes(&[None, None]), Duration::from_millis(200)))
        .with_factory(Scripted::slow("c", minutes(&[None, None]), Duration::from_millis(200)))
        .merge_strategy(MergeStrategy::Fallback)
        .factory_timeout(Duration::from_secs(1))
        .request_timeout(Duration::from_millis(250))
        .build()
        .unwrap();

    let started = std::time::Instant::now();
    let err = geomag.timeseries(&req(2)).await.unwrap_err();
    assert_eq!(err, GeomagError::RequestTimeout);
    assert!(started.elapsed() < Duration::from_millis(550));
}

#[tokio::test]
async fn request_deadline_applies_to_deep_fetch() {
    let geomag = Geomag::builder()
        .with_factory(Scripted::slow("a", minutes(&[Some(1), Some(2)]), Duration::from_millis(200)))
        .request_timeout(Duration::from_millis(20))
        .build()
        .unwrap();
    let err = geomag.timeseries(&req(2)).await;
    assert_eq!(err, Err(GeomagError::RequestTimeout));
}
