use std::time::Duration;

use geomag::{Geomag, GeomagConfig, GeomagError, MergeStrategy};
use geomag_mock::MockFactory;
use std::sync::Arc;

#[test]
fn build_requires_a_factory() {
    let err = Geomag::builder().build().err().unwrap();
    assert!(matches!(err, GeomagError::InvalidArg(_)));
}

#[test]
fn builder_setters_reach_config() {
    let geomag = Geomag::builder()
        .with_factory(Arc::new(MockFactory::new("m")))
        .merge_strategy(MergeStrategy::Fallback)
        .factory_timeout(Duration::from_millis(250))
        .request_timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    assert_eq!(
        geomag.config(),
        &GeomagConfig {
            merge_strategy: MergeStrategy::Fallback,
            factory_timeout: Duration::from_millis(250),
            request_timeout: Some(Duration::from_secs(2)),
        }
    );
}

#[test]
fn config_can_be_loaded_whole() {
    let cfg: GeomagConfig = serde_json::from_str(
        r#"{"merge_strategy":"Fallback","factory_timeout":{"secs":1,"nanos":0},"request_timeout":null}"#,
    )
    .unwrap();
    let geomag = Geomag::builder()
        .with_factory(Arc::new(MockFactory::new("m")))
        .config(cfg.clone())
        .build()
        .unwrap();
    assert_eq!(geomag.config(), &cfg);
    assert_eq!(geomag.config().factory_timeout, Duration::from_secs(1));
}
