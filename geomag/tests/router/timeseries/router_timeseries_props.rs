use proptest::prelude::*;

use geomag::{Geomag, MergeStrategy, TimeseriesFactory};
use std::sync::Arc;

use crate::helpers::{Scripted, minutes, req};

const NAMES: [&str; 5] = ["p0", "p1", "p2", "p3", "p4"];

fn arb_layers() -> impl Strategy<Value = (usize, Vec<Vec<Option<i64>>>)> {
    (2usize..40).prop_flat_map(|len| {
        (
            Just(len),
            proptest::collection::vec(
                proptest::collection::vec(proptest::option::weighted(0.5, -500i64..500), len),
                1..=NAMES.len(),
            ),
        )
    })
}

fn orchestrator(layers: &[Vec<Option<i64>>], strategy: MergeStrategy) -> Geomag {
    layers
        .iter()
        .zip(NAMES)
        .fold(Geomag::builder(), |b, (values, name)| {
            let f: Arc<dyn TimeseriesFactory> = Scripted::ok(name, minutes(values));
            b.with_factory(f)
        })
        .merge_strategy(strategy)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn fallback_agrees_with_deep((len, layers) in arb_layers()) {
        let n = i64::try_from(len).unwrap();
        let (deep, fallback) = tokio_test::block_on(async {
            let deep = orchestrator(&layers, MergeStrategy::Deep)
                .timeseries_with_attribution(&req(n))
                .await
                .unwrap();
            let fallback = orchestrator(&layers, MergeStrategy::Fallback)
                .timeseries_with_attribution(&req(n))
                .await
                .unwrap();
            (deep, fallback)
        });
        prop_assert_eq!(&deep.0, &fallback.0);
        prop_assert_eq!(deep.1, fallback.1);
    }

    #[test]
    fn merged_sample_comes_from_first_layer_that_has_it((len, layers) in arb_layers()) {
        let n = i64::try_from(len).unwrap();
        let merged = tokio_test::block_on(
            orchestrator(&layers, MergeStrategy::Deep).timeseries(&req(n)),
        )
        .unwrap();
        for i in 0..len {
            let expected = layers.iter().find_map(|l| l[i]).map(rust_decimal::Decimal::from);
            prop_assert_eq!(merged.value(i), expected);
        }
    }
}
