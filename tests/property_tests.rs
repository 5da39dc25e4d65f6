//! Property: for acyclic graphs built from the hashable-keyed shapes,
//! loading a dumped tree yields an equal graph.

use chrono::DateTime;
use proptest::prelude::*;
use tangle::{Dumper, Loader, ScalarKey, Value};

fn arb_key() -> impl Strategy<Value = ScalarKey> {
    prop_oneof![
        Just(ScalarKey::Null),
        any::<bool>().prop_map(ScalarKey::Bool),
        any::<i64>().prop_map(ScalarKey::Int),
        "[a-zA-Z0-9 _.-]{0,12}".prop_map(|s| ScalarKey::from(s.as_str())),
    ]
}

fn arb_timestamp() -> impl Strategy<Value = Value> {
    (0i64..4_102_444_800, 0u32..1_000_000).prop_map(|(secs, micros)| {
        let stamp = DateTime::from_timestamp(secs, micros * 1000).expect("in range");
        Value::Timestamp(stamp)
    })
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e12..1.0e12f64).prop_map(Value::Float),
        "[ -~]{0,16}".prop_map(|s| Value::string(&s)),
        proptest::collection::vec(any::<u8>(), 0..16).prop_map(|b| Value::bytes(&b)),
        arb_timestamp(),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::seq),
            proptest::collection::vec((arb_key(), inner.clone()), 0..6).prop_map(Value::map),
            proptest::collection::vec((arb_key(), inner), 0..6).prop_map(|entries| {
                Value::pairs(
                    entries
                        .into_iter()
                        .map(|(key, value)| (key.into_value(), value))
                        .collect(),
                )
            }),
            proptest::collection::vec(arb_key(), 0..6).prop_map(Value::set),
        ]
    })
}

proptest! {
    #[test]
    fn round_trip_preserves_acyclic_graphs(value in arb_value()) {
        let node = Dumper::default().to_node(&value).expect("dump failed");
        let back = Loader::default().construct(&node).expect("load failed");
        prop_assert_eq!(back, value);
    }

    /// Dumping the same graph twice produces trees that load to equal
    /// values: the conversion holds no cross-call state.
    #[test]
    fn conversions_are_repeatable(value in arb_value()) {
        let dumper = Dumper::default();
        let loader = Loader::default();
        let first = loader.construct(&dumper.to_node(&value).expect("dump failed")).expect("load failed");
        let second = loader.construct(&dumper.to_node(&value).expect("dump failed")).expect("load failed");
        prop_assert_eq!(first, second);
    }
}
