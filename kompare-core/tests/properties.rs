//! Property tests for the comparison policy.

use kompare_core::{build_divergences, ensure_equal, MismatchKind, Record, Value};
use proptest::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<u64>().prop_map(Value::UInt),
        // NaN is unequal to itself, so it is kept out of generated trees
        (-1.0e6..1.0e6f64).prop_map(Value::Float),
        "[a-z]{0,6}".prop_map(Value::Str),
        prop::collection::vec(any::<u8>(), 0..6).prop_map(Value::Bytes),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Tuple),
            prop::collection::btree_map("[a-c]", inner.clone(), 0..4).prop_map(|m| Value::map(m)),
            // Names are drawn from a small alphabet so repeated fields occur
            prop::collection::vec(("[a-c]", inner), 0..4).prop_map(|fields| {
                let mut record = Record::new("Rec");
                for (name, v) in fields {
                    record.push(name, v);
                }
                Value::Record(record)
            }),
        ]
    })
}

fn located(actual: &Value, expected: &Value) -> Vec<(String, MismatchKind)> {
    let mut found: Vec<(String, MismatchKind)> = build_divergences(actual, expected)
        .iter()
        .map(|d| (d.path.render(), d.kind()))
        .collect();
    found.sort_by(|a, b| a.0.cmp(&b.0));
    found
}

proptest! {
    #[test]
    fn reflexive(v in tree()) {
        init_logging();
        prop_assert!(build_divergences(&v, &v.clone()).is_empty());
    }

    #[test]
    fn detection_is_symmetric(a in tree(), b in tree()) {
        prop_assert_eq!(
            build_divergences(&a, &b).is_empty(),
            build_divergences(&b, &a).is_empty()
        );
    }

    #[test]
    fn swapping_sides_keeps_locations(a in tree(), b in tree()) {
        prop_assert_eq!(located(&a, &b), located(&b, &a));
    }

    #[test]
    fn ensure_equal_agrees_with_divergences(a in tree(), b in tree()) {
        let diffs = build_divergences(&a, &b);
        match ensure_equal(&a, &b) {
            Ok(()) => prop_assert!(diffs.is_empty()),
            Err(e) => prop_assert_eq!(e.divergence_count(), Some(diffs.len())),
        }
    }

    #[test]
    fn single_leaf_change_is_found(v in tree(), n in any::<i64>()) {
        // Wrap in a list so the change always sits below the root
        let actual = Value::list(vec![v.clone(), Value::Int(n)]);
        let expected = Value::list(vec![v, Value::Int(n.wrapping_add(1))]);
        let diffs = build_divergences(&actual, &expected);
        prop_assert_eq!(diffs.len(), 1);
        prop_assert_eq!(diffs[0].path.render(), "[1]");
        prop_assert_eq!(diffs[0].kind(), MismatchKind::ValueMismatch);
    }
}
