//! Comparing derived `Serialize` types end to end.
#![cfg(feature = "serde")]

use std::collections::BTreeMap;

use kompare_core::{assert_kompare, ensure_serialized_eq, to_value, MismatchKind, Value};
use serde::Serialize;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone, Serialize)]
struct Config {
    name: String,
    retries: u32,
    tags: Vec<String>,
    limits: BTreeMap<String, i64>,
    owner: Option<Owner>,
}

#[derive(Debug, Clone, Serialize)]
struct Owner {
    email: String,
    admin: bool,
}

#[derive(Debug, Clone, Serialize)]
struct OtherOwner {
    email: String,
    admin: bool,
}

fn sample() -> Config {
    Config {
        name: "svc".to_string(),
        retries: 3,
        tags: vec!["a".to_string(), "b".to_string()],
        limits: BTreeMap::from([("cpu".to_string(), 2), ("mem".to_string(), 512)]),
        owner: Some(Owner {
            email: "ops@example.com".to_string(),
            admin: false,
        }),
    }
}

#[test]
fn equal_structs_pass() {
    init_logging();
    assert_kompare!(sample(), sample());
}

#[test]
fn nested_changes_are_all_reported() {
    init_logging();
    let actual = sample();
    let mut expected = sample();
    expected.retries = 5;
    expected.tags.push("c".to_string());
    expected.limits.insert("mem".to_string(), 1024);
    if let Some(owner) = expected.owner.as_mut() {
        owner.admin = true;
    }

    let err = ensure_serialized_eq(&actual, &expected).unwrap_err();
    assert_eq!(err.divergence_count(), Some(4));

    let message = err.to_string();
    assert!(message.starts_with('\n'));
    assert!(message.contains("retries: Value Mismatch.\n\tactual: 3\n\texpected: 5"));
    assert!(message.contains("tags: Length Mismatch.\n\tactual: 2\n\texpected: 3"));
    assert!(message.contains("limits.mem: Value Mismatch.\n\tactual: 512\n\texpected: 1024"));
    assert!(message.contains("owner.admin: Value Mismatch.\n\tactual: false\n\texpected: true"));
}

#[test]
fn missing_option_is_a_type_mismatch() {
    let actual = sample();
    let mut expected = sample();
    expected.owner = None;

    let actual = to_value(&actual).unwrap();
    let expected = to_value(&expected).unwrap();
    let diffs = kompare_core::build_divergences(&actual, &expected);
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path.render(), "owner");
    assert_eq!(diffs[0].kind(), MismatchKind::TypeMismatch);
    assert_eq!(diffs[0].actual().to_string(), "Owner");
    assert_eq!(diffs[0].expected().to_string(), "null");
}

#[test]
fn same_shape_different_struct_is_a_type_mismatch() {
    let owner = Owner {
        email: "x".to_string(),
        admin: true,
    };
    let other = OtherOwner {
        email: "x".to_string(),
        admin: true,
    };
    let err = ensure_serialized_eq(&owner, &other).unwrap_err();
    assert!(err
        .to_string()
        .contains("TOP LEVEL: Type Mismatch.\n\tactual: Owner\n\texpected: OtherOwner"));
}

#[test]
fn struct_compares_against_hand_built_record() {
    let owner = Owner {
        email: "x".to_string(),
        admin: true,
    };
    let expected = Value::Record(
        kompare_core::Record::new("Owner")
            .field("admin", true)
            .field("email", "x"),
    );
    // Field order does not matter: records compare as mappings
    kompare_core::assert_equal(&to_value(&owner).unwrap(), &expected);
}

#[test]
#[should_panic(expected = "tags[1]: Value Mismatch.")]
fn assert_macro_panics_with_report() {
    let actual = sample();
    let mut expected = sample();
    expected.tags[1] = "z".to_string();
    assert_kompare!(actual, expected);
}
