//! Assertion entry points.

use crate::helpers::classify::Classify;
use crate::ops::compare::Comparator;
use crate::types::{KompareError, Value};

impl<C: Classify> Comparator<C> {
    /// Compare two values and fail with the rendered report if they diverge.
    pub fn ensure_equal(&self, actual: &Value, expected: &Value) -> Result<(), KompareError> {
        let report = self.compare(actual, expected);
        if report.is_empty() {
            return Ok(());
        }
        Err(KompareError::divergent(report.len(), report.render()))
    }
}

/// Compare two values and return an error carrying every divergence.
///
/// The error's message is the combined report: a leading newline, then one
/// `path: kind.\n\tactual: ..\n\texpected: ..` entry per divergence.
pub fn ensure_equal(actual: &Value, expected: &Value) -> Result<(), KompareError> {
    Comparator::new().ensure_equal(actual, expected)
}

/// Assert that two values are structurally equal.
///
/// # Panics
///
/// Panics with the combined report if any divergence is found.
#[track_caller]
pub fn assert_equal(actual: &Value, expected: &Value) {
    if let Err(e) = ensure_equal(actual, expected) {
        panic!("{}", e);
    }
}

/// Serialize both sides into value trees and compare them.
#[cfg(feature = "serde")]
pub fn ensure_serialized_eq<A, E>(actual: &A, expected: &E) -> Result<(), KompareError>
where
    A: serde::Serialize + ?Sized,
    E: serde::Serialize + ?Sized,
{
    let actual = crate::helpers::ser::to_value(actual)?;
    let expected = crate::helpers::ser::to_value(expected)?;
    ensure_equal(&actual, &expected)
}

/// Assert that two serializable values are structurally equal.
///
/// # Panics
///
/// Panics if either side cannot be serialized, or with the combined report
/// if any divergence is found.
#[cfg(feature = "serde")]
#[track_caller]
pub fn assert_serialized_eq<A, E>(actual: &A, expected: &E)
where
    A: serde::Serialize + ?Sized,
    E: serde::Serialize + ?Sized,
{
    if let Err(e) = ensure_serialized_eq(actual, expected) {
        panic!("{}", e);
    }
}

/// Assert that two serializable values are structurally equal.
///
/// ```
/// use kompare_core::assert_kompare;
/// use std::collections::BTreeMap;
///
/// let mut actual = BTreeMap::new();
/// actual.insert("x", vec![1, 2]);
/// assert_kompare!(actual, BTreeMap::from([("x", vec![1, 2])]));
/// ```
#[cfg(feature = "serde")]
#[macro_export]
macro_rules! assert_kompare {
    ($actual:expr, $expected:expr $(,)?) => {
        $crate::assert_serialized_eq(&$actual, &$expected)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_equal_passes() {
        assert_equal(&Value::from("someval"), &Value::from("someval"));
    }

    #[test]
    #[should_panic(expected = "Value Mismatch")]
    fn test_assert_equal_panics_on_value_mismatch() {
        assert_equal(&Value::from("someval"), &Value::from("someotherval"));
    }

    #[test]
    fn test_ensure_equal_message() {
        let err = ensure_equal(&Value::from("someval"), &Value::from("someotherval")).unwrap_err();
        assert_eq!(err.error_type(), "divergent");
        assert_eq!(err.divergence_count(), Some(1));
        assert_eq!(
            err.to_string(),
            "\nTOP LEVEL: Value Mismatch.\n\tactual: someval\n\texpected: someotherval"
        );
    }

    #[test]
    fn test_ensure_equal_lists_every_divergence() {
        let actual = Value::map(vec![("a", 1), ("b", 2)]);
        let expected = Value::map(vec![("a", 3), ("b", 4)]);
        let err = ensure_equal(&actual, &expected).unwrap_err();
        let message = err.to_string();
        assert_eq!(err.divergence_count(), Some(2));
        assert!(message.contains("\na: Value Mismatch."));
        assert!(message.contains("\nb: Value Mismatch."));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialized_eq() {
        ensure_serialized_eq(&vec![1, 2], &vec![1, 2]).unwrap();
        let err = ensure_serialized_eq(&vec![1, 2], &vec![1, 2, 3]).unwrap_err();
        assert!(err.to_string().contains("TOP LEVEL: Length Mismatch."));
    }

    #[cfg(feature = "serde")]
    #[test]
    #[should_panic(expected = "Keys Differ")]
    fn test_assert_kompare_macro() {
        use std::collections::BTreeMap;
        let actual = BTreeMap::from([("a", 1)]);
        let expected = BTreeMap::from([("b", 1)]);
        assert_kompare!(actual, expected);
    }
}
