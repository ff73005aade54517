//! Value classification strategies.
//!
//! Before the comparator looks inside a value it asks a [`Classify`]
//! strategy what shape the value has. The shape decides whether children are
//! paired by key, by position, or not at all.

use crate::types::{Key, Value};

/// How the comparator should treat a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<'a> {
    /// Key to value entries, paired by key. Keys compare as a set.
    Mapping(Vec<(&'a Key, &'a Value)>),
    /// Ordered elements, paired by position.
    Sequence(Vec<&'a Value>),
    /// Compared as a whole with `==`.
    Scalar,
}

impl Shape<'_> {
    /// Short name, logged at `trace` as each node is classified.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Mapping(_) => "mapping",
            Shape::Sequence(_) => "sequence",
            Shape::Scalar => "scalar",
        }
    }
}

/// A classification strategy.
///
/// Implementations must be consistent: both sides of a comparison have
/// already been checked to share a runtime type, and the comparator assumes
/// two values of the same type get the same kind of shape.
pub trait Classify {
    /// Classify a value.
    fn classify<'a>(&self, value: &'a Value) -> Shape<'a>;
}

impl<C: Classify + ?Sized> Classify for &C {
    fn classify<'a>(&self, value: &'a Value) -> Shape<'a> {
        (**self).classify(value)
    }
}

impl<C: Classify + ?Sized> Classify for Box<C> {
    fn classify<'a>(&self, value: &'a Value) -> Shape<'a> {
        (**self).classify(value)
    }
}

/// The default strategy.
///
/// Maps and records are mappings (records by field name), lists and tuples
/// are sequences, everything else (text and bytes included) is a scalar.
#[derive(Debug, Clone, Copy, Default)]
pub struct Structural;

impl Classify for Structural {
    fn classify<'a>(&self, value: &'a Value) -> Shape<'a> {
        match value {
            Value::Map(map) => Shape::Mapping(map.iter().collect()),
            Value::Record(record) => {
                Shape::Mapping(record.fields().iter().map(|(k, v)| (k, v)).collect())
            }
            Value::List(items) | Value::Tuple(items) => Shape::Sequence(items.iter().collect()),
            _ => Shape::Scalar,
        }
    }
}

/// Treats records as plain ordered tuples of their field values.
///
/// For callers whose data has no meaningful field names, or who want record
/// divergences reported by position.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordsAsTuples;

impl Classify for RecordsAsTuples {
    fn classify<'a>(&self, value: &'a Value) -> Shape<'a> {
        match value {
            Value::Record(record) => {
                Shape::Sequence(record.fields().iter().map(|(_, v)| v).collect())
            }
            other => Structural.classify(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Record;

    #[test]
    fn test_structural_shapes() {
        assert_eq!(Structural.classify(&Value::from("abc")), Shape::Scalar);
        assert_eq!(Structural.classify(&Value::bytes(vec![1, 2])), Shape::Scalar);
        assert_eq!(Structural.classify(&Value::Null), Shape::Scalar);
        assert_eq!(Structural.classify(&Value::list(vec![1, 2])).name(), "sequence");
        assert_eq!(Structural.classify(&Value::tuple(vec![1, 2])).name(), "sequence");
        assert_eq!(Structural.classify(&Value::map(vec![("a", 1)])).name(), "mapping");
    }

    #[test]
    fn test_structural_unwraps_records_by_name() {
        let value = Value::from(Record::new("Point").field("x", 1).field("y", 2));
        match Structural.classify(&value) {
            Shape::Mapping(entries) => {
                let keys: Vec<String> = entries.iter().map(|(k, _)| k.to_string()).collect();
                assert_eq!(keys, vec!["x", "y"]);
            }
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_records_as_tuples() {
        let value = Value::from(Record::new("Point").field("x", 1).field("y", 2));
        assert_eq!(
            RecordsAsTuples.classify(&value),
            Shape::Sequence(vec![&Value::Int(1), &Value::Int(2)])
        );
        assert_eq!(RecordsAsTuples.classify(&Value::from(3)), Shape::Scalar);
    }
}
