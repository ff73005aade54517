//! The dynamic value tree compared by kompare.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::key::Key;

/// An owned, dynamically typed value.
///
/// Values are plain trees: containers own their children, so a value can
/// never contain itself and every traversal terminates.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value (`None`, unit, JSON `null`).
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer that came from a `u64`/`usize` source.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Text. Never treated as a sequence of characters.
    Str(String),
    /// Raw bytes, compared as a single scalar.
    Bytes(Vec<u8>),
    /// Ordered, variable-length sequence.
    List(Vec<Value>),
    /// Ordered, fixed-shape aggregate without field names.
    Tuple(Vec<Value>),
    /// Key to value mapping. Key order is irrelevant to comparison.
    Map(BTreeMap<Key, Value>),
    /// Fixed-shape aggregate with named fields.
    Record(Record),
}

/// A named aggregate with ordered, named fields.
///
/// Two records share a runtime type iff their names match.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    fields: Vec<(Key, Value)>,
}

impl Record {
    /// Create an empty record with the given type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field, or replace the value of an existing field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    /// Set a field in place.
    ///
    /// Field names are unique: setting a name that is already present
    /// replaces its value and keeps its position.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let key = Key::Str(name.into());
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// The record's type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[(Key, Value)] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| k.as_str() == Some(name))
            .map(|(_, v)| v)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Runtime type of a [`Value`].
///
/// Values whose types differ are never compared further.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Bool,
    Int,
    UInt,
    Float,
    Str,
    Bytes,
    List,
    Tuple,
    Map,
    /// A record type, identified by its name.
    Record(String),
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::UInt => "uint",
            ValueType::Float => "float",
            ValueType::Str => "str",
            ValueType::Bytes => "bytes",
            ValueType::List => "list",
            ValueType::Tuple => "tuple",
            ValueType::Map => "map",
            ValueType::Record(name) => name.as_str(),
        };
        f.write_str(name)
    }
}

impl Value {
    /// Build a list from anything convertible to values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a tuple from anything convertible to values.
    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Build a map from key/value pairs. Later duplicates win.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a bytes value.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(bytes.into())
    }

    /// The runtime type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::UInt(_) => ValueType::UInt,
            Value::Float(_) => ValueType::Float,
            Value::Str(_) => ValueType::Str,
            Value::Bytes(_) => ValueType::Bytes,
            Value::List(_) => ValueType::List,
            Value::Tuple(_) => ValueType::Tuple,
            Value::Map(_) => ValueType::Map,
            Value::Record(r) => ValueType::Record(r.name.clone()),
        }
    }

    /// Whether two values share a runtime type, without allocating.
    pub fn same_type(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Record(a), Value::Record(b)) => a.name == b.name,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }

    /// Get the value as text, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Display adapter that quotes text, as used for values nested inside
    /// containers.
    pub fn repr(&self) -> Repr<'_> {
        Repr(self)
    }
}

/// Quoting display adapter returned by [`Value::repr`].
pub struct Repr<'a>(&'a Value);

impl fmt::Display for Repr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Str(s) => write!(f, "{:?}", s),
            other => write_plain(other, f),
        }
    }
}

fn write_items(items: &[Value], open: &str, close: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item.repr())?;
    }
    // A one-element tuple keeps its trailing comma so it reads as a tuple.
    if open == "(" && items.len() == 1 {
        f.write_str(",")?;
    }
    f.write_str(close)
}

fn write_plain(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Int(i) => write!(f, "{}", i),
        Value::UInt(u) => write!(f, "{}", u),
        Value::Float(x) => write!(f, "{:?}", x),
        Value::Str(s) => f.write_str(s),
        Value::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
        Value::List(items) => write_items(items, "[", "]", f),
        Value::Tuple(items) => write_items(items, "(", ")", f),
        Value::Map(map) => {
            f.write_str("{")?;
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}: {}", k, v.repr())?;
            }
            f.write_str("}")
        }
        Value::Record(r) => {
            write!(f, "{}(", r.name)?;
            for (i, (k, v)) in r.fields.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}={}", k, v.repr())?;
            }
            f.write_str(")")
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_plain(self, f)
    }
}

// Conversions from Rust values

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i64::from(i))
                }
            }
        )*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::UInt(u)
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Self {
        Value::UInt(u as u64)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<K: Into<Key>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(map: BTreeMap<K, V>) -> Self {
        Value::map(map)
    }
}

impl<K: Into<Key>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(map: HashMap<K, V, S>) -> Self {
        Value::map(map)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_names() {
        assert_eq!(Value::from(1).value_type().to_string(), "int");
        assert_eq!(Value::from("x").value_type().to_string(), "str");
        assert_eq!(Value::list(vec![1, 2]).value_type().to_string(), "list");
        let point = Record::new("Point").field("x", 1);
        assert_eq!(Value::from(point).value_type().to_string(), "Point");
    }

    #[test]
    fn test_same_type() {
        assert!(Value::from(1).same_type(&Value::from(2)));
        assert!(!Value::from(1).same_type(&Value::from(1.0)));
        assert!(!Value::from(1).same_type(&Value::from(1u64)));

        let a = Value::from(Record::new("A"));
        let b = Value::from(Record::new("B"));
        assert!(a.same_type(&Value::from(Record::new("A"))));
        assert!(!a.same_type(&b));
    }

    #[test]
    fn test_display_quotes_nested_text_only() {
        assert_eq!(Value::from("blah").to_string(), "blah");
        assert_eq!(Value::list(vec!["z", "a"]).to_string(), r#"["z", "a"]"#);
        assert_eq!(
            Value::map(vec![("x", Value::from(1)), ("y", Value::from("b"))]).to_string(),
            r#"{x: 1, y: "b"}"#
        );
    }

    #[test]
    fn test_display_tuples_and_records() {
        assert_eq!(Value::tuple(vec![1]).to_string(), "(1,)");
        assert_eq!(Value::tuple(vec![1, 2]).to_string(), "(1, 2)");
        let point = Record::new("Point").field("x", 1).field("y", 2.5);
        assert_eq!(Value::from(point).to_string(), "Point(x=1, y=2.5)");
    }

    #[test]
    fn test_display_scalars() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(1.0).to_string(), "1.0");
        assert_eq!(Value::bytes(b"ab\n".to_vec()).to_string(), r#"b"ab\n""#);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::Int(3));
    }

    #[test]
    fn test_record_lookup() {
        let r = Record::new("Point").field("x", 1).field("y", 2);
        assert_eq!(r.get("y"), Some(&Value::Int(2)));
        assert_eq!(r.get("z"), None);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_record_repeated_field_replaces() {
        let r = Record::new("Point").field("x", 1).field("y", 2).field("x", 3);
        assert_eq!(r.len(), 2);
        assert_eq!(r.fields()[0], (Key::from("x"), Value::Int(3)));
        assert_eq!(r.get("x"), Some(&Value::Int(3)));
    }
}
