//! Conversions from parsed JSON, YAML and TOML documents.
//!
//! Integers that fit `i64` become [`Value::Int`], larger unsigned integers
//! become [`Value::UInt`], everything else numeric becomes [`Value::Float`].

#[cfg(any(feature = "json", feature = "yaml", feature = "toml"))]
use crate::types::{KompareError, Value};
#[cfg(feature = "yaml")]
use crate::types::{ErrorKind, Key};

#[cfg(feature = "json")]
fn json_number(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else if let Some(u) = n.as_u64() {
        Value::UInt(u)
    } else {
        n.as_f64().map_or(Value::Null, Value::Float)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => json_number(&n),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::list(items),
            serde_json::Value::Object(map) => Value::map(map),
        }
    }
}

/// Parse a JSON document into a value tree.
#[cfg(feature = "json")]
pub fn parse_json(text: &str) -> Result<Value, KompareError> {
    let parsed: serde_json::Value = serde_json::from_str(text)?;
    Ok(parsed.into())
}

#[cfg(feature = "yaml")]
fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else if let Some(u) = n.as_u64() {
        Value::UInt(u)
    } else {
        n.as_f64().map_or(Value::Null, Value::Float)
    }
}

/// YAML allows any value as a mapping key. Null, float and non-scalar keys
/// are keyed by their YAML text, so `null` and `"null"` map to the same key.
#[cfg(feature = "yaml")]
fn yaml_key(key: serde_yaml::Value) -> Key {
    match key {
        serde_yaml::Value::String(s) => Key::Str(s),
        serde_yaml::Value::Bool(b) => Key::Bool(b),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        other => {
            if let serde_yaml::Value::Number(n) = &other {
                if let Some(i) = n.as_i64() {
                    return Key::Int(i);
                }
            }
            let text = serde_yaml::to_string(&other).unwrap_or_else(|_| format!("{:?}", other));
            Key::Str(text.trim_end().to_string())
        }
    }
}

/// Conversion is infallible: when two keys of one mapping convert to the same
/// [`Key`], the later entry wins. [`parse_yaml`] and [`check_yaml_keys`]
/// report such collisions instead.
#[cfg(feature = "yaml")]
impl From<serde_yaml::Value> for Value {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => yaml_number(&n),
            serde_yaml::Value::String(s) => Value::Str(s),
            serde_yaml::Value::Sequence(items) => Value::list(items),
            serde_yaml::Value::Mapping(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (yaml_key(k), Value::from(v)))
                    .collect(),
            ),
            // Tags carry no structure of their own
            serde_yaml::Value::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

/// Fail if two keys of any mapping in `value` convert to the same [`Key`].
#[cfg(feature = "yaml")]
pub fn check_yaml_keys(value: &serde_yaml::Value) -> Result<(), KompareError> {
    match value {
        serde_yaml::Value::Mapping(map) => {
            let mut seen = std::collections::BTreeSet::new();
            for (k, v) in map {
                let key = yaml_key(k.clone());
                if !seen.insert(key.clone()) {
                    return Err(KompareError::new(ErrorKind::YamlError {
                        message: format!("mapping keys collide on '{}'", key),
                    }));
                }
                check_yaml_keys(v)?;
            }
            Ok(())
        }
        serde_yaml::Value::Sequence(items) => items.iter().try_for_each(check_yaml_keys),
        serde_yaml::Value::Tagged(tagged) => check_yaml_keys(&tagged.value),
        _ => Ok(()),
    }
}

/// Parse a YAML document into a value tree.
///
/// Mappings whose keys collide after conversion are rejected.
#[cfg(feature = "yaml")]
pub fn parse_yaml(text: &str) -> Result<Value, KompareError> {
    let parsed: serde_yaml::Value = serde_yaml::from_str(text)?;
    check_yaml_keys(&parsed)?;
    Ok(parsed.into())
}

#[cfg(feature = "toml")]
fn toml_table(table: toml::Table) -> Value {
    Value::map(table)
}

#[cfg(feature = "toml")]
impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Value::Str(s),
            toml::Value::Integer(i) => Value::Int(i),
            toml::Value::Float(x) => Value::Float(x),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::Str(dt.to_string()),
            toml::Value::Array(items) => Value::list(items),
            toml::Value::Table(table) => toml_table(table),
        }
    }
}

/// Parse a TOML document into a value tree. The root is always a map.
#[cfg(feature = "toml")]
pub fn parse_toml(text: &str) -> Result<Value, KompareError> {
    let parsed: toml::Table = toml::from_str(text)?;
    Ok(toml_table(parsed))
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[cfg(feature = "json")]
    #[test]
    fn test_json_conversion() {
        let value = parse_json(r#"{"x": 1, "y": [1.5, "a", null, true], "big": 18446744073709551615}"#)
            .unwrap();
        assert_eq!(
            value,
            Value::map(vec![
                ("x", Value::Int(1)),
                (
                    "y",
                    Value::list(vec![
                        Value::Float(1.5),
                        Value::from("a"),
                        Value::Null,
                        Value::Bool(true),
                    ]),
                ),
                ("big", Value::UInt(u64::MAX)),
            ])
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_parse_error() {
        let err = parse_json("{not json").unwrap_err();
        assert_eq!(err.error_type(), "json_error");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_conversion() {
        let value = parse_yaml("x: 1\ny:\n  z: blah\n  a: [1, 2]\n3: three\n").unwrap();
        assert_eq!(
            value,
            Value::map(vec![
                (Key::from("x"), Value::Int(1)),
                (
                    Key::from("y"),
                    Value::map(vec![
                        ("z", Value::from("blah")),
                        ("a", Value::list(vec![1, 2])),
                    ]),
                ),
                (Key::from(3), Value::from("three")),
            ])
        );
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_colliding_keys_are_rejected() {
        let err = parse_yaml("null: a\n\"null\": b\n").unwrap_err();
        assert_eq!(err.error_type(), "yaml_error");
        assert!(err.to_string().contains("'null'"));

        let err = parse_yaml("outer:\n  - 1.5: a\n    '1.5': b\n").unwrap_err();
        assert_eq!(err.error_type(), "yaml_error");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_colliding_keys_last_wins_on_conversion() {
        let doc: serde_yaml::Value = serde_yaml::from_str("null: a\n\"null\": b\n").unwrap();
        assert!(check_yaml_keys(&doc).is_err());
        assert_eq!(Value::from(doc), Value::map(vec![("null", "b")]));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_parse_error() {
        let err = parse_yaml("a: [1, 2").unwrap_err();
        assert_eq!(err.error_type(), "yaml_error");
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_conversion() {
        let value = parse_toml("name = \"x\"\n[server]\nport = 8080\nhosts = [\"a\", \"b\"]\n").unwrap();
        assert_eq!(
            value,
            Value::map(vec![
                ("name", Value::from("x")),
                (
                    "server",
                    Value::map(vec![
                        ("port", Value::Int(8080)),
                        ("hosts", Value::list(vec!["a", "b"])),
                    ]),
                ),
            ])
        );
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_parse_error() {
        let err = parse_toml("name = ").unwrap_err();
        assert_eq!(err.error_type(), "toml_error");
    }
}
