//! Mapping keys.

use std::fmt;

/// A key in a mapping, or the name of a record field.
///
/// Keys are opaque to the comparator: they only need to be ordered (so key
/// sets can be compared and printed deterministically) and printable (so
/// they can appear in a rendered path).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// Boolean key.
    Bool(bool),
    /// Integer key.
    Int(i64),
    /// Text key (also used for record field names).
    Str(String),
}

impl Key {
    /// Get the key as text, if it is a text key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Bool(b) => write!(f, "{}", b),
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Str(s.clone())
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

macro_rules! int_key {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(i: $t) -> Self {
                    Key::Int(i64::from(i))
                }
            }
        )*
    };
}

int_key!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(Key::from("name").to_string(), "name");
        assert_eq!(Key::from(3).to_string(), "3");
        assert_eq!(Key::from(true).to_string(), "true");
    }

    #[test]
    fn test_key_ordering_groups_by_kind() {
        let mut keys = vec![Key::from("b"), Key::from(2), Key::from("a"), Key::from(false)];
        keys.sort();
        assert_eq!(
            keys,
            vec![Key::from(false), Key::from(2), Key::from("a"), Key::from("b")]
        );
    }
}
