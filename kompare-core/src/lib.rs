//! kompare Core Library
//!
//! Structural comparison of nested values for test assertions. Given an
//! actual and an expected value tree, kompare finds every place the two
//! diverge and reports each with a path into the structure.
//!
//! # Architecture
//!
//! - `types`: Core data types (Value, Key, Path, Divergence, Report, errors)
//! - `ops`: High-level operations (compare, build_divergences, assert_equal)
//! - `helpers`: Low-level utilities (classification, serde bridge, format conversions)
//!
//! # Example
//!
//! ```
//! use kompare_core::{build_divergences, MismatchKind, Value};
//!
//! let actual = Value::map(vec![("x", Value::from(1)), ("y", Value::list(vec!["z", "a"]))]);
//! let expected = Value::map(vec![("x", Value::from(1)), ("y", Value::list(vec!["z", "q", "a"]))]);
//!
//! let diffs = build_divergences(&actual, &expected);
//! assert_eq!(diffs.len(), 1);
//! assert_eq!(diffs[0].path.render(), "y");
//! assert_eq!(diffs[0].kind(), MismatchKind::LengthMismatch);
//! ```

pub mod types;
pub mod ops;
pub mod helpers;

// Re-export commonly used types at crate root
pub use types::{
    Key,
    Value,
    ValueType,
    Record,
    Path,
    Segment,
    Divergence,
    Mismatch,
    MismatchKind,
    Payload,
    Report,
    ReportOptions,
    ErrorKind,
    KompareError,
    TOP_LEVEL,
};

// Re-export operations at crate root
pub use ops::{build_divergences, compare, Comparator};
pub use ops::{assert_equal, ensure_equal};
#[cfg(feature = "serde")]
pub use ops::{assert_serialized_eq, ensure_serialized_eq};

// Re-export classification strategies
pub use helpers::classify::{Classify, Shape, Structural, RecordsAsTuples};

#[cfg(feature = "serde")]
pub use helpers::ser::to_value;
#[cfg(feature = "json")]
pub use helpers::convert::parse_json;
#[cfg(feature = "yaml")]
pub use helpers::convert::parse_yaml;
#[cfg(feature = "toml")]
pub use helpers::convert::parse_toml;
