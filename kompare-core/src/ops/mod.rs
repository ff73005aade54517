//! High-level kompare operations.

mod compare;
mod assert;

pub use compare::{build_divergences, compare, Comparator};
pub use assert::{assert_equal, ensure_equal};
#[cfg(feature = "serde")]
pub use assert::{assert_serialized_eq, ensure_serialized_eq};
