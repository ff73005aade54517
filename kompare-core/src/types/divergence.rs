//! Divergence records produced by a comparison.

use std::collections::BTreeSet;
use std::fmt;

use super::key::Key;
use super::path::Path;
use super::value::{Value, ValueType};

/// Category of a divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MismatchKind {
    /// The two values have different runtime types.
    TypeMismatch,
    /// Two mappings have different key sets.
    KeysDiffer,
    /// Two sequences have different lengths.
    LengthMismatch,
    /// Two scalars are unequal.
    ValueMismatch,
}

impl MismatchKind {
    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            MismatchKind::TypeMismatch => "Type Mismatch",
            MismatchKind::KeysDiffer => "Keys Differ",
            MismatchKind::LengthMismatch => "Length Mismatch",
            MismatchKind::ValueMismatch => "Value Mismatch",
        }
    }

    /// Whether this divergence cuts off a subtree whose children could not
    /// be paired. Value mismatches are leaves, not cut-offs.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MismatchKind::ValueMismatch)
    }
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What differed, with the actual and expected sides.
#[derive(Debug, Clone, PartialEq)]
pub enum Mismatch {
    /// Runtime types differ.
    Type { actual: ValueType, expected: ValueType },

    /// Mapping key sets differ. Both full key sets are kept.
    Keys {
        actual: BTreeSet<Key>,
        expected: BTreeSet<Key>,
    },

    /// Sequence lengths differ.
    Length { actual: usize, expected: usize },

    /// Scalar values differ.
    Value { actual: Value, expected: Value },
}

impl Mismatch {
    /// The category of this mismatch.
    pub fn kind(&self) -> MismatchKind {
        match self {
            Mismatch::Type { .. } => MismatchKind::TypeMismatch,
            Mismatch::Keys { .. } => MismatchKind::KeysDiffer,
            Mismatch::Length { .. } => MismatchKind::LengthMismatch,
            Mismatch::Value { .. } => MismatchKind::ValueMismatch,
        }
    }

    /// The actual side.
    pub fn actual(&self) -> Payload<'_> {
        match self {
            Mismatch::Type { actual, .. } => Payload::Type(actual),
            Mismatch::Keys { actual, .. } => Payload::Keys(actual),
            Mismatch::Length { actual, .. } => Payload::Length(*actual),
            Mismatch::Value { actual, .. } => Payload::Value(actual),
        }
    }

    /// The expected side.
    pub fn expected(&self) -> Payload<'_> {
        match self {
            Mismatch::Type { expected, .. } => Payload::Type(expected),
            Mismatch::Keys { expected, .. } => Payload::Keys(expected),
            Mismatch::Length { expected, .. } => Payload::Length(*expected),
            Mismatch::Value { expected, .. } => Payload::Value(expected),
        }
    }
}

/// One side of a mismatch, borrowed for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'a> {
    Type(&'a ValueType),
    Keys(&'a BTreeSet<Key>),
    Length(usize),
    Value(&'a Value),
}

impl fmt::Display for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Type(t) => write!(f, "{}", t),
            Payload::Keys(keys) => {
                f.write_str("{")?;
                for (i, k) in keys.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", k)?;
                }
                f.write_str("}")
            }
            Payload::Length(n) => write!(f, "{}", n),
            Payload::Value(v) => write!(f, "{}", v),
        }
    }
}

/// A single detected divergence: where it is and what differs.
#[derive(Debug, Clone, PartialEq)]
pub struct Divergence {
    /// Location of the divergence.
    pub path: Path,

    /// What differs there.
    pub mismatch: Mismatch,
}

impl Divergence {
    /// Create a divergence record.
    pub fn new(path: Path, mismatch: Mismatch) -> Self {
        Self { path, mismatch }
    }

    /// The category of this divergence.
    pub fn kind(&self) -> MismatchKind {
        self.mismatch.kind()
    }

    /// The actual side.
    pub fn actual(&self) -> Payload<'_> {
        self.mismatch.actual()
    }

    /// The expected side.
    pub fn expected(&self) -> Payload<'_> {
        self.mismatch.expected()
    }

    /// Format this divergence, naming the root with `top_level_label`.
    pub fn message(&self, top_level_label: &str) -> String {
        format!(
            "{}: {}.\n\tactual: {}\n\texpected: {}",
            self.path.render_or(top_level_label),
            self.kind(),
            self.actual(),
            self.expected()
        )
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message(super::report::TOP_LEVEL))
    }
}
