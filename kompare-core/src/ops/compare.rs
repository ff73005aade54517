//! Recursive structural comparison.

use std::collections::{BTreeMap, BTreeSet};

use crate::helpers::classify::{Classify, Shape, Structural};
use crate::types::{Divergence, Key, Mismatch, Path, Report, Segment, Value, TOP_LEVEL};

/// Walks two value trees in lock-step and records every divergence.
///
/// The comparison policy is fixed:
/// 1. Values of different runtime types are a type mismatch; nothing below
///    them is compared.
/// 2. Mappings whose key sets differ are a keys mismatch; otherwise every key
///    is compared. Key order never matters.
/// 3. Sequences of different lengths are a length mismatch; otherwise
///    elements are compared by position.
/// 4. Anything else is compared with `==`.
///
/// What counts as a mapping or a sequence is decided by the [`Classify`]
/// strategy, [`Structural`] by default.
#[derive(Debug, Clone, Default)]
pub struct Comparator<C = Structural> {
    classifier: C,
}

impl Comparator<Structural> {
    /// Create a comparator using the structural classifier.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Classify> Comparator<C> {
    /// Create a comparator with a custom classification strategy.
    pub fn with_classifier(classifier: C) -> Self {
        Self { classifier }
    }

    /// The classification strategy in use.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Compare two roots and collect every divergence.
    pub fn compare(&self, actual: &Value, expected: &Value) -> Report {
        let mut divergences = Vec::new();
        self.compare_at(&Path::root(), actual, expected, &mut divergences);
        log::debug!("Comparison finished with {} divergence(s)", divergences.len());
        Report::new(divergences)
    }

    /// Compare two values found at `path`, appending divergences to `out`.
    ///
    /// Never fails; divergences in sibling subtrees are all collected.
    pub fn compare_at(
        &self,
        path: &Path,
        actual: &Value,
        expected: &Value,
        out: &mut Vec<Divergence>,
    ) {
        log::trace!("Comparing at '{}'", path.render_or(TOP_LEVEL));

        if !actual.same_type(expected) {
            record(
                out,
                path,
                Mismatch::Type {
                    actual: actual.value_type(),
                    expected: expected.value_type(),
                },
            );
            return;
        }

        let shapes = (
            self.classifier.classify(actual),
            self.classifier.classify(expected),
        );
        log::trace!(
            "'{}' classified as {} / {}",
            path.render_or(TOP_LEVEL),
            shapes.0.name(),
            shapes.1.name()
        );

        match shapes {
            (Shape::Mapping(act), Shape::Mapping(exp)) => {
                self.compare_mappings(path, act, exp, out)
            }
            (Shape::Sequence(act), Shape::Sequence(exp)) => {
                self.compare_sequences(path, act, exp, out)
            }
            // Scalars, and any pairing an inconsistent classifier produced
            _ => {
                if actual != expected {
                    record(
                        out,
                        path,
                        Mismatch::Value {
                            actual: actual.clone(),
                            expected: expected.clone(),
                        },
                    );
                }
            }
        }
    }

    fn compare_mappings(
        &self,
        path: &Path,
        actual: Vec<(&Key, &Value)>,
        expected: Vec<(&Key, &Value)>,
        out: &mut Vec<Divergence>,
    ) {
        let expected: BTreeMap<&Key, &Value> = expected.into_iter().collect();
        let actual_keys: BTreeSet<&Key> = actual.iter().map(|(k, _)| *k).collect();
        let expected_keys: BTreeSet<&Key> = expected.keys().copied().collect();

        if actual_keys.symmetric_difference(&expected_keys).next().is_some() {
            record(
                out,
                path,
                Mismatch::Keys {
                    actual: actual_keys.into_iter().cloned().collect(),
                    expected: expected_keys.into_iter().cloned().collect(),
                },
            );
            return;
        }

        for (key, act) in actual {
            if let Some(exp) = expected.get(key) {
                self.compare_at(&path.child(Segment::field(key.clone())), act, exp, out);
            }
        }
    }

    fn compare_sequences(
        &self,
        path: &Path,
        actual: Vec<&Value>,
        expected: Vec<&Value>,
        out: &mut Vec<Divergence>,
    ) {
        if actual.len() != expected.len() {
            record(
                out,
                path,
                Mismatch::Length {
                    actual: actual.len(),
                    expected: expected.len(),
                },
            );
            return;
        }

        for (idx, (act, exp)) in actual.into_iter().zip(expected).enumerate() {
            self.compare_at(&path.child(Segment::index(idx)), act, exp, out);
        }
    }
}

fn record(out: &mut Vec<Divergence>, path: &Path, mismatch: Mismatch) {
    log::debug!(
        "{} at '{}': actual {}, expected {}",
        mismatch.kind(),
        path.render_or(TOP_LEVEL),
        mismatch.actual(),
        mismatch.expected()
    );
    out.push(Divergence::new(path.clone(), mismatch));
}

/// Compare two values with the default policy and return every divergence.
///
/// An empty list means the values are structurally equal.
pub fn build_divergences(actual: &Value, expected: &Value) -> Vec<Divergence> {
    compare(actual, expected).into_divergences()
}

/// Compare two values with the default policy.
pub fn compare(actual: &Value, expected: &Value) -> Report {
    Comparator::new().compare(actual, expected)
}
