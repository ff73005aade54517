//! Comparison results and their textual report.

use super::divergence::{Divergence, MismatchKind};

/// Label shown in place of an empty path.
pub const TOP_LEVEL: &str = "TOP LEVEL";

/// Options for rendering a [`Report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Label used for divergences at the root.
    pub top_level_label: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_level_label: TOP_LEVEL.to_string(),
        }
    }
}

/// All divergences found by one comparison, in traversal order.
///
/// An empty report means the two values are structurally equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Divergences found.
    pub divergences: Vec<Divergence>,
}

impl Report {
    /// Wrap a list of divergences.
    pub fn new(divergences: Vec<Divergence>) -> Self {
        Self { divergences }
    }

    /// Check if there are no divergences.
    pub fn is_empty(&self) -> bool {
        self.divergences.is_empty()
    }

    /// Get the number of divergences.
    pub fn len(&self) -> usize {
        self.divergences.len()
    }

    /// Iterate over the divergences.
    pub fn iter(&self) -> std::slice::Iter<'_, Divergence> {
        self.divergences.iter()
    }

    /// Count divergences of one kind.
    pub fn count(&self, kind: MismatchKind) -> usize {
        self.divergences.iter().filter(|d| d.kind() == kind).count()
    }

    /// Unwrap into the list of divergences.
    pub fn into_divergences(self) -> Vec<Divergence> {
        self.divergences
    }

    /// Render with default options.
    ///
    /// Each divergence becomes one message; messages are joined with newlines
    /// and the whole report starts with a newline. An empty report renders
    /// as an empty string.
    pub fn render(&self) -> String {
        self.render_with(&ReportOptions::default())
    }

    /// Render with the given options.
    pub fn render_with(&self, options: &ReportOptions) -> String {
        if self.is_empty() {
            return String::new();
        }

        let messages: Vec<String> = self
            .divergences
            .iter()
            .map(|d| d.message(&options.top_level_label))
            .collect();
        format!("\n{}", messages.join("\n"))
    }
}

impl IntoIterator for Report {
    type Item = Divergence;
    type IntoIter = std::vec::IntoIter<Divergence>;

    fn into_iter(self) -> Self::IntoIter {
        self.divergences.into_iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Divergence;
    type IntoIter = std::slice::Iter<'a, Divergence>;

    fn into_iter(self) -> Self::IntoIter {
        self.divergences.iter()
    }
}

impl From<Vec<Divergence>> for Report {
    fn from(divergences: Vec<Divergence>) -> Self {
        Self::new(divergences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::divergence::Mismatch;
    use crate::types::path::{Path, Segment};
    use crate::types::value::Value;

    fn value_mismatch(field: &str, actual: i64, expected: i64) -> Divergence {
        Divergence::new(
            Path::root().child(Segment::field(field)),
            Mismatch::Value {
                actual: Value::Int(actual),
                expected: Value::Int(expected),
            },
        )
    }

    #[test]
    fn test_empty_report() {
        let report = Report::default();
        assert!(report.is_empty());
        assert_eq!(report.render(), "");
    }

    #[test]
    fn test_render_joins_messages() {
        let report = Report::new(vec![value_mismatch("a", 1, 2), value_mismatch("b", 3, 4)]);
        assert_eq!(report.len(), 2);
        assert_eq!(report.count(MismatchKind::ValueMismatch), 2);
        assert_eq!(
            report.render(),
            "\na: Value Mismatch.\n\tactual: 1\n\texpected: 2\
             \nb: Value Mismatch.\n\tactual: 3\n\texpected: 4"
        );
    }

    #[test]
    fn test_render_with_custom_label() {
        let report = Report::new(vec![Divergence::new(
            Path::root(),
            Mismatch::Length {
                actual: 1,
                expected: 2,
            },
        )]);
        let options = ReportOptions {
            top_level_label: "$".to_string(),
        };
        assert!(report.render_with(&options).starts_with("\n$: Length Mismatch."));
    }
}
