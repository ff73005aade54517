//! Paths into a value tree.

use std::fmt;

use super::key::Key;

/// One step into a nested value: a field access or an index access.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    key: Key,
    is_index: bool,
}

impl Segment {
    /// Create a segment from a key and an index flag.
    pub fn new(key: impl Into<Key>, is_index: bool) -> Self {
        Self {
            key: key.into(),
            is_index,
        }
    }

    /// A named-field access, rendered `.key`.
    pub fn field(key: impl Into<Key>) -> Self {
        Self::new(key, false)
    }

    /// A positional access, rendered `[i]`.
    pub fn index(i: usize) -> Self {
        Self::new(i, true)
    }

    /// The segment's key.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Whether this is an index access.
    pub fn is_index(&self) -> bool {
        self.is_index
    }
}

/// Location of a value within the root structure. The root is the empty path.
///
/// Paths are never mutated once built; [`Path::child`] returns a new path so
/// sibling branches of a traversal never observe each other's segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// A new path extending this one by a single segment.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    /// Segments from the root downwards.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Render the path, e.g. `x.y[1]`. The root renders as an empty string.
    pub fn render(&self) -> String {
        render_segments(&self.segments)
    }

    /// Render the path, substituting `label` for the root.
    pub fn render_or(&self, label: &str) -> String {
        if self.is_root() {
            label.to_string()
        } else {
            self.render()
        }
    }
}

/// Render segments in order: `[key]` for index segments, `key` for field
/// segments, with a `.` before a field unless nothing has been emitted yet.
pub fn render_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.is_index {
            out.push('[');
            out.push_str(&segment.key.to_string());
            out.push(']');
        } else {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(&segment.key.to_string());
        }
    }
    out
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mixed_segments() {
        let path: Path = vec![
            Segment::field("x"),
            Segment::field("y"),
            Segment::index(1),
            Segment::field(1),
        ]
        .into();
        assert_eq!(path.render(), "x.y[1].1");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(Path::root().render(), "");
        assert_eq!(Path::root().render_or("TOP LEVEL"), "TOP LEVEL");
    }

    #[test]
    fn test_render_single_segment() {
        assert_eq!(Path::from(vec![Segment::field("x")]).render(), "x");
        assert_eq!(Path::from(vec![Segment::index(1)]).render(), "[1]");
    }

    #[test]
    fn test_render_index_first() {
        let path = Path::root().child(Segment::index(0)).child(Segment::field("name"));
        assert_eq!(path.render(), "[0].name");
    }

    #[test]
    fn test_child_leaves_parent_untouched() {
        let parent = Path::root().child(Segment::field("y"));
        let left = parent.child(Segment::field("a"));
        let right = parent.child(Segment::field("b"));

        assert_eq!(parent.render(), "y");
        assert_eq!(left.render(), "y.a");
        assert_eq!(right.render(), "y.b");
    }

    #[test]
    fn test_segment_equality() {
        assert_eq!(Segment::new("x", false), Segment::field("x"));
        assert_ne!(Segment::new(1, true), Segment::new(1, false));
        assert_eq!(Segment::index(1), Segment::new(1, true));
    }
}
