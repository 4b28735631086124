//! # Stack — Failure Location Paths
//!
//! A `Stack` is the ordered path from the normalization root to the point
//! of failure, outermost segment first. Dict fields contribute their name,
//! list elements their index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step into a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A dict field name.
    Field(String),
    /// A list element position.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        PathSegment::Index(i)
    }
}

/// Path from the normalization root to a nested value.
///
/// Stacks are never mutated in place during normalization: descending into
/// a field or element yields a new `Stack`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stack(Vec<PathSegment>);

impl Stack {
    /// The empty path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// This path extended by a field name.
    pub fn child(&self, field: impl Into<String>) -> Self {
        self.extended(PathSegment::Field(field.into()))
    }

    /// This path extended by a list index.
    pub fn index(&self, i: usize) -> Self {
        self.extended(PathSegment::Index(i))
    }

    fn extended(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment);
        Self(segments)
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the root path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// The innermost segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i > 0 => write!(f, ".{name}")?,
                other => write!(f, "{other}")?,
            }
        }
        Ok(())
    }
}

impl<const N: usize> From<[&str; N]> for Stack {
    fn from(fields: [&str; N]) -> Self {
        Self(fields.into_iter().map(PathSegment::from).collect())
    }
}

impl From<Vec<&str>> for Stack {
    fn from(fields: Vec<&str>) -> Self {
        Self(fields.into_iter().map(PathSegment::from).collect())
    }
}

impl From<Vec<PathSegment>> for Stack {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl FromIterator<PathSegment> for Stack {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_is_empty() {
        let root = Stack::root();
        assert!(root.is_empty());
        assert_eq!(root.len(), 0);
        assert_eq!(root.to_string(), "(root)");
    }

    #[test]
    fn child_does_not_mutate_parent() {
        let parent = Stack::from(["nested"]);
        let child = parent.child("num");
        assert_eq!(parent, Stack::from(["nested"]));
        assert_eq!(child, Stack::from(["nested", "num"]));
    }

    #[test]
    fn display_joins_fields_and_indices() {
        let stack = Stack::root().child("nested").child("items").index(2).child("num");
        assert_eq!(stack.to_string(), "nested.items[2].num");
    }

    #[test]
    fn display_leading_index() {
        let stack = Stack::root().index(0).child("id");
        assert_eq!(stack.to_string(), "[0].id");
    }

    #[test]
    fn serializes_as_plain_array() {
        let stack = Stack::root().child("a").index(1);
        assert_eq!(serde_json::to_value(&stack).unwrap(), json!(["a", 1]));
        let back: Stack = serde_json::from_value(json!(["a", 1])).unwrap();
        assert_eq!(back, stack);
    }

    #[test]
    fn last_segment() {
        assert_eq!(Stack::root().last(), None);
        assert_eq!(
            Stack::from(["a", "b"]).last(),
            Some(&PathSegment::Field("b".into()))
        );
    }
}
