//! Paths into the state tree.
//!
//! A [`RequestPath`] locates either a tracked request status or a slice of
//! previously fetched data. Segments are strings or integers, mirroring the
//! keys and indices of a JSON document.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single step in a [`RequestPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A number, used as an array index or a numeric entity id.
    Index(i64),
    /// An object key.
    Key(String),
}

impl PathSegment {
    /// Returns the segment rendered as an object key.
    ///
    /// Numeric segments become their decimal form, which is how JSON objects
    /// key numeric entity ids.
    #[must_use]
    pub fn as_key(&self) -> String {
        match self {
            Self::Key(k) => k.clone(),
            Self::Index(i) => i.to_string(),
        }
    }

    /// Returns the segment as an array index, if it is a non-negative number
    /// (or a key spelling one).
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => usize::try_from(*i).ok(),
            Self::Key(k) => k.parse().ok(),
        }
    }

    /// Builds a segment from a JSON scalar.
    pub fn from_value(value: &Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(Self::Key(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Index)
                .ok_or_else(|| crate::Error::InvalidSegment(n.to_string())),
            other => Err(crate::Error::InvalidSegment(other.to_string())),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => f.write_str(k),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(s: &str) -> Self {
        Self::Key(s.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(s: String) -> Self {
        Self::Key(s)
    }
}

impl From<&String> for PathSegment {
    fn from(s: &String) -> Self {
        Self::Key(s.clone())
    }
}

impl From<i64> for PathSegment {
    fn from(i: i64) -> Self {
        Self::Index(i)
    }
}

impl From<i32> for PathSegment {
    fn from(i: i32) -> Self {
        Self::Index(i64::from(i))
    }
}

impl From<u32> for PathSegment {
    fn from(i: u32) -> Self {
        Self::Index(i64::from(i))
    }
}

/// Ordered key sequence identifying a request slot or a state slice.
///
/// Two paths are equal iff their segment sequences are equal, so
/// `["users", 42]` and `["users", "42"]` are distinct paths even though both
/// resolve to the same object key in the state tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestPath(Vec<PathSegment>);

impl RequestPath {
    /// Creates an empty path (the tree root).
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Creates a path from segments.
    #[must_use]
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// Returns the segments of this path.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a segment in place.
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    /// Returns a new path with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// Returns a new path with all of `other`'s segments appended.
    #[must_use]
    pub fn join(&self, other: &RequestPath) -> Self {
        let mut segments = self.0.clone();
        segments.extend(other.0.iter().cloned());
        Self(segments)
    }

    /// Iterates over the segments.
    pub fn iter(&self) -> impl Iterator<Item = &PathSegment> {
        self.0.iter()
    }

    /// Parses a path from a JSON array of strings and numbers.
    pub fn from_value(value: &Value) -> crate::Result<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(PathSegment::from_value)
                .collect::<crate::Result<Vec<_>>>()
                .map(Self),
            other => Err(crate::Error::InvalidSegment(other.to_string())),
        }
    }

    /// Renders the path as a JSON array.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|s| match s {
                    PathSegment::Key(k) => Value::String(k.clone()),
                    PathSegment::Index(i) => Value::from(*i),
                })
                .collect(),
        )
    }
}

impl fmt::Display for RequestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for RequestPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<PathSegment>, const N: usize> From<[S; N]> for RequestPath {
    fn from(segments: [S; N]) -> Self {
        segments.into_iter().collect()
    }
}

impl From<Vec<PathSegment>> for RequestPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl<'a> IntoIterator for &'a RequestPath {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
