//! # Document Paths
//!
//! A [`JsonPath`] is the ordered list of segments that locates a node inside
//! the root API document, e.g. `["paths", "/pets", "get", "parameters", 0,
//! "schema"]`. Every diagnostic carries one.
//!
//! ## Invariant
//!
//! A path attached to a diagnostic must resolve (via [`JsonPath::resolve`])
//! against the root document to the flagged node or its closest addressable
//! ancestor. Paths are never mutated in place: traversals extend them with
//! [`JsonPath::child`], which returns a new path.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One step in a [`JsonPath`].
///
/// Serialized untagged so that a path round-trips through JSON as a plain
/// array of strings and integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Position inside a JSON array.
    Index(usize),
    /// Key inside a JSON object.
    Key(String),
}

impl PathSegment {
    /// Returns the key if this is a [`PathSegment::Key`].
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(k) => Some(k.as_str()),
            Self::Index(_) => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Key(k) => f.write_str(k),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&String> for PathSegment {
    fn from(key: &String) -> Self {
        Self::Key(key.clone())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Location of a node within a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPath(Vec<PathSegment>);

impl JsonPath {
    /// The empty path, addressing the document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns a new path with `segment` appended. `self` is left untouched.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(segment.into());
        Self(segments)
    }

    /// Returns a new path with every segment of `segments` appended.
    pub fn join<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        let mut joined = self.clone();
        joined.0.extend(segments.into_iter().map(Into::into));
        joined
    }

    /// The path of the enclosing node, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    /// The trailing segment when it is an object key.
    pub fn last_key(&self) -> Option<&str> {
        self.0.last().and_then(PathSegment::as_key)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if any segment is the object key `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|s| s.as_key() == Some(key))
    }

    /// Re-apply this path to `root`.
    ///
    /// Key segments also address array elements when they hold a stringified
    /// integer, and index segments address object keys by their decimal form,
    /// so paths built by either convention resolve the same way.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.0 {
            current = match (segment, current) {
                (PathSegment::Key(k), Value::Object(map)) => map.get(k)?,
                (PathSegment::Key(k), Value::Array(items)) => items.get(k.parse::<usize>().ok()?)?,
                (PathSegment::Index(i), Value::Array(items)) => items.get(*i)?,
                (PathSegment::Index(i), Value::Object(map)) => map.get(&i.to_string())?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Render as an RFC 6901 JSON Pointer.
    pub fn to_pointer(&self) -> String {
        let mut pointer = String::new();
        for segment in &self.0 {
            pointer.push('/');
            match segment {
                PathSegment::Index(i) => pointer.push_str(&i.to_string()),
                PathSegment::Key(k) => pointer.push_str(&k.replace('~', "~0").replace('/', "~1")),
            }
        }
        pointer
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl From<Vec<PathSegment>> for JsonPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for JsonPath {
    fn from(keys: &[&str]) -> Self {
        Self(keys.iter().map(|k| PathSegment::from(*k)).collect())
    }
}

impl<const N: usize> From<[&str; N]> for JsonPath {
    fn from(keys: [&str; N]) -> Self {
        Self(keys.iter().map(|k| PathSegment::from(*k)).collect())
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for JsonPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Build a [`JsonPath`] from keys and indices.
///
/// ```
/// use oaslint_core::json_path;
///
/// let path = json_path!["paths", "/pets", "get", "parameters", 0usize];
/// assert_eq!(path.to_string(), "paths./pets.get.parameters.0");
/// assert!(json_path![].is_empty());
/// ```
#[macro_export]
macro_rules! json_path {
    () => {
        $crate::JsonPath::root()
    };
    ($($segment:expr),+ $(,)?) => {
        $crate::JsonPath::from(vec![$($crate::PathSegment::from($segment)),+])
    };
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = PathSegment> {
        prop_oneof![
            (0usize..64).prop_map(PathSegment::Index),
            "[a-zA-Z/~{}_]{0,12}".prop_map(PathSegment::Key),
        ]
    }

    proptest! {
        /// Appending a segment and taking the parent gives back the original path.
        #[test]
        fn child_then_parent_is_identity(
            segments in prop::collection::vec(segment(), 0..8),
            next in segment(),
        ) {
            let path = JsonPath::from(segments);
            let child = path.child(next.clone());
            prop_assert_eq!(child.last(), Some(&next));
            prop_assert_eq!(child.parent(), Some(path));
        }

        /// Paths survive a JSON round-trip unchanged.
        #[test]
        fn serde_roundtrip(segments in prop::collection::vec(segment(), 0..8)) {
            let path = JsonPath::from(segments);
            let encoded = serde_json::to_string(&path).unwrap();
            let decoded: JsonPath = serde_json::from_str(&encoded).unwrap();
            prop_assert_eq!(decoded, path);
        }
    }
}
