//! Tagged representation of arbitrary nested data.

use std::fmt;

use serde_json::Value;

/// One step from a tree's root to a node: a mapping key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Mapping key.
    Key(String),
    /// Sequence index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Ordered segments from the root of a tree down to one node.
pub type TreePath = Vec<PathSegment>;

/// A classified view of nested data.
///
/// Built once from a decoded response body; immutable afterwards. A
/// re-fetch produces a fresh tree, never an in-place patch.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeModel {
    /// A leaf value (null, bool, number, string).
    Scalar(Value),
    /// An ordered list of children.
    Sequence(Vec<TreeModel>),
    /// Key/child pairs in document order, keys unique.
    Mapping(Vec<(String, TreeModel)>),
}

impl TreeModel {
    /// Classify decoded JSON into the tagged variants.
    ///
    /// Objects become [`TreeModel::Mapping`] with field order preserved,
    /// arrays become [`TreeModel::Sequence`], everything else is a
    /// [`TreeModel::Scalar`]. Nesting depth is bounded only by memory.
    pub fn classify(raw: Value) -> Self {
        match raw {
            Value::Object(fields) => Self::Mapping(
                fields
                    .into_iter()
                    .map(|(key, child)| (key, Self::classify(child)))
                    .collect(),
            ),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::classify).collect()),
            scalar => Self::Scalar(scalar),
        }
    }

    /// Look up a direct child of a mapping by key.
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Mapping(entries) => entries
                .iter()
                .find(|(entry_key, _)| entry_key == key)
                .map(|(_, child)| child),
            _ => None,
        }
    }

    /// Mapping entries in document order, or `None` for other variants.
    pub fn entries(&self) -> Option<&[(String, Self)]> {
        match self {
            Self::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Scalar boolean value, if this node is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scalar(Value::Bool(flag)) => Some(*flag),
            _ => None,
        }
    }
}
