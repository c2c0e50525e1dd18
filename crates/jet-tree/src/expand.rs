//! Path-keyed expand/collapse state.

use std::collections::HashSet;

use crate::model::{PathSegment, TreePath};

/// Which tree paths are currently shown expanded.
///
/// Keyed by path rather than node identity: when the underlying document is
/// re-fetched, a path that still exists stays expanded. Paths not present
/// read as collapsed. The state is independent of any one [`TreeModel`]
/// and may reference paths the current tree no longer has; those entries
/// are simply inert.
///
/// [`TreeModel`]: crate::model::TreeModel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<TreePath>,
}

impl ExpansionState {
    /// Fresh state with every path collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the node at `path` is expanded. Absent paths are collapsed.
    pub fn is_expanded(&self, path: &[PathSegment]) -> bool {
        self.expanded.contains(path)
    }

    /// A new state with the flag at `path` flipped and every other path
    /// untouched. Toggling the same path twice restores the original state.
    pub fn toggle(&self, path: &[PathSegment]) -> Self {
        let mut next = self.clone();
        if !next.expanded.remove(path) {
            next.expanded.insert(path.to_vec());
        }
        next
    }
}
