//! Recursive outline rendering over a [`TreeModel`].

use serde_json::Value;

use crate::expand::ExpansionState;
use crate::model::{PathSegment, TreeModel, TreePath};

/// One renderable line of the outline.
///
/// Branch rows (mapping keys and sequence indices) carry no value; scalar
/// rows carry the leaf value. Indentation depth falls out of `path.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    /// Full path of the node this row stands for.
    pub path: TreePath,
    /// Last path segment, rendered as the row text.
    pub label: String,
    /// Leaf value for scalar rows, `None` for branch rows.
    pub value: Option<Value>,
}

impl DisplayRow {
    /// Indentation level: top-level rows sit at depth zero.
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Walk `model` and produce the visible rows in display order.
///
/// Every mapping key and sequence index yields one row; the subtree below
/// it is appended only while its path is expanded. A scalar yields a single
/// value row. Pure in all three inputs: nothing is mutated and no I/O
/// happens, so the documentation tree and the live status document share
/// this one traversal.
pub fn outline(model: &TreeModel, expansion: &ExpansionState, path: &[PathSegment]) -> Vec<DisplayRow> {
    let mut rows = Vec::new();
    collect(model, expansion, path, &mut rows);
    rows
}

fn collect(
    model: &TreeModel,
    expansion: &ExpansionState,
    path: &[PathSegment],
    rows: &mut Vec<DisplayRow>,
) {
    match model {
        TreeModel::Scalar(value) => rows.push(DisplayRow {
            path: path.to_vec(),
            label: path.last().map(ToString::to_string).unwrap_or_default(),
            value: Some(value.clone()),
        }),
        TreeModel::Mapping(entries) => {
            for (key, child) in entries {
                descend(child, expansion, path, PathSegment::Key(key.clone()), rows);
            }
        }
        TreeModel::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                descend(child, expansion, path, PathSegment::Index(index), rows);
            }
        }
    }
}

fn descend(
    child: &TreeModel,
    expansion: &ExpansionState,
    path: &[PathSegment],
    segment: PathSegment,
    rows: &mut Vec<DisplayRow>,
) {
    let mut child_path = path.to_vec();
    child_path.push(segment);
    rows.push(DisplayRow {
        label: child_path
            .last()
            .map(ToString::to_string)
            .unwrap_or_default(),
        path: child_path.clone(),
        value: None,
    });
    if expansion.is_expanded(&child_path) {
        collect(child, expansion, &child_path, rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(name: &str) -> PathSegment {
        PathSegment::Key(name.to_string())
    }

    #[test]
    fn empty_mapping_yields_no_rows() {
        let model = TreeModel::classify(json!({}));
        assert!(outline(&model, &ExpansionState::new(), &[]).is_empty());
    }

    #[test]
    fn collapsed_tree_shows_only_top_level() {
        let model = TreeModel::classify(json!({
            "clusters": {"c1": {"g1": true}},
            "version": 3,
            "hosts": [1, 2, 3],
        }));
        let rows = outline(&model, &ExpansionState::new(), &[]);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["clusters", "version", "hosts"]);
        assert!(rows.iter().all(|r| r.value.is_none()));
        assert!(rows.iter().all(|r| r.depth() == 0));
    }

    #[test]
    fn expanding_a_branch_appends_its_subtree_in_place() {
        let model = TreeModel::classify(json!({
            "a": {"inner": 1},
            "b": {"other": 2},
        }));
        let expansion = ExpansionState::new().toggle(&[key("a")]);
        let rows = outline(&model, &expansion, &[]);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "inner", "b"]);
        assert_eq!(rows[1].depth(), 1);
    }

    #[test]
    fn expanding_a_scalar_key_reveals_its_value_row() {
        let model = TreeModel::classify(json!({"port": 9999}));
        let expansion = ExpansionState::new().toggle(&[key("port")]);
        let rows = outline(&model, &expansion, &[]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value, None);
        assert_eq!(rows[1].value, Some(json!(9999)));
        assert_eq!(rows[1].label, "port");
        assert_eq!(rows[1].path, vec![key("port")]);
    }

    #[test]
    fn sequence_indices_are_path_segments() {
        let model = TreeModel::classify(json!({"items": ["x", "y"]}));
        let expansion = ExpansionState::new().toggle(&[key("items")]);
        let rows = outline(&model, &expansion, &[]);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["items", "0", "1"]);
        assert_eq!(rows[1].path, vec![key("items"), PathSegment::Index(0)]);
    }

    #[test]
    fn root_scalar_is_one_value_row() {
        let model = TreeModel::classify(json!("ready"));
        let rows = outline(&model, &ExpansionState::new(), &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "");
        assert_eq!(rows[0].value, Some(json!("ready")));
    }

    #[test]
    fn collapsed_sibling_stays_hidden_while_another_is_open() {
        let model = TreeModel::classify(json!({
            "open": {"x": 1},
            "closed": {"y": 2},
        }));
        let expansion = ExpansionState::new().toggle(&[key("open")]);
        let rows = outline(&model, &expansion, &[]);
        assert!(rows.iter().any(|r| r.label == "x"));
        assert!(!rows.iter().any(|r| r.label == "y"));
    }

    #[test]
    fn expansion_by_path_survives_a_refetched_tree() {
        let expansion = ExpansionState::new().toggle(&[key("stable")]);

        let before = TreeModel::classify(json!({"stable": {"v": 1}}));
        let after = TreeModel::classify(json!({"stable": {"v": 2}, "new": {}}));

        let rows_before = outline(&before, &expansion, &[]);
        let rows_after = outline(&after, &expansion, &[]);
        assert!(rows_before.iter().any(|r| r.label == "v"));
        assert!(rows_after.iter().any(|r| r.label == "v"));
    }

    #[test]
    fn outline_is_deterministic() {
        let model = TreeModel::classify(json!({"b": [1, 2], "a": {"k": true}}));
        let expansion = ExpansionState::new()
            .toggle(&[key("b")])
            .toggle(&[key("a")]);
        assert_eq!(
            outline(&model, &expansion, &[]),
            outline(&model, &expansion, &[])
        );
    }
}
