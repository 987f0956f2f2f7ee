use std::cmp::Ordering;

use crate::dataset::{DatasetError, RawNode};
use crate::layout::Rect;

pub type NodeId = usize;

/// A node of the aggregated tree. `rect` stays zeroed until the layout
/// engine runs.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    /// Resolved for every leaf: explicit `category`, else the name of the
    /// depth-1 group the leaf sits under, else the leaf's own name.
    pub category: Option<String>,
    pub ext_id: Option<String>,
    pub aggregate: f64,
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub rect: Rect,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-allocated tree with bottom-up aggregates. Built once per dataset,
/// immutable after layout, replaced wholesale on the next load.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<TreeNode>,
    categories: Vec<String>,
}

impl Hierarchy {
    /// Wraps the raw dataset without mutating it. Child lists are sorted
    /// descending by aggregate; equal aggregates keep their input order so
    /// slicing decisions stay reproducible.
    pub fn build(raw: &RawNode) -> Result<Self, DatasetError> {
        let mut tree = Self {
            nodes: Vec::new(),
            categories: Vec::new(),
        };
        tree.insert(raw, None, 0, "", None)?;
        Ok(tree)
    }

    fn insert(
        &mut self,
        raw: &RawNode,
        parent: Option<NodeId>,
        depth: usize,
        parent_path: &str,
        group: Option<&str>,
    ) -> Result<NodeId, DatasetError> {
        if raw.name.trim().is_empty() {
            let path = if parent_path.is_empty() {
                "(root)".to_string()
            } else {
                parent_path.to_string()
            };
            return Err(DatasetError::EmptyName { path });
        }
        let path = if parent_path.is_empty() {
            raw.name.clone()
        } else {
            format!("{parent_path}/{}", raw.name)
        };

        let id = self.nodes.len();
        self.nodes.push(TreeNode {
            name: raw.name.clone(),
            category: None,
            ext_id: raw.id.clone(),
            aggregate: 0.0,
            depth,
            parent,
            children: Vec::new(),
            rect: Rect::default(),
        });

        match raw.children.as_deref() {
            Some([]) => return Err(DatasetError::EmptyChildren { path }),
            Some(children) => {
                let mut child_ids = Vec::with_capacity(children.len());
                let mut sum = 0.0;
                for child in children {
                    let child_group = if depth == 0 {
                        Some(child.name.as_str())
                    } else {
                        group
                    };
                    let child_id = self.insert(child, Some(id), depth + 1, &path, child_group)?;
                    sum += self.nodes[child_id].aggregate;
                    child_ids.push(child_id);
                }
                // Vec::sort_by is stable, so ties keep their input order.
                child_ids.sort_by(|a, b| {
                    self.nodes[*b]
                        .aggregate
                        .partial_cmp(&self.nodes[*a].aggregate)
                        .unwrap_or(Ordering::Equal)
                });
                let node = &mut self.nodes[id];
                node.children = child_ids;
                node.aggregate = sum;
            }
            None => {
                let value = raw
                    .value
                    .ok_or_else(|| DatasetError::MissingLeafValue { path: path.clone() })?;
                if !value.is_finite() || value < 0.0 {
                    return Err(DatasetError::InvalidLeafValue { path, value });
                }
                let category = raw
                    .category
                    .clone()
                    .or_else(|| group.map(str::to_string))
                    .unwrap_or_else(|| raw.name.clone());
                if !self.categories.iter().any(|seen| *seen == category) {
                    self.categories.push(category.clone());
                }
                let node = &mut self.nodes[id];
                node.aggregate = value;
                node.category = Some(category);
            }
        }
        Ok(id)
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sum of every leaf value in the dataset.
    pub fn total_value(&self) -> f64 {
        self.nodes[self.root()].aggregate
    }

    /// Distinct leaf categories in first-seen input order. Recorded before
    /// child sorting, so the color domain does not depend on values.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Leaf ids in layout order (preorder over the sorted child lists).
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.is_leaf() {
                out.push(id);
            } else {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_dataset;

    fn funding_fixture() -> RawNode {
        parse_dataset(
            r#"{
                "name": "Funding",
                "children": [
                    {"name": "Games", "children": [
                        {"name": "Starlight", "category": "Games", "value": 300.0},
                        {"name": "Mothership", "category": "Games", "value": 100.0}
                    ]},
                    {"name": "Design", "children": [
                        {"name": "Teapot", "category": "Design", "value": 250.0}
                    ]}
                ]
            }"#,
        )
        .expect("fixture parse failed")
    }

    #[test]
    fn aggregates_sum_leaf_values() {
        let tree = Hierarchy::build(&funding_fixture()).expect("build failed");
        assert_eq!(tree.total_value(), 650.0);
        let root = tree.node(tree.root());
        let child_sum: f64 = root
            .children
            .iter()
            .map(|&id| tree.node(id).aggregate)
            .sum();
        assert_eq!(child_sum, root.aggregate);
    }

    #[test]
    fn children_sorted_descending() {
        let tree = Hierarchy::build(&funding_fixture()).expect("build failed");
        let root = tree.node(tree.root());
        let values: Vec<f64> = root
            .children
            .iter()
            .map(|&id| tree.node(id).aggregate)
            .collect();
        assert_eq!(values, vec![400.0, 250.0]);
    }

    #[test]
    fn equal_values_keep_input_order() {
        let raw = parse_dataset(
            r#"{
                "name": "root",
                "children": [
                    {"name": "first", "value": 10},
                    {"name": "second", "value": 10},
                    {"name": "third", "value": 10}
                ]
            }"#,
        )
        .unwrap();
        let tree = Hierarchy::build(&raw).expect("build failed");
        let names: Vec<&str> = tree
            .node(tree.root())
            .children
            .iter()
            .map(|&id| tree.node(id).name.as_str())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn categories_follow_input_order() {
        let tree = Hierarchy::build(&funding_fixture()).expect("build failed");
        assert_eq!(tree.categories(), ["Games", "Design"]);
    }

    #[test]
    fn leaf_without_category_inherits_group_name() {
        let raw = parse_dataset(
            r#"{
                "name": "root",
                "children": [
                    {"name": "Comics", "children": [
                        {"name": "Inkwell", "value": 5}
                    ]}
                ]
            }"#,
        )
        .unwrap();
        let tree = Hierarchy::build(&raw).expect("build failed");
        let leaves = tree.leaves();
        assert_eq!(tree.node(leaves[0]).category.as_deref(), Some("Comics"));
    }

    #[test]
    fn parent_links_are_consistent() {
        let tree = Hierarchy::build(&funding_fixture()).expect("build failed");
        assert!(tree.node(tree.root()).parent.is_none());
        for id in 0..tree.len() {
            for &child in &tree.node(id).children {
                assert_eq!(tree.node(child).parent, Some(id));
                assert_eq!(tree.node(child).depth, tree.node(id).depth + 1);
            }
        }
    }

    #[test]
    fn leaf_without_value_fails() {
        let raw = parse_dataset(r#"{"name": "root", "children": [{"name": "hole"}]}"#).unwrap();
        assert!(matches!(
            Hierarchy::build(&raw),
            Err(DatasetError::MissingLeafValue { .. })
        ));
    }

    #[test]
    fn negative_leaf_value_fails() {
        let raw =
            parse_dataset(r#"{"name": "root", "children": [{"name": "bad", "value": -3}]}"#)
                .unwrap();
        assert!(matches!(
            Hierarchy::build(&raw),
            Err(DatasetError::InvalidLeafValue { .. })
        ));
    }

    #[test]
    fn empty_children_fails() {
        let raw = parse_dataset(r#"{"name": "root", "children": []}"#).unwrap();
        assert!(matches!(
            Hierarchy::build(&raw),
            Err(DatasetError::EmptyChildren { .. })
        ));
    }

    #[test]
    fn blank_name_fails() {
        let raw =
            parse_dataset(r#"{"name": "root", "children": [{"name": "  ", "value": 1}]}"#).unwrap();
        assert!(matches!(
            Hierarchy::build(&raw),
            Err(DatasetError::EmptyName { .. })
        ));
    }

    #[test]
    fn zero_valued_leaf_is_accepted() {
        let raw =
            parse_dataset(r#"{"name": "root", "children": [{"name": "empty", "value": 0}]}"#)
                .unwrap();
        let tree = Hierarchy::build(&raw).expect("build failed");
        assert_eq!(tree.total_value(), 0.0);
    }
}
