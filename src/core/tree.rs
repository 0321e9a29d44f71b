//! Path tree index
//!
//! Builds a directory-style tree from the paths of a result list. Nodes are
//! keyed by segment, so records that share a path share nodes.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

use crate::core::model::ResultRecord;

/// A node in the path tree
///
/// `is_result` marks nodes where some record's full path ends. A node can be
/// both a result and a directory (`a/b` and `a/b/c` both indexed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    pub children: BTreeMap<String, TreeNode>,
    pub is_result: bool,
}

/// Split a path into its non-empty segments
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Build the tree for a set of records
pub fn build_tree<'a>(records: impl IntoIterator<Item = &'a ResultRecord>) -> TreeNode {
    let mut root = TreeNode::default();
    for record in records {
        root.insert(&record.path);
    }
    root
}

impl TreeNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a single path. Paths with no segments are ignored.
    pub fn insert(&mut self, path: &str) {
        let mut node = self;
        let mut any = false;
        for segment in segments(path) {
            node = node.children.entry(segment.to_string()).or_default();
            any = true;
        }
        if any {
            node.is_result = true;
        }
    }

    /// Leaf-ness is inferred from the absence of children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, segment: &str) -> Option<&TreeNode> {
        self.children.get(segment)
    }

    /// Follow a '/'-separated path from this node
    pub fn get(&self, path: &str) -> Option<&TreeNode> {
        segments(path).try_fold(self, |node, segment| node.child(segment))
    }

    /// Number of distinct result paths in the tree
    pub fn result_count(&self) -> usize {
        self.children
            .values()
            .map(|c| usize::from(c.is_result) + c.result_count())
            .sum()
    }

    /// Depth-first pre-order walk over all nodes below this one
    pub fn walk(&self) -> Vec<TreeEntry<'_>> {
        let mut out = Vec::new();
        self.walk_into(0, "", &mut out);
        out
    }

    fn walk_into<'a>(&'a self, depth: usize, parent: &str, out: &mut Vec<TreeEntry<'a>>) {
        for (segment, node) in &self.children {
            let filter_path = format!("{}/{}", parent, segment);
            out.push(TreeEntry {
                depth,
                filter_path: filter_path.clone(),
                segment,
                node,
            });
            node.walk_into(depth + 1, &filter_path, out);
        }
    }
}

/// One visited node from [`TreeNode::walk`]
#[derive(Debug, Clone)]
pub struct TreeEntry<'a> {
    pub depth: usize,
    /// "/" + joined segments, the form tree clicks pass as a filter entry
    pub filter_path: String,
    pub segment: &'a str,
    pub node: &'a TreeNode,
}

// Serializes as the plain nested mapping, e.g. {"a":{"b.go":{}}}
impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.children.len()))?;
        for (segment, child) in &self.children {
            map.serialize_entry(segment, child)?;
        }
        map.end()
    }
}
