//! Serializable copies of the built part of a tree.

use crate::node::{NodeId, NodeKind};
use crate::tree::ObjectTree;
use serde::Serialize;

/// One node and its built descendants, detached from the arena.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSnapshot {
    /// Display text
    pub caption: String,
    /// Symbolic kind
    pub kind: NodeKind,
    /// Effective object number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_number: Option<u32>,
    /// Whether the node is a recursive reference
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub recursive: bool,
    /// Children, in tree order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

impl ObjectTree<'_> {
    /// Copy the already built subtree below `id`, `depth` levels deep.
    ///
    /// Never expands anything; unexpanded nodes appear without children.
    pub fn snapshot(&self, id: NodeId, depth: usize) -> Option<NodeSnapshot> {
        let node = self.get(id)?;
        let children = if depth == 0 {
            Vec::new()
        } else {
            node.children()
                .iter()
                .filter_map(|child| self.snapshot(*child, depth - 1))
                .collect()
        };
        Some(NodeSnapshot {
            caption: node.caption().to_string(),
            kind: node.kind(),
            object_number: node.effective_number(),
            recursive: node.is_recursive(),
            children,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::object::Object;
    use crate::resolver::ObjectStore;
    use crate::tree::ObjectTree;

    #[test]
    fn test_snapshot_only_built_nodes() {
        let store = ObjectStore::new();
        let dict = Object::dictionary([("Kids", Object::Array(vec![Object::Integer(1)]))]);
        let mut tree = ObjectTree::with_root(&store, &dict);
        let root = tree.root();

        let unexpanded = tree.snapshot(root, 5).unwrap();
        assert!(unexpanded.children.is_empty());

        tree.expand_to_depth(root, 5).unwrap();
        let snapshot = tree.snapshot(root, 1).unwrap();
        assert_eq!(snapshot.children.len(), 1);
        assert_eq!(snapshot.children[0].caption, "Kids: [1]");
        assert!(snapshot.children[0].children.is_empty());
    }
}
