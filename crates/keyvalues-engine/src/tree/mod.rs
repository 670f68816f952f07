//! # Document Tree
//!
//! A KeyValues document held as an arena of nodes. Every node has an optional
//! key, an optional value and four links:
//!
//! ```text
//!            parent
//!              │
//!   prev ◄── node ──► next        siblings form a doubly linked chain
//!              │
//!         first_child             head of the chain of children
//! ```
//!
//! Nodes live in a [`SlotMap`] and are addressed by [`NodeId`], a
//! generational key. A link is just an `Option<NodeId>`, so the tree owns
//! every node and ids are plain copyable handles. Removing a node bumps the
//! slot's generation, which makes every stale id fail [`Tree::contains`].
//!
//! A tree always has a root. It is the head of the top-level chain (the
//! chain of nodes without a parent) and survives [`Tree::delete_node`]; only
//! [`Tree::clear`] or dropping the tree releases it. A fresh tree's root is
//! an empty placeholder node.
//!
//! The structural operations live in [`edit`], navigation in [`traverse`].
//! All of them treat an unknown id as a no-op and report it through their
//! return value instead of panicking.
//!
//! Ids are only meaningful for the tree that created them; an id from
//! another tree may alias one of this tree's nodes.

pub mod edit;
#[cfg(test)]
pub(crate) mod invariants;
pub mod traverse;

use slotmap::{Key, KeyData, SlotMap, new_key_type};

pub use edit::{Position, SortKey};
pub use traverse::{Siblings, Traverse};

new_key_type! {
    /// Handle to a node of a [`Tree`].
    pub struct NodeId;
}

impl NodeId {
    /// Stable numeric form of this id, for callers that cannot hold a
    /// `NodeId`. See [`Tree::node_by_handle`].
    pub fn handle(self) -> u64 {
        self.data().as_ffi()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    key: Option<String>,
    value: Option<String>,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    next: Option<NodeId>,
    prev: Option<NodeId>,
}

impl Node {
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next
    }

    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev
    }

    fn is_detached(&self) -> bool {
        self.parent.is_none() && self.next.is_none() && self.prev.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// A tree holding only an empty placeholder root.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::default());
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds nothing but an empty root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.is_placeholder(self.root)
    }

    /// Whether `id` is a live node of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn key(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).and_then(Node::key)
    }

    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).and_then(Node::value)
    }

    /// Look a node up by the number returned from [`NodeId::handle`].
    pub fn node_by_handle(&self, handle: u64) -> Option<NodeId> {
        let id = NodeId::from(KeyData::from_ffi(handle));
        self.contains(id).then_some(id)
    }

    /// A new detached node with neither key nor value.
    pub fn create_node(&mut self) -> NodeId {
        self.nodes.insert(Node::default())
    }

    /// A new detached node.
    pub fn create_node_with(&mut self, key: &str, value: Option<&str>) -> NodeId {
        self.nodes.insert(Node {
            key: Some(key.to_string()),
            value: value.map(str::to_string),
            ..Node::default()
        })
    }

    pub fn set_key(&mut self, id: NodeId, key: impl Into<String>) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.key = Some(key.into());
                true
            }
            None => false,
        }
    }

    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.value = Some(value.into());
                true
            }
            None => false,
        }
    }

    pub fn clear_value(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.value = None;
                true
            }
            None => false,
        }
    }

    /// Drop every node and start over with an empty root. Every id handed
    /// out so far becomes stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.insert(Node::default());
    }

    /// Whether `id` is an empty node with no links at all.
    pub(crate) fn is_placeholder(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| {
            node.key.is_none()
                && node.value.is_none()
                && node.first_child.is_none()
                && node.is_detached()
        })
    }

    /// Make the detached node `id` the root, dropping the old root if it is
    /// an empty placeholder.
    pub(crate) fn replace_root(&mut self, id: NodeId) -> bool {
        if !self.nodes.get(id).is_some_and(Node::is_detached) {
            return false;
        }
        if self.is_placeholder(self.root) {
            self.nodes.remove(self.root);
            self.root = id;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_tree_has_placeholder_root() {
        let tree = Tree::new();
        assert_eq!(tree.len(), 1);
        assert!(tree.is_empty());
        assert!(tree.contains(tree.root()));
        assert_eq!(tree.key(tree.root()), None);
    }

    #[test]
    fn created_nodes_are_detached() {
        let mut tree = Tree::new();
        let node = tree.create_node_with("name", Some("value"));
        let data = tree.node(node).unwrap();
        assert_eq!(data.key(), Some("name"));
        assert_eq!(data.value(), Some("value"));
        assert_eq!(data.parent(), None);
        assert_eq!(data.next_sibling(), None);
        assert_eq!(tree.len(), 2);
        assert!(!tree.is_empty());
    }

    #[test]
    fn set_and_clear_fields() {
        let mut tree = Tree::new();
        let node = tree.create_node();
        assert!(tree.set_key(node, "k"));
        assert!(tree.set_value(node, "v"));
        assert_eq!(tree.value(node), Some("v"));
        assert!(tree.clear_value(node));
        assert_eq!(tree.value(node), None);
        assert_eq!(tree.key(node), Some("k"));
    }

    #[test]
    fn handles_round_trip() {
        let mut tree = Tree::new();
        let node = tree.create_node();
        assert_eq!(tree.node_by_handle(node.handle()), Some(node));
        assert_eq!(tree.node_by_handle(0), None);
    }

    #[test]
    fn stale_ids_are_rejected() {
        let mut tree = Tree::new();
        let node = tree.create_node();
        let handle = node.handle();
        tree.clear();
        assert!(!tree.contains(node));
        assert!(!tree.set_key(node, "k"));
        assert_eq!(tree.node_by_handle(handle), None);
        assert!(tree.contains(tree.root()));
    }

    #[test]
    fn replace_root_only_drops_a_placeholder() {
        let mut tree = Tree::new();
        let old = tree.root();
        let first = tree.create_node_with("first", None);
        assert!(tree.replace_root(first));
        assert!(!tree.contains(old));
        assert_eq!(tree.root(), first);

        let second = tree.create_node_with("second", None);
        assert!(!tree.replace_root(second));
        assert_eq!(tree.root(), first);
    }
}
