//! Structural edits: attaching, moving, sorting and deleting nodes.
//!
//! Every operation first checks that the ids it was given are live. Edits
//! that would make a node its own ancestor are refused. A node that is
//! already attached somewhere is unlinked before it is attached again, and
//! the tree root is kept at the head of the top-level chain afterwards.

use std::cmp::Ordering;

use crate::tree::{NodeId, Tree};
use crate::value::parse_int;

/// Field used to order siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Key,
    Value,
}

/// Where [`Tree::move_to_branch`] puts the moved node relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Before,
    After,
}

impl Tree {
    /// Attach `node` as the new tail of the chain `anchor` belongs to. It
    /// takes `anchor`'s parent.
    pub fn append_sibling(&mut self, anchor: NodeId, node: NodeId) -> bool {
        if !self.can_link(anchor, node) {
            return false;
        }
        self.unlink(node);

        let Some(last) = self.last_sibling(anchor) else {
            return false;
        };
        let parent = self.nodes[anchor].parent;
        self.nodes[last].next = Some(node);
        let moved = &mut self.nodes[node];
        moved.prev = Some(last);
        moved.parent = parent;

        self.refresh_root();
        true
    }

    /// Attach `node` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> bool {
        if !self.can_link(parent, node) {
            return false;
        }
        self.unlink(node);

        match self.nodes[parent].first_child {
            Some(first) => {
                let Some(last) = self.last_sibling(first) else {
                    return false;
                };
                self.nodes[last].next = Some(node);
                self.nodes[node].prev = Some(last);
            }
            None => self.nodes[parent].first_child = Some(node),
        }
        self.nodes[node].parent = Some(parent);

        self.refresh_root();
        true
    }

    /// Move `node` to the end of `new_parent`'s children. Nothing happens if
    /// it already is a direct child of `new_parent`.
    pub fn move_as_child(&mut self, new_parent: NodeId, node: NodeId) -> bool {
        if self.parent(node) == Some(new_parent) {
            return false;
        }
        self.append_child(new_parent, node)
    }

    /// Move `node` right before or after `anchor`, into `anchor`'s chain.
    pub fn move_to_branch(&mut self, anchor: NodeId, node: NodeId, position: Position) -> bool {
        if !self.can_link(anchor, node) {
            return false;
        }
        self.unlink(node);

        let parent = self.nodes[anchor].parent;
        match position {
            Position::After => {
                let next = self.nodes[anchor].next;
                self.nodes[anchor].next = Some(node);
                if let Some(next) = next {
                    self.nodes[next].prev = Some(node);
                }
                let moved = &mut self.nodes[node];
                moved.prev = Some(anchor);
                moved.next = next;
            }
            Position::Before => {
                let prev = self.nodes[anchor].prev;
                self.nodes[anchor].prev = Some(node);
                match prev {
                    Some(prev) => self.nodes[prev].next = Some(node),
                    None => {
                        if let Some(parent) = parent {
                            self.nodes[parent].first_child = Some(node);
                        }
                    }
                }
                let moved = &mut self.nodes[node];
                moved.prev = prev;
                moved.next = Some(anchor);
            }
        }
        self.nodes[node].parent = parent;

        self.refresh_root();
        true
    }

    /// Remove `node` together with its whole subtree. Its former neighbours
    /// are linked to each other.
    ///
    /// The root itself is never removed: deleting it drops its descendants
    /// and keeps the root in place.
    pub fn delete_node(&mut self, node: NodeId) -> bool {
        if !self.contains(node) {
            return false;
        }
        let keep = node == self.root;
        if !keep {
            self.unlink(node);
        }

        // free bottom-up, always taking the leftmost leaf left under `node`
        let mut current = node;
        loop {
            if let Some(child) = self.nodes.get(current).and_then(|n| n.first_child) {
                current = child;
                continue;
            }
            if current == node {
                break;
            }
            let Some(leaf) = self.nodes.remove(current) else {
                break;
            };
            if let Some(parent) = leaf.parent
                && let Some(parent) = self.nodes.get_mut(parent)
            {
                parent.first_child = leaf.next;
            }
            if let Some(next) = leaf.next
                && let Some(next) = self.nodes.get_mut(next)
            {
                next.prev = None;
            }
            current = leaf.next.or(leaf.parent).unwrap_or(node);
        }

        if !keep {
            self.nodes.remove(node);
        }
        true
    }

    /// Stable sort of the whole chain containing `anchor`. Missing fields
    /// sort last. Returns the new head of the chain.
    ///
    /// With `numeric`, fields are compared by their leading integer, so text
    /// that is not a number counts as 0.
    pub fn sort_siblings(&mut self, anchor: NodeId, by: SortKey, numeric: bool) -> Option<NodeId> {
        let first = self.first_sibling(anchor)?;
        let parent = self.nodes[first].parent;

        let mut chain = Vec::new();
        let mut cursor = Some(first);
        while let Some(id) = cursor {
            chain.push(id);
            cursor = self.nodes[id].next;
        }

        let nodes = &self.nodes;
        let field = move |id: NodeId| match by {
            SortKey::Key => nodes[id].key.as_deref(),
            SortKey::Value => nodes[id].value.as_deref(),
        };
        chain.sort_by(|&a, &b| match (field(a), field(b)) {
            (Some(a), Some(b)) if numeric => parse_int(a).cmp(&parse_int(b)),
            (Some(a), Some(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        for (index, &id) in chain.iter().enumerate() {
            let node = &mut self.nodes[id];
            node.prev = index.checked_sub(1).map(|i| chain[i]);
            node.next = chain.get(index + 1).copied();
        }

        let head = chain[0];
        match parent {
            Some(parent) => self.nodes[parent].first_child = Some(head),
            None if first == self.root => self.root = head,
            None => {}
        }
        Some(head)
    }

    /// Unlink `node` from its parent and siblings. Its subtree stays with it.
    ///
    /// Detaching the root hands the root role to its next sibling; a root
    /// without siblings stays the root.
    pub fn detach(&mut self, node: NodeId) -> bool {
        if !self.contains(node) {
            return false;
        }
        self.unlink(node);
        true
    }

    /// Both ids are live and linking `node` next to or under `target` keeps
    /// the tree acyclic.
    fn can_link(&self, target: NodeId, node: NodeId) -> bool {
        self.contains(target) && self.contains(node) && !self.is_ancestor_or_self(node, target)
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        if ancestor == node {
            return true;
        }
        // a childless node is nobody's ancestor
        if self.nodes.get(ancestor).is_none_or(|n| n.first_child.is_none()) {
            return false;
        }
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    fn unlink(&mut self, node: NodeId) {
        let Some(data) = self.nodes.get(node) else {
            return;
        };
        let (parent, prev, next) = (data.parent, data.prev, data.next);

        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => {
                if let Some(parent) = parent {
                    self.nodes[parent].first_child = next;
                } else if node == self.root
                    && let Some(next) = next
                {
                    self.root = next;
                }
            }
        }
        if let Some(next) = next {
            self.nodes[next].prev = prev;
        }

        let data = &mut self.nodes[node];
        data.parent = None;
        data.prev = None;
        data.next = None;
    }

    /// Walk from the current root to the head of the top-level chain it now
    /// sits in.
    fn refresh_root(&mut self) {
        let mut head = self.root;
        loop {
            let Some(node) = self.nodes.get(head) else {
                return;
            };
            match (node.parent, node.prev) {
                (Some(parent), _) => head = parent,
                (None, Some(prev)) => head = prev,
                (None, None) => break,
            }
        }
        self.root = head;
    }
}
