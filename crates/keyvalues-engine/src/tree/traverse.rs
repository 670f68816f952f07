//! Navigation and pre-order traversal.
//!
//! Traversal is iterative. [`Tree::next_traverse_step`] moves one step in
//! document order and keeps a depth counter in sync, which is what the
//! serializer and the search cursor are built on.

use crate::tree::{NodeId, Tree};

impl Tree {
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.parent
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.first_child
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.next
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.prev
    }

    /// Head of the chain `id` belongs to.
    pub fn first_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut head = id;
        while let Some(prev) = self.nodes.get(head)?.prev {
            head = prev;
        }
        Some(head)
    }

    /// Tail of the chain `id` belongs to.
    pub fn last_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut tail = id;
        while let Some(next) = self.nodes.get(tail)?.next {
            tail = next;
        }
        Some(tail)
    }

    /// Number of parent links between `id` and the top level.
    pub fn level(&self, id: NodeId) -> Option<usize> {
        let mut level = 0;
        let mut cursor = self.nodes.get(id)?.parent;
        while let Some(parent) = cursor {
            level += 1;
            cursor = self.nodes.get(parent)?.parent;
        }
        Some(level)
    }

    /// Length of the whole chain `id` belongs to, `id` included.
    pub fn count_siblings(&self, id: NodeId) -> usize {
        self.first_sibling(id)
            .map_or(0, |first| self.siblings(first).count())
    }

    /// `id` and the siblings after it.
    pub fn siblings(&self, id: NodeId) -> Siblings<'_> {
        Siblings {
            tree: self,
            next: self.contains(id).then_some(id),
        }
    }

    pub fn children(&self, id: NodeId) -> Siblings<'_> {
        Siblings {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// The node after `id` in document order.
    ///
    /// Goes to the first child (`depth + 1`) when there is one, else to the
    /// next sibling, else up the parent chain (`depth - 1` per level) to the
    /// first ancestor that has a next sibling and returns that sibling.
    /// `None` when the walk runs off the top of the tree.
    pub fn next_traverse_step(&self, id: NodeId, depth: &mut isize) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        if let Some(child) = node.first_child {
            *depth += 1;
            return Some(child);
        }
        if let Some(next) = node.next {
            return Some(next);
        }

        let mut cursor = node.parent;
        while let Some(ancestor) = cursor {
            *depth -= 1;
            let ancestor = self.nodes.get(ancestor)?;
            if let Some(next) = ancestor.next {
                return Some(next);
            }
            cursor = ancestor.parent;
        }
        None
    }

    /// Every node reachable from the root in document order, with its depth.
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse {
            tree: self,
            next: Some(self.root),
            depth: 0,
        }
    }
}

/// Iterator over a sibling chain.
pub struct Siblings<'t> {
    tree: &'t Tree,
    next: Option<NodeId>,
}

impl Iterator for Siblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}

/// Pre-order iterator yielding `(node, depth)`.
pub struct Traverse<'t> {
    tree: &'t Tree,
    next: Option<NodeId>,
    depth: isize,
}

impl Iterator for Traverse<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let depth = usize::try_from(self.depth).unwrap_or(0);
        self.next = self.tree.next_traverse_step(current, &mut self.depth);
        Some((current, depth))
    }
}
