//! # Level-Scoped Search
//!
//! A [`SearchCursor`] walks a tree in document order looking for nodes whose
//! key (or value) equals a pattern. The pattern `*` matches any node that
//! has the field at all.
//!
//! When the search is restricted to one level the walk is pruned. Nothing
//! below the target level can match, so instead of descending the cursor
//! jumps:
//!
//! ```text
//! miss at the target level, has a next sibling → that sibling
//! otherwise                                    → climb to the nearest ancestor
//!                                                at or above the target level
//!                                                that has a next sibling
//! ```
//!
//! and the search ends when no such ancestor exists.
//!
//! Resuming after a hit goes through [`SearchCursor::find_next_node`] with
//! the previous hit:
//!
//! ```
//! use keyvalues_engine::search::{MatchField, SearchCursor, SearchOptions};
//! use keyvalues_engine::build_tree_from_str;
//! use keyvalues_syntax::NullLogger;
//!
//! let tree = build_tree_from_str("doc", "\"r\" { \"a\" \"1\" \"b\" \"2\" }", &mut NullLogger).unwrap();
//! let mut cursor = SearchCursor::new();
//! cursor.set_search(&tree, "*", SearchOptions { level: Some(1), ..SearchOptions::default() });
//!
//! let mut hits = Vec::new();
//! let mut last = None;
//! while let Some(node) = cursor.find_next_node(last) {
//!     hits.push(tree.key(node).unwrap());
//!     last = Some(node);
//! }
//! assert_eq!(hits, vec!["a", "b"]);
//! ```

use crate::tree::{NodeId, Tree};

/// Which field of a node the pattern is compared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchField {
    #[default]
    Key,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    pub field: MatchField,
    /// ASCII-only case folding.
    pub case_insensitive: bool,
    /// Only nodes at this level match; `None` searches every level.
    pub level: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchCursor<'t> {
    tree: Option<&'t Tree>,
    pattern: String,
    options: SearchOptions,
    cursor: Option<NodeId>,
    depth: isize,
    /// Set when a walk ran off the end; cleared by a restart or re-anchor.
    exhausted: bool,
}

impl<'t> SearchCursor<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the pattern and position. The target tree is kept.
    pub fn reset(&mut self) {
        self.pattern.clear();
        self.options = SearchOptions::default();
        self.cursor = None;
        self.depth = 0;
        self.exhausted = false;
    }

    /// Start a new search over `tree`, replacing any previous one.
    pub fn set_search(&mut self, tree: &'t Tree, pattern: &str, options: SearchOptions) {
        self.reset();
        self.tree = Some(tree);
        self.options = options;
        self.pattern = if options.case_insensitive {
            pattern.to_ascii_lowercase()
        } else {
            pattern.to_string()
        };
    }

    /// The node the cursor is on.
    pub fn cursor(&self) -> Option<NodeId> {
        self.cursor
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Whether `node` matches the search, taking the cursor's current depth
    /// as the node's level.
    pub fn matches(&self, node: NodeId) -> bool {
        if let Some(level) = self.options.level
            && self.depth != level as isize
        {
            return false;
        }
        let Some(tree) = self.tree else {
            return false;
        };

        let field = match self.options.field {
            MatchField::Key => tree.key(node),
            MatchField::Value => tree.value(node),
        };
        let Some(field) = field else {
            return false;
        };

        if self.pattern == "*" {
            return true;
        }
        if self.options.case_insensitive {
            field.eq_ignore_ascii_case(&self.pattern)
        } else {
            field == self.pattern
        }
    }

    /// First match at or after the cursor, starting at the root when the
    /// cursor is unset. The cursor stays on the match, so calling this again
    /// returns the same node. Once a walk finds nothing, further calls
    /// return `None` until the search is restarted or re-anchored.
    pub fn find_next(&mut self) -> Option<NodeId> {
        let tree = self.tree?;
        if self.pattern.is_empty() || self.exhausted {
            return None;
        }

        let mut next = match self.cursor {
            Some(cursor) => Some(cursor),
            None => {
                self.depth = 0;
                Some(tree.root())
            }
        };

        while let Some(id) = next {
            if !tree.contains(id) {
                return None;
            }
            self.cursor = Some(id);
            if self.matches(id) {
                return Some(id);
            }

            if let Some(level) = self.options.level {
                let level = level as isize;
                if self.depth >= level {
                    if self.depth == level
                        && let Some(sibling) = tree.next_sibling(id)
                    {
                        next = Some(sibling);
                        continue;
                    }
                    next = self.climb(tree, id, level);
                    continue;
                }
            }

            next = tree.next_traverse_step(id, &mut self.depth);
        }
        self.exhaust();
        None
    }

    /// Move the cursor to `reference` and search from there.
    ///
    /// If `reference` is the node the cursor is already on, the search
    /// resumes one step past it, which is how successive matches are found.
    /// `None` restarts from the root. A node that is not in the tree ends
    /// the search.
    pub fn find_next_node(&mut self, reference: Option<NodeId>) -> Option<NodeId> {
        let tree = self.tree?;
        match reference {
            Some(reference) if Some(reference) == self.cursor => {
                match tree.next_traverse_step(reference, &mut self.depth) {
                    Some(next) => self.cursor = Some(next),
                    None => {
                        self.exhaust();
                        return None;
                    }
                }
            }
            Some(reference) => {
                let level = tree.level(reference)?;
                self.depth = level as isize;
                self.cursor = Some(reference);
                self.exhausted = false;
            }
            None => {
                self.cursor = None;
                self.depth = 0;
                self.exhausted = false;
            }
        }
        self.find_next()
    }

    /// Every remaining match, starting from the root.
    pub fn find_all(&mut self) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut last = None;
        while let Some(node) = self.find_next_node(last) {
            found.push(node);
            last = Some(node);
        }
        found
    }

    /// Park the cursor off the tree so a stale depth is never reused.
    fn exhaust(&mut self) {
        self.cursor = None;
        self.depth = 0;
        self.exhausted = true;
    }

    /// Nearest ancestor at or above `level` that has a next sibling; returns
    /// that sibling.
    fn climb(&mut self, tree: &Tree, from: NodeId, level: isize) -> Option<NodeId> {
        let mut anchor = from;
        while let Some(parent) = tree.parent(anchor) {
            anchor = parent;
            self.depth -= 1;
            if self.depth <= level
                && let Some(sibling) = tree.next_sibling(anchor)
            {
                return Some(sibling);
            }
        }
        None
    }
}

/// First node from `start` onwards along its sibling chain whose field
/// equals `pattern` exactly.
pub fn find_in_branch(
    tree: &Tree,
    start: NodeId,
    pattern: &str,
    field: MatchField,
    case_insensitive: bool,
) -> Option<NodeId> {
    tree.siblings(start).find(|&id| {
        let candidate = match field {
            MatchField::Key => tree.key(id),
            MatchField::Value => tree.value(id),
        };
        candidate.is_some_and(|candidate| {
            if case_insensitive {
                candidate.eq_ignore_ascii_case(pattern)
            } else {
                candidate == pattern
            }
        })
    })
}
