//! Building a [`Tree`] from parsed triples.
//!
//! [`TreeBuilder`] is a [`PairSink`]: it turns each `(key, value, depth)`
//! into a node and hangs it off the node built last, so it only ever appends
//! at the tail of a chain:
//!
//! ```text
//! deeper     → first/last child of the previous node
//! shallower  → climb (previous depth - depth) parents, then next sibling
//! same depth → next sibling of the previous node
//! ```
//!
//! The first top-level pair takes the place of the tree's empty root.
//! Further top-level pairs continue the root's sibling chain.

use std::io::BufRead;

use keyvalues_syntax::{EventParser, Flow, Limits, PairSink, ParseError, SyntaxLogger};

use crate::tree::{NodeId, Position, Tree};

/// What an observer wants after seeing a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Continue,
    /// End the parse. The tree keeps what was built so far.
    Stop,
    /// Keep building without calling the observer again.
    Silence,
}

pub trait NodeObserver {
    fn on_node(&mut self, source: &str, tree: &Tree, node: NodeId, depth: usize) -> Observation;
}

impl<F> NodeObserver for F
where
    F: FnMut(&str, &Tree, NodeId, usize) -> Observation,
{
    fn on_node(&mut self, source: &str, tree: &Tree, node: NodeId, depth: usize) -> Observation {
        self(source, tree, node, depth)
    }
}

pub struct TreeBuilder<'o> {
    tree: Tree,
    current: NodeId,
    depth: usize,
    root_placed: bool,
    observer: Option<&'o mut dyn NodeObserver>,
}

impl Default for TreeBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'o> TreeBuilder<'o> {
    pub fn new() -> Self {
        let tree = Tree::new();
        Self {
            current: tree.root(),
            tree,
            depth: 0,
            root_placed: false,
            observer: None,
        }
    }

    pub fn with_observer(observer: &'o mut dyn NodeObserver) -> Self {
        Self {
            observer: Some(observer),
            ..Self::new()
        }
    }

    /// Run `parser` over `reader` and return the finished tree.
    pub fn build<R, L>(
        mut self,
        parser: &EventParser,
        source: &str,
        reader: R,
        logger: &mut L,
    ) -> Result<Tree, ParseError>
    where
        R: BufRead,
        L: SyntaxLogger + ?Sized,
    {
        parser.parse_reader(source, reader, &mut self, logger)?;
        Ok(self.finish())
    }

    pub fn finish(self) -> Tree {
        self.tree
    }

    fn attach(&mut self, node: NodeId, depth: usize) {
        if depth > self.depth {
            self.tree.append_child(self.current, node);
        } else if depth < self.depth {
            let mut anchor = self.current;
            for _ in depth..self.depth {
                match self.tree.parent(anchor) {
                    Some(parent) => anchor = parent,
                    None => break,
                }
            }
            self.tree.move_to_branch(anchor, node, Position::After);
        } else if depth == 0 && !self.root_placed && self.tree.replace_root(node) {
            self.root_placed = true;
        } else {
            self.tree.move_to_branch(self.current, node, Position::After);
        }

        if depth == 0 {
            self.root_placed = true;
        }
        self.current = node;
        self.depth = depth;
    }
}

impl PairSink for TreeBuilder<'_> {
    fn on_pair(&mut self, source: &str, key: &str, value: Option<&str>, depth: usize) -> Flow {
        let node = self.tree.create_node_with(key, value);
        self.attach(node, depth);

        let Some(observer) = self.observer.as_deref_mut() else {
            return Flow::Continue;
        };
        match observer.on_node(source, &self.tree, node, depth) {
            Observation::Continue => Flow::Continue,
            Observation::Stop => Flow::Stop,
            Observation::Silence => {
                self.observer = None;
                Flow::Continue
            }
        }
    }
}

/// Build a tree from any buffered reader.
pub fn build_tree_from_reader<R, L>(
    source: &str,
    reader: R,
    limits: Limits,
    logger: &mut L,
) -> Result<Tree, ParseError>
where
    R: BufRead,
    L: SyntaxLogger + ?Sized,
{
    TreeBuilder::new().build(&EventParser::new(limits), source, reader, logger)
}

/// Build a tree from text held in memory, with default limits.
pub fn build_tree_from_str<L>(source: &str, text: &str, logger: &mut L) -> Result<Tree, ParseError>
where
    L: SyntaxLogger + ?Sized,
{
    build_tree_from_reader(source, text.as_bytes(), Limits::default(), logger)
}
