//! # keyvalues-engine
//!
//! In-memory KeyValues documents: a mutable tree built from the event stream
//! of [`keyvalues_syntax`], structural editing, level-scoped search, numeric
//! value views and serialization back to text.
//!
//! ```text
//! file ──► EventParser ──► TreeBuilder ──► Tree ──► serialize ──► file
//!                                          │
//!                                   SearchCursor, edits
//! ```
//!
//! ```
//! use keyvalues_engine::{build_tree_from_str, serialize, SortKey};
//! use keyvalues_syntax::NullLogger;
//!
//! let mut tree = build_tree_from_str(
//!     "inline",
//!     "\"list\" { \"b\" \"2\" \"a\" \"1\" }",
//!     &mut NullLogger,
//! ).unwrap();
//!
//! let first = tree.first_child(tree.root()).unwrap();
//! tree.sort_siblings(first, SortKey::Key, false);
//!
//! assert_eq!(serialize(&tree), "\"list\"\n{\n\t\"a\" \"1\"\n\t\"b\" \"2\"\n}\n");
//! ```

pub mod builder;
pub mod io;
pub mod search;
pub mod serialize;
pub mod tree;
pub mod value;

pub use builder::{
    NodeObserver, Observation, TreeBuilder, build_tree_from_reader, build_tree_from_str,
};
pub use io::{IoError, open_tree, save_tree};
pub use search::{MatchField, SearchCursor, SearchOptions, find_in_branch};
pub use serialize::{serialize, write_tree};
pub use tree::{Node, NodeId, Position, SortKey, Tree};
