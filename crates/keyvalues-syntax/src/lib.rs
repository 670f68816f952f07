//! # keyvalues-syntax
//!
//! Streaming reader for the KeyValues text format: nested, brace-delimited
//! blocks of double-quoted keys and values.
//!
//! ```text
//! "settings"              // a key introducing a block
//! {
//!     "name"  "demo"      // a key/value pair
//!     "size"  "3"
//! }
//! ```
//!
//! ## Architecture Overview
//!
//! The pipeline never holds the whole document in memory:
//!
//! ```text
//! BufRead → LineReader → Tokenizer → Assembler → EventParser → PairSink
//!           (segments)   (Logos)     (state)     (hooks)
//! ```
//!
//! ### 1. Line reader ([`reader`] module)
//!
//! Physical lines are cut into bounded segments, see [`Limits`]. A line that
//! is longer than the configured buffer is lexed in pieces.
//!
//! ### 2. Tokenizer ([`lexer`], [`tokenizer`] modules)
//!
//! [Logos] lexes each segment. The tokenizer turns tokens into
//! [`Symbol`]s: `{`, `}`, a quoted string, or the end of the line. Comments
//! and stray characters never reach the assembler.
//!
//! ### 3. Assembler ([`assembler`] module)
//!
//! A state machine that pairs keys with values and tracks depth. Anything it
//! does not expect is reported to a [`SyntaxLogger`] and skipped, so even
//! broken input yields a best-effort stream of triples.
//!
//! ### 4. Event parser ([`parser`] module)
//!
//! Runs the assembler over a file, string or reader and calls a
//! [`PairSink`] for each `(key, value, depth)` triple. Sinks can stop the
//! parse early; `on_end` is still delivered.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Quick Start
//!
//! ```
//! use keyvalues_syntax::{EventParser, NullLogger, Pair, PairCollector};
//!
//! let mut collector = PairCollector::default();
//! EventParser::default()
//!     .parse_str("example", "\"a\" \"1\"\n\"b\"\n{\n\t\"c\" \"2\"\n}\n", &mut collector, &mut NullLogger)
//!     .unwrap();
//!
//! assert_eq!(
//!     collector.pairs,
//!     vec![
//!         Pair::new("a", Some("1"), 0),
//!         Pair::new("b", None, 0),
//!         Pair::new("c", Some("2"), 1),
//!     ]
//! );
//! ```

pub mod assembler;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod reader;
pub mod tokenizer;

pub use assembler::{Assembler, Expect};
pub use diagnostics::{CollectingLogger, Diagnostic, LogLogger, NullLogger, SyntaxLogger};
pub use error::ParseError;
pub use limits::Limits;
pub use parser::event::{Flow, Pair};
pub use parser::sink::{PairCollector, PairSink};
pub use parser::{EventParser, ParseSummary};
pub use tokenizer::Symbol;
