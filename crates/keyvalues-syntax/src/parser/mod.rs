//! # Event Parser
//!
//! Drives the [`Assembler`] over a source and forwards each triple to a
//! [`PairSink`]. The sink's lifecycle is fixed:
//!
//! ```text
//! open source ──► on_start ──► on_pair* ──► on_end
//!      │                          │
//!      └─ fails: error, no hooks  └─ Flow::Stop or read error still reach on_end
//! ```
//!
//! The source is owned by the parser for the duration of one call and is
//! dropped on every exit path.
//!
//! ```
//! use keyvalues_syntax::{EventParser, Flow, NullLogger};
//!
//! let mut keys = Vec::new();
//! let mut sink = |_: &str, key: &str, _: Option<&str>, depth: usize| {
//!     keys.push((depth, key.to_string()));
//!     Flow::Continue
//! };
//! let summary = EventParser::default()
//!     .parse_str("inline", "\"a\" { \"b\" \"1\" }", &mut sink, &mut NullLogger)
//!     .unwrap();
//! assert_eq!(summary.pairs, 2);
//! assert_eq!(keys, vec![(0, "a".to_string()), (1, "b".to_string())]);
//! ```

pub mod event;
pub mod sink;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::assembler::Assembler;
use crate::diagnostics::SyntaxLogger;
use crate::error::ParseError;
use crate::limits::Limits;

use event::Flow;
use sink::PairSink;

/// Outcome of one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseSummary {
    /// Number of triples handed to the sink.
    pub pairs: usize,
    /// Whether the sink ended the parse early.
    pub stopped: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EventParser {
    limits: Limits,
}

impl EventParser {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Parse a file. Failing to open it is an error and no hook runs.
    pub fn parse_file<S, L>(
        &self,
        path: &Path,
        sink: &mut S,
        logger: &mut L,
    ) -> Result<ParseSummary, ParseError>
    where
        S: PairSink + ?Sized,
        L: SyntaxLogger + ?Sized,
    {
        let file = File::open(path).map_err(|source| ParseError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = path.display().to_string();
        self.parse_reader(&source, BufReader::new(file), sink, logger)
    }

    pub fn parse_str<S, L>(
        &self,
        source: &str,
        text: &str,
        sink: &mut S,
        logger: &mut L,
    ) -> Result<ParseSummary, ParseError>
    where
        S: PairSink + ?Sized,
        L: SyntaxLogger + ?Sized,
    {
        self.parse_reader(source, text.as_bytes(), sink, logger)
    }

    /// Parse any buffered reader. `source` names it in hooks and diagnostics.
    pub fn parse_reader<R, S, L>(
        &self,
        source: &str,
        reader: R,
        sink: &mut S,
        logger: &mut L,
    ) -> Result<ParseSummary, ParseError>
    where
        R: BufRead,
        S: PairSink + ?Sized,
        L: SyntaxLogger + ?Sized,
    {
        let mut assembler = Assembler::new(reader, self.limits);
        let mut summary = ParseSummary::default();

        sink.on_start(source);
        let result = loop {
            let pair = match assembler.next_pair(source, &mut Forward(&mut *logger)) {
                Ok(Some(pair)) => pair,
                Ok(None) => break Ok(summary),
                Err(err) => {
                    break Err(ParseError::Read {
                        source_name: source.to_string(),
                        line: assembler.line(),
                        source: err,
                    });
                }
            };

            summary.pairs += 1;
            if sink.on_pair(source, &pair.key, pair.value.as_deref(), pair.depth) == Flow::Stop {
                summary.stopped = true;
                break Ok(summary);
            }
        };
        sink.on_end(source);

        result
    }
}

/// Lets an unsized logger be passed where `&mut dyn SyntaxLogger` is needed.
struct Forward<'a, L: ?Sized>(&'a mut L);

impl<L: SyntaxLogger + ?Sized> SyntaxLogger for Forward<'_, L> {
    fn report(&mut self, source: &str, message: &str, line: usize, column: usize) {
        self.0.report(source, message, line, column);
    }
}
