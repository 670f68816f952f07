//! # Assembler - Symbols to Key/Value Triples
//!
//! The assembler is a small state machine over the symbol stream. It buffers
//! a key, waits for either a value or an opening brace, and tracks nesting
//! depth:
//!
//! ```text
//! "a" "1"          → (a, 1, 0)
//! "b"              → (b, -, 0)      bare key, emitted at line end
//! {                → depth 1
//!     "c" {        → (c, -, 1)      key followed by a brace
//!     }            → depth 1
//! }                → depth 0, document finished
//! ```
//!
//! Which symbols may come next is tracked as a set of [`Expect`] flags. A
//! symbol outside that set is reported and discarded; the machine does not
//! change state. Closing the outermost block finishes the document and any
//! trailing text is ignored.

use std::io::{self, BufRead};

use bitflags::bitflags;

use crate::diagnostics::SyntaxLogger;
use crate::limits::Limits;
use crate::parser::event::Pair;
use crate::reader::LineReader;
use crate::tokenizer::{Located, Symbol, Tokenizer};

bitflags! {
    /// Symbols the assembler accepts next.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Expect: u8 {
        const CLOSE = 1 << 0;
        const OPEN = 1 << 1;
        const STRING = 1 << 2;
    }
}

pub struct Assembler<R> {
    tokenizer: Tokenizer<R>,
    limits: Limits,
    depth: usize,
    expected: Expect,
    pending_key: Option<String>,
    finished: bool,
}

impl<R: BufRead> Assembler<R> {
    pub fn new(source: R, limits: Limits) -> Self {
        Self {
            tokenizer: Tokenizer::new(LineReader::new(source, &limits)),
            limits,
            depth: 0,
            expected: Expect::STRING,
            pending_key: None,
            finished: false,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn expected(&self) -> Expect {
        self.expected
    }

    /// Physical line the tokenizer is on.
    pub fn line(&self) -> usize {
        self.tokenizer.line()
    }

    /// Next triple, or `None` when the document is finished or the input is
    /// exhausted.
    pub fn next_pair(
        &mut self,
        source: &str,
        logger: &mut dyn SyntaxLogger,
    ) -> io::Result<Option<Pair>> {
        while !self.finished {
            let max = if self.pending_key.is_some() {
                self.limits.max_value_length
            } else {
                self.limits.max_key_length
            };

            let Some(Located {
                symbol,
                line,
                column,
            }) = self.tokenizer.next_symbol(max)?
            else {
                self.finished = true;
                if self.depth > 0 {
                    let message = format!(
                        "unexpected end of input, {} unclosed block(s)",
                        self.depth
                    );
                    logger.report(source, &message, self.tokenizer.line(), 1);
                }
                return Ok(None);
            };

            if let Some(required) = required_flag(&symbol) {
                if !self.expected.contains(required) {
                    let message = format!("unexpected symbol {}", describe(&symbol));
                    logger.report(source, &message, line, column);
                    continue;
                }
            }

            match symbol {
                Symbol::Open => {
                    self.depth += 1;
                    self.expected = Expect::CLOSE | Expect::STRING;
                    if let Some(key) = self.pending_key.take() {
                        return Ok(Some(Pair {
                            key,
                            value: None,
                            depth: self.depth - 1,
                        }));
                    }
                }
                Symbol::Close => {
                    if self.depth == 0 {
                        logger.report(source, "unbalanced closing brace", line, column);
                        continue;
                    }
                    self.depth -= 1;
                    self.pending_key = None;
                    if self.depth == 0 {
                        self.finished = true;
                        return Ok(None);
                    }
                    self.expected = Expect::CLOSE | Expect::STRING;
                }
                Symbol::String(text) => match self.pending_key.take() {
                    Some(key) => {
                        self.expected = Expect::CLOSE | Expect::STRING;
                        return Ok(Some(Pair {
                            key,
                            value: Some(text),
                            depth: self.depth,
                        }));
                    }
                    None => {
                        self.expected = Expect::OPEN | Expect::CLOSE | Expect::STRING;
                        self.pending_key = Some(text);
                    }
                },
                Symbol::Unterminated | Symbol::LineEnd => {
                    if symbol == Symbol::Unterminated {
                        logger.report(source, "unterminated string", line, column);
                    }
                    if let Some(key) = self.pending_key.take() {
                        return Ok(Some(Pair {
                            key,
                            value: None,
                            depth: self.depth,
                        }));
                    }
                }
            }
        }

        Ok(None)
    }
}

fn required_flag(symbol: &Symbol) -> Option<Expect> {
    match symbol {
        Symbol::Open => Some(Expect::OPEN),
        Symbol::Close => Some(Expect::CLOSE),
        Symbol::String(_) => Some(Expect::STRING),
        Symbol::LineEnd | Symbol::Unterminated => None,
    }
}

fn describe(symbol: &Symbol) -> String {
    match symbol {
        Symbol::Open => "'{'".to_string(),
        Symbol::Close => "'}'".to_string(),
        Symbol::String(text) => format!("\"{text}\""),
        Symbol::LineEnd => "end of line".to_string(),
        Symbol::Unterminated => "unterminated string".to_string(),
    }
}
