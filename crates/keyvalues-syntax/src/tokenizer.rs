//! Symbol stream over a [`LineReader`].
//!
//! The tokenizer keeps the current segment and a byte cursor into it. Each
//! call to [`Tokenizer::next_symbol`] lexes the remainder of the segment,
//! takes the first token and advances past it. When a segment is used up (or
//! a comment swallows the rest of it) a [`Symbol::LineEnd`] is produced, which
//! the assembler uses to emit bare keys.

use std::io::{self, BufRead};

use crate::lexer::{TokenKind, first_token};
use crate::limits::truncate_on_char_boundary;
use crate::reader::{LineReader, Segment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Open,
    Close,
    String(String),
    /// Nothing more on the current segment.
    LineEnd,
    /// A quoted token without its closing quote. The segment ends after it.
    Unterminated,
}

/// A symbol with its 1-based position in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub symbol: Symbol,
    pub line: usize,
    pub column: usize,
}

pub struct Tokenizer<R> {
    reader: LineReader<R>,
    segment: Option<Segment>,
    cursor: usize,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(reader: LineReader<R>) -> Self {
        Self {
            reader,
            segment: None,
            cursor: 0,
        }
    }

    /// Current physical line number.
    pub fn line(&self) -> usize {
        self.reader.line()
    }

    /// Next symbol, or `None` once the source is exhausted.
    ///
    /// Quoted text longer than `max_string_length` bytes is truncated.
    pub fn next_symbol(&mut self, max_string_length: usize) -> io::Result<Option<Located>> {
        let segment = match self.segment.take() {
            Some(segment) => segment,
            None => match self.reader.next_segment()? {
                Some(segment) => {
                    self.cursor = 0;
                    segment
                }
                None => return Ok(None),
            },
        };

        let rest = &segment.text[self.cursor..];
        let Some(token) = first_token(rest) else {
            return Ok(Some(Located {
                symbol: Symbol::LineEnd,
                line: segment.line,
                column: segment.offset + segment.text.len() + 1,
            }));
        };

        let line = segment.line;
        let column = segment.offset + self.cursor + token.span.start + 1;
        let (symbol, keep_segment) = match token.kind {
            TokenKind::Open => (Symbol::Open, true),
            TokenKind::Close => (Symbol::Close, true),
            TokenKind::Quoted => {
                let text = truncate_on_char_boundary(token.unquoted(), max_string_length);
                (Symbol::String(text.to_string()), true)
            }
            TokenKind::Comment => (Symbol::LineEnd, false),
            TokenKind::Unterminated => (Symbol::Unterminated, false),
        };

        if keep_segment {
            self.cursor += token.span.end;
            self.segment = Some(segment);
        }

        Ok(Some(Located {
            symbol,
            line,
            column,
        }))
    }
}
