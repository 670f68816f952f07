//! # Line Reader - Bounded Line Segments
//!
//! The tokenizer never sees a whole file. It pulls one line *segment* at a
//! time from a [`LineReader`], which wraps any [`BufRead`] source:
//!
//! ```text
//! physical line ──► strip "\n" / "\r\n" ──► split every N bytes ──► Segment
//! ```
//!
//! `N` is [`Limits::segment_length`], i.e. one byte less than the configured
//! line buffer. A line longer than that is handed out as several segments
//! that share a line number but carry increasing byte offsets, so a quoted
//! token straddling the cut is seen as two broken halves. That is the same
//! thing a fixed-size line buffer does, and it is kept on purpose.
//!
//! Empty lines produce no segment at all. Invalid UTF-8 is replaced with
//! `U+FFFD` rather than failing the read.

use std::io::{self, BufRead};

use crate::limits::Limits;

/// A piece of one physical line, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    /// 1-based physical line number.
    pub line: usize,
    /// Byte offset of `text` within the physical line.
    pub offset: usize,
}

/// Pulls bounded segments from a buffered source.
pub struct LineReader<R> {
    source: R,
    segment_length: usize,
    buffer: Vec<u8>,
    pending: String,
    pending_offset: usize,
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(source: R, limits: &Limits) -> Self {
        Self {
            source,
            segment_length: limits.segment_length(),
            buffer: Vec::new(),
            pending: String::new(),
            pending_offset: 0,
            line: 0,
        }
    }

    /// Number of the last physical line pulled from the source.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Next non-empty segment, or `None` at end of input.
    ///
    /// A new physical line is only read once the previous one has been
    /// handed out completely.
    pub fn next_segment(&mut self) -> io::Result<Option<Segment>> {
        while self.pending.is_empty() {
            if !self.fill()? {
                return Ok(None);
            }
        }

        let cut = self.cut_position();
        let rest = self.pending.split_off(cut);
        let text = std::mem::replace(&mut self.pending, rest);
        let offset = self.pending_offset;
        self.pending_offset += text.len();

        Ok(Some(Segment {
            text,
            line: self.line,
            offset,
        }))
    }

    /// Read the next physical line into `pending`. Returns `false` at EOF.
    fn fill(&mut self) -> io::Result<bool> {
        self.buffer.clear();
        if self.source.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(false);
        }
        self.line += 1;

        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
            if self.buffer.last() == Some(&b'\r') {
                self.buffer.pop();
            }
        }

        self.pending = String::from_utf8_lossy(&self.buffer).into_owned();
        self.pending_offset = 0;
        Ok(true)
    }

    fn cut_position(&self) -> usize {
        if self.pending.len() <= self.segment_length {
            return self.pending.len();
        }
        let mut cut = self.segment_length;
        while !self.pending.is_char_boundary(cut) {
            cut -= 1;
        }
        if cut == 0 {
            // a single character wider than the whole segment still has to move forward
            cut = self
                .pending
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(self.pending.len());
        }
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn segments(input: &str, limits: Limits) -> Vec<Segment> {
        let mut reader = LineReader::new(input.as_bytes(), &limits);
        let mut out = Vec::new();
        while let Some(segment) = reader.next_segment().unwrap() {
            out.push(segment);
        }
        out
    }

    fn seg(text: &str, line: usize, offset: usize) -> Segment {
        Segment {
            text: text.to_string(),
            line,
            offset,
        }
    }

    #[test]
    fn empty_input_has_no_segments() {
        assert_eq!(segments("", Limits::default()), vec![]);
    }

    #[test]
    fn strips_lf_and_crlf() {
        assert_eq!(
            segments("\"a\"\r\n\"b\"\n\"c\"", Limits::default()),
            vec![seg("\"a\"", 1, 0), seg("\"b\"", 2, 0), seg("\"c\"", 3, 0)]
        );
    }

    #[test]
    fn blank_lines_are_skipped_but_counted() {
        assert_eq!(
            segments("\"a\"\n\n\r\n\"b\"\n", Limits::default()),
            vec![seg("\"a\"", 1, 0), seg("\"b\"", 4, 0)]
        );
    }

    #[test]
    fn long_line_is_split_into_segments() {
        let limits = Limits {
            max_line_length: 5,
            ..Limits::default()
        };
        assert_eq!(
            segments("abcdefghij\nxy", limits),
            vec![
                seg("abcd", 1, 0),
                seg("efgh", 1, 4),
                seg("ij", 1, 8),
                seg("xy", 2, 0),
            ]
        );
    }

    #[test]
    fn split_respects_char_boundaries() {
        let limits = Limits {
            max_line_length: 3,
            ..Limits::default()
        };
        // "é" is two bytes; the second cut would land inside it
        assert_eq!(
            segments("aéb", limits),
            vec![seg("a", 1, 0), seg("é", 1, 1), seg("b", 1, 3)]
        );
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let bytes: &[u8] = b"\"a\xffb\"\n";
        let mut reader = LineReader::new(bytes, &Limits::default());
        let segment = reader.next_segment().unwrap().unwrap();
        assert_eq!(segment.text, "\"a\u{fffd}b\"");
        assert_eq!(reader.line(), 1);
    }
}
