//! Reporting of syntax problems.
//!
//! Malformed input never aborts a parse. Each problem is handed to a
//! [`SyntaxLogger`] together with the source name and position, and parsing
//! carries on with the offending symbol discarded.

use std::fmt;

pub trait SyntaxLogger {
    fn report(&mut self, source: &str, message: &str, line: usize, column: usize);
}

/// Forwards diagnostics to the `log` facade at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLogger;

impl SyntaxLogger for LogLogger {
    fn report(&mut self, source: &str, message: &str, line: usize, column: usize) {
        log::warn!("{source}:{line}:{column}: {message}");
    }
}

/// Discards every diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl SyntaxLogger for NullLogger {
    fn report(&mut self, _source: &str, _message: &str, _line: usize, _column: usize) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub source: String,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.source, self.line, self.column, self.message
        )
    }
}

/// Keeps every diagnostic for later inspection.
#[derive(Debug, Default, Clone)]
pub struct CollectingLogger {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl SyntaxLogger for CollectingLogger {
    fn report(&mut self, source: &str, message: &str, line: usize, column: usize) {
        self.diagnostics.push(Diagnostic {
            source: source.to_string(),
            message: message.to_string(),
            line,
            column,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_logger_keeps_order() {
        let mut logger = CollectingLogger::new();
        assert!(logger.is_empty());
        logger.report("a.kv", "first", 1, 2);
        logger.report("a.kv", "second", 3, 4);
        assert_eq!(logger.diagnostics.len(), 2);
        assert_eq!(logger.diagnostics[0].message, "first");
        assert_eq!(logger.diagnostics[1].line, 3);
    }

    #[test]
    fn diagnostic_display() {
        let diagnostic = Diagnostic {
            source: "doc.kv".to_string(),
            message: "unexpected symbol '{'".to_string(),
            line: 4,
            column: 9,
        };
        assert_eq!(diagnostic.to_string(), "doc.kv:4:9: unexpected symbol '{'");
    }
}
