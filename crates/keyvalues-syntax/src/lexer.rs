//! # Lexer - Tokenizing One Line Segment
//!
//! This module breaks a single line segment into tokens using the [Logos]
//! lexer generator. The grammar only has a handful of meaningful shapes:
//!
//! - `{` → [`TokenKind::Open`]
//! - `}` → [`TokenKind::Close`]
//! - `"text"` → [`TokenKind::Quoted`] (no escape sequences, a quote always ends it)
//! - `"text` at the end of a segment → [`TokenKind::Unterminated`]
//! - `// ...` → [`TokenKind::Comment`] (runs to the end of the segment)
//!
//! Spaces and tabs are skipped. Anything else outside quotes is not part of
//! the grammar and is silently dropped by [`lex`].
//!
//! [Logos]: https://docs.rs/logos
//!
//! ```
//! use keyvalues_syntax::lexer::{lex, TokenKind};
//!
//! let tokens: Vec<_> = lex(r#""key" { // open"#).collect();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, vec![TokenKind::Quoted, TokenKind::Open, TokenKind::Comment]);
//! assert_eq!(tokens[0].unquoted(), "key");
//! ```

use std::ops::Range;

use logos::Logos;

/// Token kinds produced by the Logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
pub enum TokenKind {
    /// `{` opening a nested block
    #[token("{")]
    Open,

    /// `}` closing a nested block
    #[token("}")]
    Close,

    /// A complete quoted string, quotes included
    #[regex(r#""[^"]*""#)]
    Quoted,

    /// A quoted string with no closing quote before the segment ends
    #[regex(r#""[^"]*"#)]
    Unterminated,

    /// `//` comment, up to the end of the segment
    #[regex(r"//[^\n]*")]
    Comment,
}

/// A lexed token with its kind, text slice and byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Range<usize>,
}

impl<'a> Token<'a> {
    /// Text between the quotes of a quoted token; other tokens return their
    /// text unchanged.
    pub fn unquoted(&self) -> &'a str {
        match self.kind {
            TokenKind::Quoted => &self.text[1..self.text.len() - 1],
            TokenKind::Unterminated => &self.text[1..],
            _ => self.text,
        }
    }
}

/// Lazily lex a segment, dropping characters the grammar does not know.
pub fn lex(input: &str) -> impl Iterator<Item = Token<'_>> {
    let mut lexer = TokenKind::lexer(input);
    std::iter::from_fn(move || {
        loop {
            if let Ok(kind) = lexer.next()? {
                return Some(Token {
                    kind,
                    text: lexer.slice(),
                    span: lexer.span(),
                });
            }
        }
    })
}

/// First token of `input`, skipping unknown characters.
pub(crate) fn first_token(input: &str) -> Option<Token<'_>> {
    lex(input).next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex_all(input: &str) -> Vec<Token<'_>> {
        lex(input).collect()
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex(input).map(|t| t.kind).collect()
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex_all(""), vec![]);
    }

    #[test]
    fn lex_whitespace_only() {
        assert_eq!(lex_all(" \t  \t"), vec![]);
    }

    #[test]
    fn lex_braces() {
        assert_eq!(kinds("{ }"), vec![TokenKind::Open, TokenKind::Close]);
        assert_eq!(kinds("{}"), vec![TokenKind::Open, TokenKind::Close]);
    }

    #[test]
    fn lex_key_value_pair() {
        let tokens = lex_all("\t\"name\"  \"value\"");
        assert_eq!(
            tokens,
            vec![
                Token {
                    kind: TokenKind::Quoted,
                    text: "\"name\"",
                    span: 1..7,
                },
                Token {
                    kind: TokenKind::Quoted,
                    text: "\"value\"",
                    span: 9..16,
                },
            ]
        );
        assert_eq!(tokens[0].unquoted(), "name");
        assert_eq!(tokens[1].unquoted(), "value");
    }

    #[test]
    fn lex_empty_string() {
        let tokens = lex_all("\"\"");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Quoted);
        assert_eq!(tokens[0].unquoted(), "");
    }

    #[test]
    fn quoted_text_keeps_braces_and_slashes() {
        let tokens = lex_all("\"{a}//b\"");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].unquoted(), "{a}//b");
    }

    #[test]
    fn backslash_is_not_an_escape() {
        let tokens = lex_all(r#""a\" "b""#);
        assert_eq!(
            kinds(r#""a\" "b""#),
            vec![TokenKind::Quoted, TokenKind::Quoted]
        );
        assert_eq!(tokens[0].unquoted(), "a\\");
    }

    #[test]
    fn comment_runs_to_end() {
        let tokens = lex_all("\"a\" // trailing \"b\" {");
        assert_eq!(kinds("\"a\" // trailing \"b\" {"), vec![TokenKind::Quoted, TokenKind::Comment]);
        assert_eq!(tokens[1].text, "// trailing \"b\" {");
    }

    #[test]
    fn unterminated_string_at_end() {
        let tokens = lex_all("\"key\" \"val");
        assert_eq!(tokens[1].kind, TokenKind::Unterminated);
        assert_eq!(tokens[1].unquoted(), "val");
    }

    #[test]
    fn stray_characters_are_dropped() {
        assert_eq!(kinds("abc \"k\" = \"v\";"), vec![TokenKind::Quoted, TokenKind::Quoted]);
        // a single slash is not a comment
        assert_eq!(kinds("/ {"), vec![TokenKind::Open]);
    }

    #[test]
    fn spans_are_correct() {
        let input = "  \"a\" { \"bc\" }";
        for token in lex(input) {
            assert_eq!(token.text, &input[token.span.clone()]);
        }
    }

    #[test]
    fn first_token_skips_noise() {
        let token = first_token("  xx }").unwrap();
        assert_eq!(token.kind, TokenKind::Close);
        assert_eq!(token.span, 5..6);
        assert!(first_token("  ").is_none());
    }
}
