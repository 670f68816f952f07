//! Buffer bounds enforced while reading a document.
//!
//! Lines and quoted tokens are not unbounded: a physical line longer than
//! [`Limits::max_line_length`] is lexed in pieces, and quoted tokens are
//! truncated to [`Limits::max_key_length`] / [`Limits::max_value_length`].
//! Both effects are visible in the parsed output, so the bounds are explicit
//! configuration rather than an implementation detail.

/// Default maximum line length in bytes, terminator slot included.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024;

/// Default maximum key length in bytes.
pub const DEFAULT_MAX_KEY_LENGTH: usize = 256;

/// Default maximum value length in bytes.
pub const DEFAULT_MAX_VALUE_LENGTH: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Size of the line buffer. At most `max_line_length - 1` bytes of a
    /// physical line are lexed at a time.
    pub max_line_length: usize,
    /// Keys longer than this are truncated.
    pub max_key_length: usize,
    /// Values longer than this are truncated.
    pub max_value_length: usize,
}

impl Limits {
    /// Number of bytes of a physical line lexed in one segment.
    pub fn segment_length(&self) -> usize {
        self.max_line_length.saturating_sub(1).max(1)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            max_key_length: DEFAULT_MAX_KEY_LENGTH,
            max_value_length: DEFAULT_MAX_VALUE_LENGTH,
        }
    }
}

/// Truncate `text` to at most `max` bytes without splitting a character.
pub(crate) fn truncate_on_char_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let limits = Limits::default();
        assert_eq!(limits.max_line_length, 1024);
        assert_eq!(limits.max_key_length, 256);
        assert_eq!(limits.max_value_length, 512);
        assert_eq!(limits.segment_length(), 1023);
    }

    #[test]
    fn segment_length_never_zero() {
        let limits = Limits {
            max_line_length: 0,
            ..Limits::default()
        };
        assert_eq!(limits.segment_length(), 1);
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_on_char_boundary("abc", 5), "abc");
        assert_eq!(truncate_on_char_boundary("abc", 3), "abc");
    }

    #[test]
    fn truncate_cuts_ascii() {
        assert_eq!(truncate_on_char_boundary("abcdef", 4), "abcd");
    }

    #[test]
    fn truncate_backs_off_multibyte_char() {
        // "é" is two bytes; cutting at 2 would split it
        assert_eq!(truncate_on_char_boundary("aé", 2), "a");
    }
}
