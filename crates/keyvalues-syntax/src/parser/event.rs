/// One `(key, value, depth)` triple produced by the assembler.
///
/// A `None` value marks a key that introduces a nested block, or a bare key
/// at the end of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: Option<String>,
    pub depth: usize,
}

impl Pair {
    pub fn new(key: impl Into<String>, value: Option<&str>, depth: usize) -> Self {
        Self {
            key: key.into(),
            value: value.map(str::to_string),
            depth,
        }
    }
}

/// Whether a sink wants the parse to go on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    Stop,
}
