use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {source_name} at line {line}: {source}")]
    Read {
        source_name: String,
        line: usize,
        #[source]
        source: std::io::Error,
    },
}
