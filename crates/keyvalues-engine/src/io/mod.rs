use crate::builder::TreeBuilder;
use crate::serialize::write_tree;
use crate::tree::Tree;
use keyvalues_syntax::{EventParser, Limits, ParseError, SyntaxLogger};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Read a KeyValues file into a tree
pub fn open_tree<L>(path: &Path, limits: Limits, logger: &mut L) -> Result<Tree, IoError>
where
    L: SyntaxLogger + ?Sized,
{
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let source = path.display().to_string();
    let tree = TreeBuilder::new().build(
        &EventParser::new(limits),
        &source,
        BufReader::new(file),
        logger,
    )?;
    log::debug!("opened {} ({} nodes)", source, tree.len());
    Ok(tree)
}

/// Write a tree to a KeyValues file, replacing its content
pub fn save_tree(tree: &Tree, path: &Path) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_tree(tree, BufWriter::new(file))?;
    log::debug!("saved {} ({} nodes)", path.display(), tree.len());
    Ok(())
}
