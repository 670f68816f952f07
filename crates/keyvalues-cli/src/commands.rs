use anyhow::{Context, Result};
use keyvalues_engine::{SearchCursor, SearchOptions, open_tree, save_tree, write_tree};
use keyvalues_syntax::{CollectingLogger, EventParser, Flow, Limits, LogLogger};
use std::io::Write;
use std::path::Path;

/// Print `depth<TAB>key<TAB>value` for every pair. Pairs without a value
/// have no third column.
pub fn events<W: Write>(path: &Path, limits: Limits, out: &mut W) -> Result<()> {
    let mut failed = None;
    let mut print = |_source: &str, key: &str, value: Option<&str>, depth: usize| {
        let written = match value {
            Some(value) => writeln!(out, "{depth}\t{key}\t{value}"),
            None => writeln!(out, "{depth}\t{key}"),
        };
        match written {
            Ok(()) => Flow::Continue,
            Err(err) => {
                failed = Some(err);
                Flow::Stop
            }
        }
    };

    EventParser::new(limits).parse_file(path, &mut print, &mut LogLogger)?;
    if let Some(err) = failed {
        return Err(err).context("writing events");
    }
    Ok(())
}

/// Parse into a tree and serialize it, to `output` or `out`.
pub fn fmt<W: Write>(path: &Path, output: Option<&Path>, limits: Limits, out: &mut W) -> Result<()> {
    let tree = open_tree(path, limits, &mut LogLogger)?;
    match output {
        Some(output) => save_tree(&tree, output)
            .with_context(|| format!("saving {}", output.display()))?,
        None => write_tree(&tree, out)?,
    }
    Ok(())
}

/// Print `level<TAB>key<TAB>value` for every match in document order.
/// Returns the number of matches.
pub fn find<W: Write>(
    path: &Path,
    pattern: &str,
    options: SearchOptions,
    limits: Limits,
    out: &mut W,
) -> Result<usize> {
    let tree = open_tree(path, limits, &mut LogLogger)?;
    let mut cursor = SearchCursor::new();
    cursor.set_search(&tree, pattern, options);

    let found = cursor.find_all();
    for &node in &found {
        let level = tree.level(node).unwrap_or_default();
        let key = tree.key(node).unwrap_or_default();
        match tree.value(node) {
            Some(value) => writeln!(out, "{level}\t{key}\t{value}")?,
            None => writeln!(out, "{level}\t{key}")?,
        }
    }
    log::debug!("{} matches for '{pattern}' in {}", found.len(), path.display());
    Ok(found.len())
}

/// Print every diagnostic. Returns whether the document is clean.
pub fn check<W: Write>(path: &Path, limits: Limits, out: &mut W) -> Result<bool> {
    let mut logger = CollectingLogger::new();
    let mut ignore = |_: &str, _: &str, _: Option<&str>, _: usize| Flow::Continue;
    let summary = EventParser::new(limits).parse_file(path, &mut ignore, &mut logger)?;

    for diagnostic in &logger.diagnostics {
        writeln!(out, "{diagnostic}")?;
    }
    writeln!(
        out,
        "{}: {} pairs, {} problems",
        path.display(),
        summary.pairs,
        logger.diagnostics.len()
    )?;
    Ok(logger.is_empty())
}
