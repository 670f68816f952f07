//! Writing a [`Tree`] back out as KeyValues text.
//!
//! Output is one line per keyed node, indented with one tab per level:
//!
//! ```text
//! "root"
//! {
//! 	"name" "demo"
//! 	"empty" ""
//! 	"bare"
//! }
//! ```
//!
//! Braces get their own line at the depth of the block's owner. Nodes with
//! no key, or an empty one, are skipped but their children are still
//! written. A root without a key and without siblings is treated as an
//! unnamed container, so its children come out at the top level. Comments
//! and original spacing are not kept.

use std::io::{self, Write};

use crate::tree::Tree;

/// Render the whole tree.
pub fn serialize(tree: &Tree) -> String {
    let mut out = String::new();
    let root = tree.root();
    let implicit_root = tree.key(root).is_none_or(str::is_empty)
        && tree.next_sibling(root).is_none();

    let (mut next, base) = if implicit_root {
        (tree.first_child(root), 1)
    } else {
        (Some(root), 0)
    };

    let mut depth: isize = base;
    let mut open: usize = 0;
    while let Some(id) = next {
        let level = usize::try_from(depth - base).unwrap_or(0);
        while open > level {
            open -= 1;
            push_line(&mut out, open, "}");
        }
        while open < level {
            push_line(&mut out, open, "{");
            open += 1;
        }

        if let Some(key) = tree.key(id).filter(|key| !key.is_empty()) {
            let line = match tree.value(id) {
                Some(value) => format!("\"{key}\" \"{value}\""),
                None => format!("\"{key}\""),
            };
            push_line(&mut out, level, &line);
        }

        next = tree.next_traverse_step(id, &mut depth);
        if depth < base {
            break;
        }
    }

    while open > 0 {
        open -= 1;
        push_line(&mut out, open, "}");
    }
    out
}

pub fn write_tree<W: Write>(tree: &Tree, mut out: W) -> io::Result<()> {
    out.write_all(serialize(tree).as_bytes())?;
    out.flush()
}

fn push_line(out: &mut String, level: usize, text: &str) {
    for _ in 0..level {
        out.push('\t');
    }
    out.push_str(text);
    out.push('\n');
}
