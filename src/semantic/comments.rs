//! Comment normalization, attachment, and visibility pruning.
//!
//! Raw comment text arrives from the compiler with tabs and whatever
//! indentation the source file used. Attachment routes each source-location
//! record back to its node via the path walker, de-indents the text, and
//! applies the one mutation the table supports after construction: removing
//! a symbol whose trailing comment marks it `private`.

use tracing::debug;

use crate::descriptor::FileDescriptor;

use super::locate::locate;
use super::symbol_table::SymbolTable;

/// De-indent a block of comment text.
///
/// Tabs become four spaces, trailing spaces and newlines are dropped from
/// the block, leading all-whitespace lines are removed, and the common
/// leading-space count of the non-empty lines is stripped from each of them.
/// A line starting at column zero (or consisting only of spaces) pins the
/// common indent to zero. Idempotent.
pub fn normalize_indent(text: &str) -> String {
    let text = text.replace('\t', "    ");
    let block = text.trim_end_matches([' ', '\n']);

    let mut lines: Vec<&str> = block.split('\n').collect();
    let blank_prefix = lines.iter().take_while(|l| l.trim().is_empty()).count();
    lines.drain(..blank_prefix);

    let mut min_indent: Option<usize> = None;
    for line in &lines {
        if line.is_empty() {
            continue;
        }
        match line.find(|c| c != ' ') {
            Some(0) | None => {
                min_indent = Some(0);
                break;
            }
            Some(n) => min_indent = Some(min_indent.map_or(n, |m| m.min(n))),
        }
    }

    match min_indent {
        Some(indent) if indent > 0 => lines
            .iter()
            .map(|line| if line.is_empty() { line } else { &line[indent..] })
            .collect::<Vec<_>>()
            .join("\n"),
        _ => lines.join("\n"),
    }
}

/// Route every source-location record of `file` onto its symbol.
///
/// A record is skipped when the walk lands on a node that cannot carry
/// documentation, when the path could not be fully resolved, or when the
/// record carries no comment text. After each attachment the symbol's
/// trailing comments are re-checked for the `private` marker, so the marker
/// takes effect regardless of the order records arrive in.
pub fn attach_file_comments(table: &mut SymbolTable<'_>, file: &FileDescriptor) {
    for location in &file.source_info.locations {
        let located = locate(file, &location.path);
        if !located.node.is_named() || !located.is_complete() {
            continue;
        }
        if !location.has_comments() {
            continue;
        }

        let scope_key = located.scope.to_string();
        let Some(id) = table.id_by_scope(&scope_key) else {
            continue;
        };
        let Some(symbol) = table.symbol_mut(id) else {
            continue;
        };

        symbol.attach_location(location);
        if symbol.is_marked_private() {
            debug!(scope = %scope_key, "removing private symbol from table");
            table.remove(&scope_key);
        }
    }
}
