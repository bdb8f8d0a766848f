//! # Semantic indexing
//!
//! Turns a compiled descriptor tree into a fully cross-referenced symbol
//! table: every named node gets a dotted scope, compiler-recorded comments
//! are routed back onto the nodes they annotate, and field type references
//! resolve to table entries.
//!
//! The pipeline for one output unit is a single ownership chain, synchronous
//! and eager: build the table, attach and prune comments, hand the table to
//! the renderer. [`index_file`] runs the first two stages.

pub mod comments;
pub mod error;
pub mod locate;
pub mod resolver;
pub mod scope;
pub mod symbol_table;

pub use comments::{attach_file_comments, normalize_indent};
pub use error::IndexError;
pub use locate::{LocatedNode, locate};
pub use resolver::{TypeResolver, raw_type_name};
pub use scope::Scope;
pub use symbol_table::{Symbol, SymbolId, SymbolTable};

use crate::descriptor::FileDescriptor;

/// Index one output unit: build the symbol table for `file` and attach every
/// source-location comment, applying visibility pruning along the way.
///
/// The returned table borrows the descriptor tree and is ready for iteration
/// in scope order.
pub fn index_file(file: &FileDescriptor) -> Result<SymbolTable<'_>, IndexError> {
    let mut table = SymbolTable::from_file(file, true)?;
    attach_file_comments(&mut table, file);
    Ok(table)
}
