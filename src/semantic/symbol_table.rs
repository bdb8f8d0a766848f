//! Central registry of every named element in a descriptor tree, keyed both
//! by scope string and by descriptor-node identity.

mod symbol;
mod table;

pub use symbol::{Symbol, SymbolId};
pub use table::SymbolTable;

#[cfg(test)]
mod tests;
