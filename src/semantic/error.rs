//! Error types for descriptor indexing.

use thiserror::Error;

/// Errors raised while building a symbol table.
///
/// Indexing has no fatal paths of its own; the one representable failure is
/// a collaborator handing over a tree that violates the scope-uniqueness
/// contract.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Two distinct descriptor nodes produced the same scope string.
    #[error("duplicate scope '{scope}' in symbol table")]
    DuplicateScope { scope: String },
}
