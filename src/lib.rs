//! # protodoc-base
//!
//! Core library for indexing compiled protobuf descriptor trees into a
//! cross-referenced symbol table for documentation generation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! semantic   → Scope, path walker, symbol table, comments, type resolver
//!   ↓
//! descriptor → Descriptor data model, tagged node dispatch
//! ```
//!
//! The plugin framing (stdio request/response) and the markup templating
//! that consumes the finished table live outside this crate; so does the
//! decoding of descriptors into the [`descriptor`] model.

/// Descriptor data model: the already-parsed schema tree and its node view
pub mod descriptor;

/// Semantic indexing: scopes, path replay, symbol table, comment attachment
pub mod semantic;

// Re-export the types a rendering collaborator needs
pub use descriptor::{DescriptorNode, FileDescriptor, GeneratorRequest, NodeKind};
pub use semantic::{
    IndexError, Scope, Symbol, SymbolId, SymbolTable, TypeResolver, index_file, raw_type_name,
};
