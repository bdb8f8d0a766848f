//! Indexed descriptor nodes and their attached documentation.

use crate::descriptor::{DescriptorNode, NodeKind, SourceLocation};

use super::super::comments::normalize_indent;
use super::super::scope::Scope;

/// Unique identifier for a symbol in the table's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A descriptor node indexed under its scope, together with the comments the
/// compiler recovered for it.
///
/// The parent link is a plain arena id, never independent ownership: the
/// table owns every symbol, and parents are looked up through it.
#[derive(Debug, Clone)]
pub struct Symbol<'a> {
    scope: Scope,
    node: DescriptorNode<'a>,
    parent: Option<SymbolId>,
    to_generate: bool,
    leading_detached: Vec<String>,
    leading: Vec<String>,
    trailing: Vec<String>,
}

impl<'a> Symbol<'a> {
    pub(crate) fn new(
        scope: Scope,
        node: DescriptorNode<'a>,
        parent: Option<SymbolId>,
        to_generate: bool,
    ) -> Self {
        Self {
            scope,
            node,
            parent,
            to_generate,
            leading_detached: Vec::new(),
            leading: Vec::new(),
            trailing: Vec::new(),
        }
    }

    /// The dotted qualified name of this symbol.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// The descriptor node this symbol indexes.
    pub fn node(&self) -> DescriptorNode<'a> {
        self.node
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// Arena id of the enclosing symbol, if any.
    pub fn parent(&self) -> Option<SymbolId> {
        self.parent
    }

    /// Whether this symbol belongs to a designated output target.
    pub fn to_generate(&self) -> bool {
        self.to_generate
    }

    /// Comment paragraphs detached from the declaration by blank lines, in
    /// source order.
    pub fn leading_detached_comments(&self) -> &[String] {
        &self.leading_detached
    }

    /// Comment paragraphs immediately preceding the declaration.
    pub fn leading_comments(&self) -> &[String] {
        &self.leading
    }

    /// Comment paragraphs on or directly after the declaration.
    pub fn trailing_comments(&self) -> &[String] {
        &self.trailing
    }

    pub fn is_message(&self) -> bool {
        matches!(self.kind(), NodeKind::Message)
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind(), NodeKind::Enum)
    }

    pub fn is_enum_value(&self) -> bool {
        matches!(self.kind(), NodeKind::EnumValue)
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind(), NodeKind::Field)
    }

    pub fn is_service(&self) -> bool {
        matches!(self.kind(), NodeKind::Service)
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind(), NodeKind::Method)
    }

    /// Append the comment text of one source-location record, normalizing
    /// each piece independently. Comment lists are append-only; records for
    /// the same node accumulate in processing order.
    pub fn attach_location(&mut self, location: &SourceLocation) {
        if let Some(text) = location.leading.as_deref().filter(|t| !t.is_empty()) {
            self.leading.push(normalize_indent(text));
        }
        if let Some(text) = location.trailing.as_deref().filter(|t| !t.is_empty()) {
            self.trailing.push(normalize_indent(text));
        }
        for text in &location.leading_detached {
            self.leading_detached.push(normalize_indent(text));
        }
    }

    /// True if any trailing comment trims to the visibility marker that
    /// excludes this symbol from generated documentation.
    pub fn is_marked_private(&self) -> bool {
        self.trailing.iter().any(|c| c.trim() == "private")
    }
}

impl std::fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.scope.fmt(f)
    }
}
