use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::descriptor::{
    DescriptorNode, EnumDescriptor, FileDescriptor, GeneratorRequest, MessageDescriptor, NodeKey,
    NodeKind,
};

use super::super::error::IndexError;
use super::super::scope::Scope;
use super::symbol::{Symbol, SymbolId};

/// Dual-keyed index of every named node in a descriptor tree.
///
/// Symbols live in an arena; the scope-keyed map drives iteration (sorted to
/// scope order once construction finishes) and the node-keyed map lets an
/// already-resolved descriptor reference reach its symbol without re-deriving
/// the scope string. Pruning removes entries from both maps atomically; the
/// arena slot stays behind, unreachable.
pub struct SymbolTable<'a> {
    arena: Vec<Symbol<'a>>,
    by_scope: IndexMap<String, SymbolId>,
    by_node: FxHashMap<NodeKey, SymbolId>,
}

impl<'a> SymbolTable<'a> {
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            by_scope: IndexMap::new(),
            by_node: FxHashMap::default(),
        }
    }

    /// Index every file in a request. A symbol's `to_generate` flag is set
    /// exactly when its file is one of the request's output targets.
    pub fn from_request(request: &'a GeneratorRequest) -> Result<Self, IndexError> {
        let mut table = Self::new();
        for file in &request.files {
            table.walk_file(request.is_target(&file.name), file)?;
        }
        table.by_scope.sort_unstable_keys();
        Ok(table)
    }

    /// Index a single file, the common per-output-unit entry point.
    pub fn from_file(file: &'a FileDescriptor, to_generate: bool) -> Result<Self, IndexError> {
        let mut table = Self::new();
        table.walk_file(to_generate, file)?;
        table.by_scope.sort_unstable_keys();
        Ok(table)
    }

    /// Index an arbitrary subtree. Messages and enums are walked recursively;
    /// any other named node becomes a single leaf symbol. Unnamed roots
    /// produce an empty table.
    pub fn from_node(node: DescriptorNode<'a>, to_generate: bool) -> Result<Self, IndexError> {
        let mut table = Self::new();
        match node {
            DescriptorNode::File(file) => table.walk_file(to_generate, file)?,
            DescriptorNode::Message(message) => {
                table.walk_message(to_generate, None, Scope::root(), message)?;
            }
            DescriptorNode::Enum(enumeration) => {
                table.walk_enum(to_generate, None, Scope::root(), enumeration)?;
            }
            _ if node.is_named() => {
                table.walk_leaf(to_generate, None, Scope::root(), node)?;
            }
            _ => {}
        }
        table.by_scope.sort_unstable_keys();
        Ok(table)
    }

    fn walk_file(&mut self, to_generate: bool, file: &'a FileDescriptor) -> Result<(), IndexError> {
        let mut scope = Scope::root();
        let mut parent = None;

        // Only a file with a package declaration owns a symbol of its own;
        // the package scope doubles as that symbol's scope.
        if let Some(package) = file.declared_package() {
            scope = scope.with(package.clone());
            let id = self.insert(Symbol::new(
                scope.clone(),
                DescriptorNode::File(file),
                None,
                to_generate,
            ))?;
            parent = Some(id);
        }

        for message in &file.messages {
            self.walk_message(to_generate, parent, scope.clone(), message)?;
        }
        for enumeration in &file.enums {
            self.walk_enum(to_generate, parent, scope.clone(), enumeration)?;
        }
        Ok(())
    }

    fn walk_message(
        &mut self,
        to_generate: bool,
        parent: Option<SymbolId>,
        scope: Scope,
        message: &'a MessageDescriptor,
    ) -> Result<(), IndexError> {
        let scope = scope.with(message.name.clone());
        let id = self.insert(Symbol::new(
            scope.clone(),
            DescriptorNode::Message(message),
            parent,
            to_generate,
        ))?;

        for nested in &message.nested_messages {
            self.walk_message(to_generate, Some(id), scope.clone(), nested)?;
        }
        for enumeration in &message.nested_enums {
            self.walk_enum(to_generate, Some(id), scope.clone(), enumeration)?;
        }
        for field in &message.fields {
            self.walk_leaf(
                to_generate,
                Some(id),
                scope.clone(),
                DescriptorNode::Field(field),
            )?;
        }
        Ok(())
    }

    fn walk_enum(
        &mut self,
        to_generate: bool,
        parent: Option<SymbolId>,
        scope: Scope,
        enumeration: &'a EnumDescriptor,
    ) -> Result<(), IndexError> {
        let scope = scope.with(enumeration.name.clone());
        let id = self.insert(Symbol::new(
            scope.clone(),
            DescriptorNode::Enum(enumeration),
            parent,
            to_generate,
        ))?;

        for value in &enumeration.values {
            self.walk_leaf(
                to_generate,
                Some(id),
                scope.clone(),
                DescriptorNode::EnumValue(value),
            )?;
        }
        Ok(())
    }

    fn walk_leaf(
        &mut self,
        to_generate: bool,
        parent: Option<SymbolId>,
        scope: Scope,
        node: DescriptorNode<'a>,
    ) -> Result<(), IndexError> {
        let name = node.name().cloned().unwrap_or_default();
        self.insert(Symbol::new(scope.with(name), node, parent, to_generate))?;
        Ok(())
    }

    /// Insert a symbol under both keys.
    ///
    /// Scope uniqueness is this table's invariant, with one carve-out:
    /// package scopes are path prefixes rather than node-owning, so a later
    /// file symbol may take over a package scope already held by another
    /// file symbol.
    fn insert(&mut self, symbol: Symbol<'a>) -> Result<SymbolId, IndexError> {
        let scope_key = symbol.scope().to_string();
        if let Some(&existing) = self.by_scope.get(&scope_key) {
            let existing_kind = self.arena[existing.index()].kind();
            if existing_kind != NodeKind::File || symbol.kind() != NodeKind::File {
                return Err(IndexError::DuplicateScope { scope: scope_key });
            }
            debug!(scope = %scope_key, "package scope re-declared; replacing file symbol");
            self.by_node.remove(&self.arena[existing.index()].node().key());
        }

        let id = SymbolId::new(self.arena.len());
        self.by_node.insert(symbol.node().key(), id);
        self.by_scope.insert(scope_key, id);
        self.arena.push(symbol);
        Ok(id)
    }

    /// Number of indexed (non-pruned) symbols.
    pub fn len(&self) -> usize {
        self.by_scope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_scope.is_empty()
    }

    pub fn get(&self, scope: &str) -> Option<&Symbol<'a>> {
        let id = self.by_scope.get(scope)?;
        self.arena.get(id.index())
    }

    pub fn id_by_scope(&self, scope: &str) -> Option<SymbolId> {
        self.by_scope.get(scope).copied()
    }

    /// Look a symbol up by the identity of its descriptor node.
    pub fn get_by_node(&self, node: DescriptorNode<'_>) -> Option<&Symbol<'a>> {
        let id = self.by_node.get(&node.key())?;
        self.arena.get(id.index())
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol<'a>> {
        self.arena.get(id.index())
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> Option<&mut Symbol<'a>> {
        self.arena.get_mut(id.index())
    }

    /// Remove the symbol at `scope` from both maps. Idempotent: removing an
    /// absent scope is a no-op. A removed symbol is never re-inserted.
    pub fn remove(&mut self, scope: &str) -> bool {
        let Some(id) = self.by_scope.shift_remove(scope) else {
            return false;
        };
        let key = self.arena[id.index()].node().key();
        self.by_node.remove(&key);
        true
    }

    /// Iterate symbols in scope order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol<'a>> {
        self.by_scope
            .values()
            .filter_map(|id| self.arena.get(id.index()))
    }

    /// Iterate symbols in scope order, with their arena ids.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (SymbolId, &Symbol<'a>)> {
        self.by_scope
            .values()
            .filter_map(|id| self.arena.get(id.index()).map(|s| (*id, s)))
    }
}

impl Default for SymbolTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}
