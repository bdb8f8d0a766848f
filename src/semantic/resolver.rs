//! Resolving field type-name text to symbol table entries.

use tracing::trace;

use crate::descriptor::{DescriptorNode, GeneratorRequest};

use super::scope::Scope;
use super::symbol_table::{Symbol, SymbolTable};

/// Resolves the raw type-name text attached to fields into entries of a
/// symbol table, for the rendering layer to turn into cross-links.
///
/// Absolute references (leading `.`) are resolved against every descriptor
/// tree in the request; relative ones search outward from the requesting
/// symbol through its enclosing scopes, the way the source schema language
/// itself looks names up.
pub struct TypeResolver<'a> {
    request: &'a GeneratorRequest,
    table: &'a SymbolTable<'a>,
}

impl<'a> TypeResolver<'a> {
    pub fn new(request: &'a GeneratorRequest, table: &'a SymbolTable<'a>) -> Self {
        Self { request, table }
    }

    pub fn table(&self) -> &SymbolTable<'a> {
        self.table
    }

    /// Resolve `type_name` as seen from `from`.
    ///
    /// `None` is a normal outcome, not an error: primitive type names, names
    /// whose target lies outside the indexed tree, and names whose target
    /// was pruned all come back unresolved, and the caller renders a plain
    /// type label instead of a cross-reference.
    pub fn resolve(&self, from: &Symbol<'a>, type_name: &str) -> Option<&Symbol<'a>> {
        if type_name.is_empty() {
            return None;
        }

        let (scope, absolute) = Scope::parse(type_name);
        if absolute {
            let node = self
                .request
                .files
                .iter()
                .find_map(|file| scope.resolve(DescriptorNode::File(file)))?;
            trace!(reference = type_name, "absolute reference resolved to node");
            return self.table.get_by_node(node);
        }

        // Look the name up inside the requesting symbol's own scope first,
        // then inside each enclosing scope in turn. Each anchor also gets a
        // self-inclusive attempt, so a package-qualified name consumes the
        // package segment once the walk reaches the file symbol. The first
        // node match decides the outcome, whether or not the table still
        // holds an entry for it.
        let mut current = Some(from);
        while let Some(symbol) = current {
            if let Some(node) = scope
                .resolve_within(symbol.node())
                .or_else(|| scope.resolve(symbol.node()))
            {
                trace!(
                    reference = type_name,
                    anchor = %symbol.scope(),
                    "relative reference resolved to node"
                );
                return self.table.get_by_node(node);
            }
            current = symbol.parent().and_then(|id| self.table.symbol(id));
        }

        trace!(reference = type_name, "reference left unresolved");
        None
    }
}

/// The plain fallback label for an unresolved reference: the reference text
/// with any leading separator stripped.
pub fn raw_type_name(type_name: &str) -> &str {
    type_name.strip_prefix('.').unwrap_or(type_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{
        FieldDescriptor, FieldType, FileDescriptor, MessageDescriptor, NodeKind,
    };

    fn message_field(name: &str, type_name: &str) -> FieldDescriptor {
        FieldDescriptor {
            name: name.into(),
            field_type: FieldType::Message,
            type_name: Some(type_name.into()),
            ..Default::default()
        }
    }

    fn request_with_file(file: FileDescriptor) -> GeneratorRequest {
        GeneratorRequest {
            files_to_generate: vec![file.name.clone()],
            files: vec![file],
        }
    }

    // package pkg with Foo { bar: .pkg.Baz, Inner }, Baz
    fn sample_file() -> FileDescriptor {
        FileDescriptor {
            name: "refs.proto".to_string(),
            package: Some("pkg".into()),
            messages: vec![
                MessageDescriptor {
                    name: "Foo".into(),
                    fields: vec![
                        message_field("bar", ".pkg.Baz"),
                        message_field("nested", "Inner"),
                    ],
                    nested_messages: vec![MessageDescriptor {
                        name: "Inner".into(),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                MessageDescriptor {
                    name: "Baz".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_absolute_reference_resolves_through_the_request() {
        let request = request_with_file(sample_file());
        let table = SymbolTable::from_request(&request).unwrap();
        let resolver = TypeResolver::new(&request, &table);

        let from = table.get("pkg.Foo").unwrap();
        let target = resolver.resolve(from, ".pkg.Baz").unwrap();
        assert_eq!(target.scope().to_string(), "pkg.Baz");
    }

    #[test]
    fn test_relative_reference_matches_the_nearest_scope_first() {
        let request = request_with_file(sample_file());
        let table = SymbolTable::from_request(&request).unwrap();
        let resolver = TypeResolver::new(&request, &table);

        let from = table.get("pkg.Foo").unwrap();
        let target = resolver.resolve(from, "Inner").unwrap();
        assert_eq!(target.scope().to_string(), "pkg.Foo.Inner");
        assert_eq!(target.kind(), NodeKind::Message);
    }

    #[test]
    fn test_relative_reference_walks_up_to_enclosing_scopes() {
        let request = request_with_file(sample_file());
        let table = SymbolTable::from_request(&request).unwrap();
        let resolver = TypeResolver::new(&request, &table);

        // Baz is a sibling of Foo, reachable only via the file scope.
        let from = table.get("pkg.Foo").unwrap();
        let target = resolver.resolve(from, "Baz").unwrap();
        assert_eq!(target.scope().to_string(), "pkg.Baz");
    }

    #[test]
    fn test_package_qualified_relative_reference_resolves_at_the_file() {
        let request = request_with_file(sample_file());
        let table = SymbolTable::from_request(&request).unwrap();
        let resolver = TypeResolver::new(&request, &table);

        // no enclosing scope contains a "pkg" child; the file symbol itself
        // consumes the package segment
        let from = table.get("pkg.Foo").unwrap();
        let target = resolver.resolve(from, "pkg.Baz").unwrap();
        assert_eq!(target.scope().to_string(), "pkg.Baz");

        let nested = resolver.resolve(from, "pkg.Foo.Inner").unwrap();
        assert_eq!(nested.scope().to_string(), "pkg.Foo.Inner");
    }

    #[test]
    fn test_primitive_type_names_stay_unresolved() {
        let request = request_with_file(sample_file());
        let table = SymbolTable::from_request(&request).unwrap();
        let resolver = TypeResolver::new(&request, &table);

        let from = table.get("pkg.Foo").unwrap();
        assert!(resolver.resolve(from, "string").is_none());
        assert!(resolver.resolve(from, "").is_none());
    }

    #[test]
    fn test_pruned_target_fails_resolution_without_error() {
        let request = request_with_file(sample_file());
        let mut table = SymbolTable::from_request(&request).unwrap();
        assert!(table.remove("pkg.Baz"));

        let resolver = TypeResolver::new(&request, &table);
        let from = resolver.table().get("pkg.Foo").unwrap();
        assert!(resolver.resolve(from, ".pkg.Baz").is_none());
    }

    #[test]
    fn test_raw_type_name_strips_leading_separator() {
        assert_eq!(raw_type_name(".pkg.Baz"), "pkg.Baz");
        assert_eq!(raw_type_name("string"), "string");
    }
}
