use crate::descriptor::{
    DescriptorNode, EnumDescriptor, EnumValueDescriptor, FieldDescriptor, FileDescriptor,
    GeneratorRequest, MessageDescriptor, MethodDescriptor, NodeKind, ServiceDescriptor,
};
use crate::semantic::symbol_table::SymbolTable;

fn sample_file() -> FileDescriptor {
    FileDescriptor {
        name: "build.proto".to_string(),
        package: Some("pkg".into()),
        messages: vec![MessageDescriptor {
            name: "Outer".into(),
            fields: vec![FieldDescriptor {
                name: "value".into(),
                number: 1,
                ..Default::default()
            }],
            nested_messages: vec![MessageDescriptor {
                name: "Inner".into(),
                ..Default::default()
            }],
            nested_enums: vec![EnumDescriptor {
                name: "Kind".into(),
                values: vec![EnumValueDescriptor {
                    name: "KIND_UNSET".into(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }],
        enums: vec![EnumDescriptor {
            name: "TopLevel".into(),
            values: vec![EnumValueDescriptor {
                name: "TOP_UNSET".into(),
                ..Default::default()
            }],
            ..Default::default()
        }],
        services: vec![ServiceDescriptor {
            name: "Api".into(),
            methods: vec![MethodDescriptor {
                name: "Get".into(),
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    }
}

#[test]
fn test_build_indexes_messages_enums_fields_and_values() {
    let file = sample_file();
    let table = SymbolTable::from_file(&file, true).unwrap();

    for scope in [
        "pkg",
        "pkg.Outer",
        "pkg.Outer.value",
        "pkg.Outer.Inner",
        "pkg.Outer.Kind",
        "pkg.Outer.Kind.KIND_UNSET",
        "pkg.TopLevel",
        "pkg.TopLevel.TOP_UNSET",
    ] {
        assert!(table.get(scope).is_some(), "missing scope {scope}");
    }
    assert_eq!(table.len(), 8);
}

#[test]
fn test_services_are_not_walked_from_a_file() {
    let file = sample_file();
    let table = SymbolTable::from_file(&file, true).unwrap();
    assert!(table.get("pkg.Api").is_none());
    assert!(table.get("pkg.Api.Get").is_none());
}

#[test]
fn test_file_without_package_owns_no_symbol() {
    let mut file = sample_file();
    file.package = None;
    let table = SymbolTable::from_file(&file, true).unwrap();

    assert!(table.get("").is_none());
    assert!(table.get("Outer").is_some());
    assert!(table.get("Outer.Inner").is_some());
}

#[test]
fn test_every_symbol_scope_resolves_back_to_its_node() {
    let file = sample_file();
    let table = SymbolTable::from_file(&file, true).unwrap();

    for symbol in table.iter() {
        let node = symbol
            .scope()
            .resolve(DescriptorNode::File(&file))
            .unwrap_or_else(|| panic!("scope {} did not resolve", symbol.scope()));
        assert_eq!(node.key(), symbol.node().key(), "scope {}", symbol.scope());
    }
}

#[test]
fn test_parent_links_follow_nesting() {
    let file = sample_file();
    let table = SymbolTable::from_file(&file, true).unwrap();

    let value = table.get("pkg.Outer.Kind.KIND_UNSET").unwrap();
    let parent = table.symbol(value.parent().unwrap()).unwrap();
    assert_eq!(parent.scope().to_string(), "pkg.Outer.Kind");

    let grandparent = table.symbol(parent.parent().unwrap()).unwrap();
    assert_eq!(grandparent.scope().to_string(), "pkg.Outer");

    let file_symbol = table.symbol(grandparent.parent().unwrap()).unwrap();
    assert_eq!(file_symbol.kind(), NodeKind::File);
    assert!(file_symbol.parent().is_none());
}

#[test]
fn test_iteration_is_in_scope_order() {
    let file = sample_file();
    let table = SymbolTable::from_file(&file, true).unwrap();

    let scopes: Vec<String> = table.iter().map(|s| s.scope().to_string()).collect();
    let mut sorted = scopes.clone();
    sorted.sort();
    assert_eq!(scopes, sorted);
}

#[test]
fn test_iteration_with_ids_round_trips_through_the_arena() {
    let file = sample_file();
    let table = SymbolTable::from_file(&file, true).unwrap();

    let mut seen = 0;
    for (id, symbol) in table.iter_with_ids() {
        let direct = table.symbol(id).unwrap();
        assert_eq!(direct.scope(), symbol.scope());
        assert_eq!(table.id_by_scope(&symbol.scope().to_string()), Some(id));
        seen += 1;
    }
    assert_eq!(seen, table.len());
}

#[test]
fn test_kind_predicates_report_the_indexed_node() {
    let file = sample_file();
    let table = SymbolTable::from_file(&file, true).unwrap();

    assert!(table.get("pkg.Outer").unwrap().is_message());
    assert!(table.get("pkg.Outer.value").unwrap().is_field());
    assert!(table.get("pkg.Outer.Kind").unwrap().is_enum());
    assert!(
        table
            .get("pkg.Outer.Kind.KIND_UNSET")
            .unwrap()
            .is_enum_value()
    );
    assert!(!table.get("pkg.Outer").unwrap().is_enum());

    let service = SymbolTable::from_node(DescriptorNode::Service(&file.services[0]), false)
        .unwrap();
    assert!(service.get("Api").unwrap().is_service());

    let method =
        SymbolTable::from_node(DescriptorNode::Method(&file.services[0].methods[0]), false)
            .unwrap();
    assert!(method.get("Get").unwrap().is_method());
}

#[test]
fn test_node_identity_lookup_matches_scope_lookup() {
    let file = sample_file();
    let table = SymbolTable::from_file(&file, true).unwrap();

    let inner = &file.messages[0].nested_messages[0];
    let by_node = table.get_by_node(DescriptorNode::Message(inner)).unwrap();
    assert_eq!(by_node.scope().to_string(), "pkg.Outer.Inner");
}

#[test]
fn test_from_request_sets_to_generate_from_targets() {
    let mut dependency = sample_file();
    dependency.name = "dep.proto".to_string();
    dependency.package = Some("dep".into());

    let request = GeneratorRequest {
        files_to_generate: vec!["build.proto".to_string()],
        files: vec![sample_file(), dependency],
    };
    let table = SymbolTable::from_request(&request).unwrap();

    assert!(table.get("pkg.Outer").unwrap().to_generate());
    assert!(!table.get("dep.Outer").unwrap().to_generate());
}

#[test]
fn test_from_node_walks_a_bare_message() {
    let file = sample_file();
    let outer = &file.messages[0];
    let table = SymbolTable::from_node(DescriptorNode::Message(outer), false).unwrap();

    assert!(table.get("Outer").is_some());
    assert!(table.get("Outer.Inner").is_some());
    assert!(table.get("Outer.value").is_some());
    assert!(table.get("pkg.Outer").is_none());
}

#[test]
fn test_from_node_indexes_other_named_kinds_as_leaves() {
    let file = sample_file();
    let service = &file.services[0];
    let table = SymbolTable::from_node(DescriptorNode::Service(service), false).unwrap();

    assert_eq!(table.len(), 1);
    let symbol = table.get("Api").unwrap();
    assert_eq!(symbol.kind(), NodeKind::Service);
    // no descent into methods through the generic leaf path
    assert!(table.get("Api.Get").is_none());
}

#[test]
fn test_duplicate_scope_is_an_invariant_violation() {
    let file = FileDescriptor {
        name: "dup.proto".to_string(),
        package: Some("pkg".into()),
        messages: vec![
            MessageDescriptor {
                name: "Same".into(),
                ..Default::default()
            },
            MessageDescriptor {
                name: "Same".into(),
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    assert!(SymbolTable::from_file(&file, true).is_err());
}

#[test]
fn test_files_sharing_a_package_share_the_package_scope() {
    let mut first = sample_file();
    first.name = "a.proto".to_string();
    let mut second = sample_file();
    second.name = "b.proto".to_string();
    second.messages[0].name = "Other".into();
    second.enums.clear();

    let request = GeneratorRequest {
        files_to_generate: vec!["a.proto".to_string(), "b.proto".to_string()],
        files: vec![first, second],
    };
    // package scopes are path prefixes, not node-owning; the second file
    // symbol takes the scope over instead of erroring
    let table = SymbolTable::from_request(&request).unwrap();
    assert_eq!(table.get("pkg").unwrap().kind(), NodeKind::File);
    assert!(table.get("pkg.Outer").is_some());
    assert!(table.get("pkg.Other").is_some());
}
