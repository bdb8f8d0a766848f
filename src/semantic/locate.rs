//! Replaying source-location field-paths onto descriptor nodes.
//!
//! The schema compiler addresses every node it attaches comments to with a
//! field-path: alternating (field-number, index) pairs descending from the
//! file root, where the field numbers are those of the compiler's own wire
//! layout. [`locate`] replays exactly that traversal, accumulating the dotted
//! scope along the way, so a comment record can be routed back to the node it
//! annotates without access to the compiler's symbol table.

use crate::descriptor::{DescriptorNode, FileDescriptor};

use super::scope::Scope;

/// The result of replaying a field-path.
#[derive(Debug, Clone)]
pub struct LocatedNode<'a, 'p> {
    /// Scope accumulated over every node visited, the final one included.
    pub scope: Scope,
    /// The node the walk stopped on.
    pub node: DescriptorNode<'a>,
    /// The unconsumed remainder of the path. Empty when the path was fully
    /// resolved; non-empty when an unrecognized field number (or a missing
    /// child) halted the walk early.
    pub trailing: &'p [i32],
}

impl LocatedNode<'_, '_> {
    /// True when the whole path was consumed.
    pub fn is_complete(&self) -> bool {
        self.trailing.is_empty()
    }
}

/// One step of the walk, per the fixed field-number table of a node kind.
enum Step<'a> {
    /// Consume a (field-number, index) pair and descend into a child list.
    Descend(DescriptorNode<'a>),
    /// Consume only the field number and move to a singular child.
    Forward(DescriptorNode<'a>),
    /// Field number not in this kind's table: stop, don't error.
    Halt,
}

/// Walk `path` down from `file`, returning the node it addresses.
///
/// The walk is total: any well-formed path terminates with either a full
/// match (empty trailing) or a partial one (the remainder in `trailing`).
pub fn locate<'a, 'p>(file: &'a FileDescriptor, path: &'p [i32]) -> LocatedNode<'a, 'p> {
    let mut node = DescriptorNode::File(file);
    let mut scope = Scope::root();
    let mut rest = path;

    loop {
        if let Some(segment) = node.scope_segment() {
            scope = scope.with(segment);
        }

        if rest.is_empty() {
            return LocatedNode {
                scope,
                node,
                trailing: rest,
            };
        }

        let field = rest[0];
        let index = rest.get(1).copied().unwrap_or(-1);

        match step(node, field, index) {
            Step::Descend(child) => {
                node = child;
                rest = &rest[2.min(rest.len())..];
            }
            Step::Forward(child) => {
                node = child;
                rest = &rest[1..];
            }
            Step::Halt => {
                return LocatedNode {
                    scope,
                    node,
                    trailing: rest,
                };
            }
        }
    }
}

fn get<T>(items: &[T], index: i32) -> Option<&T> {
    usize::try_from(index).ok().and_then(|i| items.get(i))
}

/// Child lookup by field number, one fixed table per node kind.
fn step<'a>(node: DescriptorNode<'a>, field: i32, index: i32) -> Step<'a> {
    use DescriptorNode as N;

    // A recognized field number whose child is absent (missing options block,
    // out-of-range index) halts like an unrecognized one would.
    macro_rules! descend {
        ($items:expr, $variant:ident) => {
            match get($items, index) {
                Some(child) => Step::Descend(N::$variant(child)),
                None => Step::Halt,
            }
        };
    }
    macro_rules! forward_options {
        ($options:expr) => {
            match $options {
                Some(options) => Step::Forward(N::Options(options)),
                None => Step::Halt,
            }
        };
    }

    match node {
        N::File(f) => match field {
            4 => descend!(&f.messages, Message),
            5 => descend!(&f.enums, Enum),
            6 => descend!(&f.services, Service),
            7 => descend!(&f.extensions, Field),
            8 => forward_options!(&f.options),
            9 => Step::Forward(N::SourceInfo(&f.source_info)),
            _ => Step::Halt,
        },
        N::Message(m) => match field {
            2 => descend!(&m.fields, Field),
            3 => descend!(&m.nested_messages, Message),
            4 => descend!(&m.nested_enums, Enum),
            5 => descend!(&m.extension_ranges, ExtensionRange),
            6 => descend!(&m.extensions, Field),
            8 => descend!(&m.oneofs, Oneof),
            7 => forward_options!(&m.options),
            _ => Step::Halt,
        },
        N::Enum(e) => match field {
            2 => descend!(&e.values, EnumValue),
            3 => forward_options!(&e.options),
            _ => Step::Halt,
        },
        N::EnumValue(v) => match field {
            3 => forward_options!(&v.options),
            _ => Step::Halt,
        },
        N::Service(s) => match field {
            2 => descend!(&s.methods, Method),
            3 => forward_options!(&s.options),
            _ => Step::Halt,
        },
        N::Method(m) => match field {
            4 => forward_options!(&m.options),
            _ => Step::Halt,
        },
        N::Field(f) => match field {
            8 => forward_options!(&f.options),
            _ => Step::Halt,
        },
        // Uninterpreted options live at 999; the pair is consumed without
        // indexing into the list, so the walk stays on the container.
        N::Options(_) => match field {
            999 => Step::Descend(node),
            _ => Step::Halt,
        },
        N::Oneof(_) | N::ExtensionRange(_) | N::SourceInfo(_) => Step::Halt,
    }
}
