//! Tagged-variant view over the descriptor tree.
//!
//! Every traversal in the semantic layer dispatches on [`DescriptorNode`]
//! rather than probing capabilities at runtime: the set of node kinds is
//! closed, and each operation (scope-segment accumulation, child lookup by
//! field number, identity keying) is a single `match` over it.

use smol_str::{SmolStr, format_smolstr};

use super::model::{
    EnumDescriptor, EnumValueDescriptor, ExtensionRange, FieldDescriptor, FileDescriptor,
    MessageDescriptor, MethodDescriptor, OneofDescriptor, OptionSet, ServiceDescriptor, SourceInfo,
};

/// A borrowed reference to any node in a descriptor tree.
#[derive(Debug, Clone, Copy)]
pub enum DescriptorNode<'a> {
    File(&'a FileDescriptor),
    Message(&'a MessageDescriptor),
    Field(&'a FieldDescriptor),
    Enum(&'a EnumDescriptor),
    EnumValue(&'a EnumValueDescriptor),
    Service(&'a ServiceDescriptor),
    Method(&'a MethodDescriptor),
    Oneof(&'a OneofDescriptor),
    ExtensionRange(&'a ExtensionRange),
    Options(&'a OptionSet),
    SourceInfo(&'a SourceInfo),
}

/// The closed set of descriptor node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Message,
    Field,
    Enum,
    EnumValue,
    Service,
    Method,
    Oneof,
    ExtensionRange,
    Options,
    SourceInfo,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::File => "File",
            NodeKind::Message => "Message",
            NodeKind::Field => "Field",
            NodeKind::Enum => "Enum",
            NodeKind::EnumValue => "EnumValue",
            NodeKind::Service => "Service",
            NodeKind::Method => "Method",
            NodeKind::Oneof => "Oneof",
            NodeKind::ExtensionRange => "ExtensionRange",
            NodeKind::Options => "Options",
            NodeKind::SourceInfo => "SourceInfo",
        }
    }
}

/// Identity key for a descriptor node: its kind plus its address.
///
/// The descriptor tree is immutable while a symbol table borrows it, so the
/// address of a node is a stable identity for the table's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    kind: NodeKind,
    addr: usize,
}

impl<'a> DescriptorNode<'a> {
    pub fn kind(self) -> NodeKind {
        match self {
            DescriptorNode::File(_) => NodeKind::File,
            DescriptorNode::Message(_) => NodeKind::Message,
            DescriptorNode::Field(_) => NodeKind::Field,
            DescriptorNode::Enum(_) => NodeKind::Enum,
            DescriptorNode::EnumValue(_) => NodeKind::EnumValue,
            DescriptorNode::Service(_) => NodeKind::Service,
            DescriptorNode::Method(_) => NodeKind::Method,
            DescriptorNode::Oneof(_) => NodeKind::Oneof,
            DescriptorNode::ExtensionRange(_) => NodeKind::ExtensionRange,
            DescriptorNode::Options(_) => NodeKind::Options,
            DescriptorNode::SourceInfo(_) => NodeKind::SourceInfo,
        }
    }

    /// The node's own name. `None` for files and the unnamed auxiliary kinds.
    pub fn name(self) -> Option<&'a SmolStr> {
        match self {
            DescriptorNode::Message(m) => Some(&m.name),
            DescriptorNode::Field(f) => Some(&f.name),
            DescriptorNode::Enum(e) => Some(&e.name),
            DescriptorNode::EnumValue(v) => Some(&v.name),
            DescriptorNode::Service(s) => Some(&s.name),
            DescriptorNode::Method(m) => Some(&m.name),
            DescriptorNode::Oneof(o) => Some(&o.name),
            DescriptorNode::File(_)
            | DescriptorNode::ExtensionRange(_)
            | DescriptorNode::Options(_)
            | DescriptorNode::SourceInfo(_) => None,
        }
    }

    /// Whether this node is eligible for documentation attachment: files and
    /// every name-carrying kind. Options containers and the other auxiliary
    /// kinds are not.
    pub fn is_named(self) -> bool {
        !matches!(
            self,
            DescriptorNode::ExtensionRange(_)
                | DescriptorNode::Options(_)
                | DescriptorNode::SourceInfo(_)
        )
    }

    /// The scope segment this node contributes during a path walk.
    ///
    /// Files contribute their package (nothing when no package is declared),
    /// named kinds contribute their name, options containers a fixed
    /// placeholder, and the remaining kinds an `<unknown:KIND>` placeholder
    /// that keeps the walk total.
    pub fn scope_segment(self) -> Option<SmolStr> {
        match self {
            DescriptorNode::File(f) => f.declared_package().cloned(),
            DescriptorNode::Options(_) => Some(SmolStr::new_static("<options>")),
            DescriptorNode::ExtensionRange(_) | DescriptorNode::SourceInfo(_) => {
                Some(format_smolstr!("<unknown:{}>", self.kind().as_str()))
            }
            _ => self.name().cloned(),
        }
    }

    /// Identity key for the symbol table's node-keyed map.
    pub fn key(self) -> NodeKey {
        let addr = match self {
            DescriptorNode::File(f) => f as *const _ as usize,
            DescriptorNode::Message(m) => m as *const _ as usize,
            DescriptorNode::Field(f) => f as *const _ as usize,
            DescriptorNode::Enum(e) => e as *const _ as usize,
            DescriptorNode::EnumValue(v) => v as *const _ as usize,
            DescriptorNode::Service(s) => s as *const _ as usize,
            DescriptorNode::Method(m) => m as *const _ as usize,
            DescriptorNode::Oneof(o) => o as *const _ as usize,
            DescriptorNode::ExtensionRange(r) => r as *const _ as usize,
            DescriptorNode::Options(o) => o as *const _ as usize,
            DescriptorNode::SourceInfo(s) => s as *const _ as usize,
        };
        NodeKey {
            kind: self.kind(),
            addr,
        }
    }
}
