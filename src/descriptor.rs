//! # Descriptor model
//!
//! The already-parsed schema descriptor tree, as handed over by the plugin
//! framing collaborator. Shapes mirror the schema compiler's own wire layout:
//! the field numbers of each descriptor kind are what source-location paths
//! are expressed in, so the [`crate::semantic::locate`] walker depends on the
//! exact child lists declared here.
//!
//! This module is pure data. Decoding the wire format into these structures,
//! and validating their well-formedness, belongs to the caller.

mod model;
mod node;

pub use model::{
    EnumDescriptor, EnumValueDescriptor, ExtensionRange, FieldDescriptor, FieldType,
    FileDescriptor, GeneratorRequest, MessageDescriptor, MethodDescriptor, OneofDescriptor,
    OptionSet, ServiceDescriptor, SourceInfo, SourceLocation, UninterpretedOption,
};
pub use node::{DescriptorNode, NodeKey, NodeKind};
