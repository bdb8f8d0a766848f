//! Plain data structures for the compiled descriptor tree.

use smol_str::SmolStr;

/// The full generation request: every descriptor tree under consideration
/// plus the subset of file names designated as output targets.
#[derive(Debug, Clone, Default)]
pub struct GeneratorRequest {
    /// File names the plugin was asked to generate output for.
    pub files_to_generate: Vec<String>,
    /// All descriptor trees, including transitive dependencies.
    pub files: Vec<FileDescriptor>,
}

impl GeneratorRequest {
    /// Whether `file_name` is one of the designated output targets.
    pub fn is_target(&self, file_name: &str) -> bool {
        self.files_to_generate.iter().any(|f| f == file_name)
    }
}

/// A single compiled schema file.
#[derive(Debug, Clone, Default)]
pub struct FileDescriptor {
    pub name: String,
    /// Declared package. Empty or absent both mean "no package".
    pub package: Option<SmolStr>,
    pub messages: Vec<MessageDescriptor>,
    pub enums: Vec<EnumDescriptor>,
    pub services: Vec<ServiceDescriptor>,
    pub extensions: Vec<FieldDescriptor>,
    pub options: Option<OptionSet>,
    pub source_info: SourceInfo,
}

impl FileDescriptor {
    /// The declared package, treating an empty declaration as absent.
    pub fn declared_package(&self) -> Option<&SmolStr> {
        self.package.as_ref().filter(|p| !p.is_empty())
    }
}

/// A message type, possibly with nested types.
#[derive(Debug, Clone, Default)]
pub struct MessageDescriptor {
    pub name: SmolStr,
    pub fields: Vec<FieldDescriptor>,
    pub nested_messages: Vec<MessageDescriptor>,
    pub nested_enums: Vec<EnumDescriptor>,
    pub extension_ranges: Vec<ExtensionRange>,
    pub extensions: Vec<FieldDescriptor>,
    pub oneofs: Vec<OneofDescriptor>,
    pub options: Option<OptionSet>,
}

/// The declared type of a field, as recorded by the compiler.
///
/// Only `Message` and `Enum` fields carry a [`FieldDescriptor::type_name`];
/// the remaining variants are primitives whose display label is the
/// renderer's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    #[default]
    String,
    Group,
    Message,
    Bytes,
    Uint32,
    Enum,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
}

#[derive(Debug, Clone, Default)]
pub struct FieldDescriptor {
    pub name: SmolStr,
    pub number: i32,
    pub field_type: FieldType,
    /// For message and enum fields, the type reference text exactly as the
    /// compiler recorded it (absolute references carry a leading `.`).
    pub type_name: Option<SmolStr>,
    pub options: Option<OptionSet>,
}

#[derive(Debug, Clone, Default)]
pub struct EnumDescriptor {
    pub name: SmolStr,
    pub values: Vec<EnumValueDescriptor>,
    pub options: Option<OptionSet>,
}

#[derive(Debug, Clone, Default)]
pub struct EnumValueDescriptor {
    pub name: SmolStr,
    pub number: i32,
    pub options: Option<OptionSet>,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceDescriptor {
    pub name: SmolStr,
    pub methods: Vec<MethodDescriptor>,
    pub options: Option<OptionSet>,
}

#[derive(Debug, Clone, Default)]
pub struct MethodDescriptor {
    pub name: SmolStr,
    pub input_type: SmolStr,
    pub output_type: SmolStr,
    pub options: Option<OptionSet>,
}

#[derive(Debug, Clone, Default)]
pub struct OneofDescriptor {
    pub name: SmolStr,
    pub options: Option<OptionSet>,
}

/// A reserved extension number range on a message.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionRange {
    pub start: i32,
    pub end: i32,
}

/// Generic options container shared by every descriptor kind.
///
/// Interpreted option fields are not modeled; the walker only needs to know
/// that uninterpreted options live at field number 999.
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    pub uninterpreted: Vec<UninterpretedOption>,
}

#[derive(Debug, Clone, Default)]
pub struct UninterpretedOption {
    pub name: String,
    pub value: Option<String>,
}

/// Compiler-recorded source metadata for one file.
#[derive(Debug, Clone, Default)]
pub struct SourceInfo {
    pub locations: Vec<SourceLocation>,
}

/// One source-location record: a field-path addressing a node, plus the raw
/// comment text the compiler recovered around that node.
#[derive(Debug, Clone, Default)]
pub struct SourceLocation {
    /// Alternating (field-number, index) pairs descending from the file root.
    pub path: Vec<i32>,
    /// Start line/column and end line/column, as the compiler records them.
    pub span: Vec<i32>,
    pub leading: Option<String>,
    pub trailing: Option<String>,
    pub leading_detached: Vec<String>,
}

impl SourceLocation {
    /// True if this record carries any comment text at all.
    pub fn has_comments(&self) -> bool {
        self.leading.as_deref().is_some_and(|c| !c.is_empty())
            || self.trailing.as_deref().is_some_and(|c| !c.is_empty())
            || !self.leading_detached.is_empty()
    }
}
