//! Dotted qualified names and their resolution against a descriptor subtree.

use std::fmt;

use smol_str::SmolStr;

use crate::descriptor::DescriptorNode;

/// An ordered sequence of name segments forming a dotted qualified name.
///
/// The empty sequence denotes the root. Composition never mutates the base
/// scope; two scopes are equal exactly when their dotted renderings are.
///
/// Package names are kept as a single segment with embedded dots (that is how
/// the compiler records them), so `pkg.sub.Message.field` is three segments:
/// `["pkg.sub", "Message", "field"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Scope {
    segments: Vec<SmolStr>,
}

impl Scope {
    /// The root scope (no segments).
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// A new scope with `segment` appended. The receiver is left untouched.
    pub fn with(&self, segment: impl Into<SmolStr>) -> Scope {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment.into());
        Scope { segments }
    }

    /// A new scope with every element of `tail` appended in order.
    pub fn with_segments<I>(&self, tail: I) -> Scope
    where
        I: IntoIterator,
        I::Item: Into<SmolStr>,
    {
        let mut segments = self.segments.clone();
        segments.extend(tail.into_iter().map(Into::into));
        Scope { segments }
    }

    /// Parse a textual type reference into a scope.
    ///
    /// Returns the scope and whether the reference was absolute. An empty
    /// string parses to an empty relative scope rather than failing.
    ///
    /// Absolute references (leading `.`) group their longest package-shaped
    /// prefix — dot-separated pieces of lowercase letters, digits, and
    /// underscores — back into a single segment, matching how packages are
    /// recorded with embedded separators. Relative references keep every
    /// dot-separated piece as its own segment.
    pub fn parse(text: &str) -> (Scope, bool) {
        if text.is_empty() {
            return (Scope::root(), false);
        }
        if let Some(rest) = text.strip_prefix('.') {
            return (Scope::parse_absolute(rest), true);
        }
        let segments = text.split('.').map(SmolStr::new).collect();
        (Scope { segments }, false)
    }

    fn parse_absolute(text: &str) -> Scope {
        let pieces: Vec<&str> = text.split('.').collect();
        let package_len = pieces
            .iter()
            .take_while(|piece| is_package_segment(piece))
            .count();

        let mut segments = Vec::new();
        if package_len > 0 {
            segments.push(SmolStr::new(pieces[..package_len].join(".")));
        }
        segments.extend(pieces[package_len..].iter().map(|p| SmolStr::new(p)));
        Scope { segments }
    }

    /// Resolve this scope against a descriptor subtree rooted at `node`.
    ///
    /// Performs a depth-first match in the source language's own search
    /// order; any name mismatch fails immediately. The empty scope resolves
    /// to `node` itself.
    pub fn resolve<'a>(&self, node: DescriptorNode<'a>) -> Option<DescriptorNode<'a>> {
        resolve_segments(&self.segments, node)
    }

    /// Resolve this scope against the contents of `node`, without matching
    /// `node` itself: neither its name nor its package is consumed, and each
    /// child subtree is tried in the same search order as [`Scope::resolve`].
    ///
    /// This is the lookup relative references use: the name is sought inside
    /// an enclosing scope, not at it. An empty scope matches nothing.
    pub fn resolve_within<'a>(&self, node: DescriptorNode<'a>) -> Option<DescriptorNode<'a>> {
        if self.segments.is_empty() {
            return None;
        }
        resolve_in_children(&self.segments, node)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// True if `segment` could be part of a package name: only lowercase
/// letters, digits, or underscores.
fn is_package_segment(segment: &str) -> bool {
    segment
        .chars()
        .all(|c| c.is_lowercase() || c.is_numeric() || c == '_')
}

fn resolve_in_children<'a>(
    segments: &[SmolStr],
    node: DescriptorNode<'a>,
) -> Option<DescriptorNode<'a>> {
    match node {
        DescriptorNode::File(file) => file
            .messages
            .iter()
            .find_map(|m| resolve_segments(segments, DescriptorNode::Message(m)))
            .or_else(|| {
                file.enums
                    .iter()
                    .find_map(|e| resolve_segments(segments, DescriptorNode::Enum(e)))
            })
            .or_else(|| {
                file.services
                    .iter()
                    .find_map(|s| resolve_segments(segments, DescriptorNode::Service(s)))
            })
            .or_else(|| {
                file.extensions
                    .iter()
                    .find_map(|x| resolve_segments(segments, DescriptorNode::Field(x)))
            }),

        DescriptorNode::Message(message) => message
            .fields
            .iter()
            .find_map(|f| resolve_segments(segments, DescriptorNode::Field(f)))
            .or_else(|| {
                message
                    .nested_messages
                    .iter()
                    .find_map(|m| resolve_segments(segments, DescriptorNode::Message(m)))
            })
            .or_else(|| {
                message
                    .nested_enums
                    .iter()
                    .find_map(|e| resolve_segments(segments, DescriptorNode::Enum(e)))
            })
            .or_else(|| {
                message
                    .extensions
                    .iter()
                    .find_map(|x| resolve_segments(segments, DescriptorNode::Field(x)))
            }),

        DescriptorNode::Enum(enumeration) => enumeration
            .values
            .iter()
            .find_map(|v| resolve_segments(segments, DescriptorNode::EnumValue(v))),

        DescriptorNode::Service(service) => service
            .methods
            .iter()
            .find_map(|m| resolve_segments(segments, DescriptorNode::Method(m))),

        _ => None,
    }
}

fn resolve_segments<'a>(
    segments: &[SmolStr],
    node: DescriptorNode<'a>,
) -> Option<DescriptorNode<'a>> {
    if segments.is_empty() {
        return Some(node);
    }

    match node {
        DescriptorNode::File(file) => {
            let mut rest = segments;
            if let Some(package) = file.declared_package() {
                if rest[0] != *package {
                    return None;
                }
                rest = &rest[1..];
                if rest.is_empty() {
                    return Some(node);
                }
            }
            resolve_in_children(rest, node)
        }

        DescriptorNode::Message(message) => {
            if segments[0] != message.name {
                return None;
            }
            let rest = &segments[1..];
            if rest.is_empty() {
                return Some(node);
            }
            resolve_in_children(rest, node)
        }

        DescriptorNode::Enum(enumeration) => {
            if segments[0] != enumeration.name {
                return None;
            }
            let rest = &segments[1..];
            if rest.is_empty() {
                return Some(node);
            }
            resolve_in_children(rest, node)
        }

        DescriptorNode::Service(service) => {
            if segments[0] != service.name {
                return None;
            }
            let rest = &segments[1..];
            if rest.is_empty() {
                return Some(node);
            }
            resolve_in_children(rest, node)
        }

        // Leaf kinds match on name alone and have no children to descend into.
        DescriptorNode::Field(_) | DescriptorNode::EnumValue(_) | DescriptorNode::Method(_) => {
            let name = node.name()?;
            if segments[0] == *name && segments.len() == 1 {
                Some(node)
            } else {
                None
            }
        }

        // Oneofs and the unnamed auxiliary kinds are never resolution targets.
        DescriptorNode::Oneof(_)
        | DescriptorNode::ExtensionRange(_)
        | DescriptorNode::Options(_)
        | DescriptorNode::SourceInfo(_) => None,
    }
}
