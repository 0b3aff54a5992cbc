//! Node construction and caption rules.
//!
//! [`NodeFactory`] holds no state of its own: it borrows the resolver and a
//! copy of the [`TreeOptions`] and turns object values into detached
//! [`ObjectNode`]s. Attaching them, and deciding whether a reference is
//! recursive, is the tree's job.

use crate::config::TreeOptions;
use crate::error::{Error, Result};
use crate::node::{NodeVariant, ObjectNode};
use crate::object::{Object, ObjectKind};
use crate::resolver::ObjectResolver;

/// Caption of the synthetic trailer root.
pub const TRAILER_CAPTION: &str = "Trailer";

/// A freshly built node plus the failure that degraded it, if any.
#[derive(Debug)]
pub struct BuiltNode<'a> {
    /// The detached node
    pub node: ObjectNode<'a>,
    /// Set when the node is an error marker standing in for a failed subtree
    pub failure: Option<Error>,
}

impl<'a> BuiltNode<'a> {
    fn ok(node: ObjectNode<'a>) -> Self {
        Self { node, failure: None }
    }
}

/// Builds tree nodes from object values.
#[derive(Clone, Copy)]
pub struct NodeFactory<'a> {
    resolver: &'a dyn ObjectResolver,
    options: TreeOptions,
}

impl<'a> NodeFactory<'a> {
    /// Create a factory with default options.
    pub fn new(resolver: &'a dyn ObjectResolver) -> Self {
        Self::with_options(resolver, TreeOptions::default())
    }

    /// Create a factory with explicit options.
    pub fn with_options(resolver: &'a dyn ObjectResolver, options: TreeOptions) -> Self {
        Self { resolver, options }
    }

    /// The resolver nodes are built against.
    pub fn resolver(&self) -> &'a dyn ObjectResolver {
        self.resolver
    }

    /// The options in effect.
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Pick the node variant for a value.
    ///
    /// Only a dictionary's own `/Type` entry counts. A reference to a page is
    /// a generic node; the node built for its target is the page node.
    pub fn variant_of(value: &Object) -> NodeVariant {
        match value {
            Object::Dictionary(_) => match value.dict_type() {
                Some("Pages") => NodeVariant::Pages,
                Some("Page") => NodeVariant::Page,
                _ => NodeVariant::Generic,
            },
            _ => NodeVariant::Generic,
        }
    }

    /// Creates the caption for a value.
    ///
    /// References show their own text followed by `" -> "` and the caption of
    /// their target, so a chain of references reads
    /// `"7 0 R -> 9 0 R -> Array"`.
    pub fn caption(&self, value: Option<&'a Object>) -> Result<String> {
        let mut caption = String::new();
        self.write_caption(value, &mut caption)?;
        Ok(caption)
    }

    /// Creates the caption for the entry `key` of `dict`.
    ///
    /// Only indirect entries get a resolved caption. Direct entries show their
    /// own text form, however large.
    pub fn entry_caption(&self, dict: &'a Object, key: &str) -> Result<String> {
        let value = self.lookup_entry(dict, key)?;
        let mut caption = format!("{}: ", key);
        self.write_entry_caption(value, &mut caption)?;
        Ok(caption)
    }

    /// Build a node for a direct value.
    pub fn make_node(&self, value: Option<&'a Object>) -> BuiltNode<'a> {
        let mut caption = String::new();
        match self.write_caption(value, &mut caption) {
            Ok(()) => {
                let variant = value.map_or(NodeVariant::Generic, Self::variant_of);
                BuiltNode::ok(self.new_node(value, variant, caption))
            },
            Err(e) => Self::error_marker(value, caption, e),
        }
    }

    /// Build a node for the object stored in cross-reference slot `number`.
    pub fn make_indirect_node(&self, value: &'a Object, number: u32) -> BuiltNode<'a> {
        let mut built = self.make_node(Some(value));
        built.node.object_number = Some(number);
        built
    }

    /// Build the node for entry `key` of the dictionary (or stream) `dict`.
    ///
    /// A missing key yields a `null` entry node.
    pub fn make_entry_node(&self, dict: &'a Object, key: &str) -> BuiltNode<'a> {
        match self.lookup_entry(dict, key) {
            Ok(value) => self.make_entry(key, value),
            Err(e) => {
                let mut built = Self::error_marker(None, format!("{}: ", key), e);
                built.node.dictionary_key = Some(key.to_string());
                built
            },
        }
    }

    /// Build the node for an entry whose value was already looked up.
    pub(crate) fn make_entry(&self, key: &str, value: Option<&'a Object>) -> BuiltNode<'a> {
        let mut caption = format!("{}: ", key);
        let mut built = match self.write_entry_caption(value, &mut caption) {
            Ok(()) => {
                let variant = value.map_or(NodeVariant::Generic, Self::variant_of);
                BuiltNode::ok(self.new_node(value, variant, caption))
            },
            Err(e) => Self::error_marker(value, caption, e),
        };
        built.node.dictionary_key = Some(key.to_string());
        built
    }

    /// Build the synthetic root for a trailer dictionary.
    pub fn make_trailer_node(&self, trailer: &'a Object) -> BuiltNode<'a> {
        BuiltNode::ok(self.new_node(
            Some(trailer),
            NodeVariant::Trailer,
            TRAILER_CAPTION.to_string(),
        ))
    }

    // The node keeps the kind the resolver reports, which is what expansion
    // dispatches on.
    fn new_node(
        &self,
        value: Option<&'a Object>,
        variant: NodeVariant,
        caption: String,
    ) -> ObjectNode<'a> {
        let mut node = ObjectNode::new(value, variant, caption);
        if let Some(value) = value {
            node.object_kind = self.resolver.kind_of(value);
        }
        node
    }

    /// Build a leaf that stands in for a subtree that failed to build.
    pub(crate) fn error_marker(
        value: Option<&'a Object>,
        prefix: String,
        error: Error,
    ) -> BuiltNode<'a> {
        let caption = format!("{}{}", prefix, error);
        BuiltNode {
            node: ObjectNode::new(value, NodeVariant::ErrorMarker, caption),
            failure: Some(error),
        }
    }

    fn lookup_entry(&self, dict: &'a Object, key: &str) -> Result<Option<&'a Object>> {
        let entries = self.resolver.entries(dict)?;
        Ok(entries.into_iter().find(|(k, _)| *k == key).map(|(_, v)| v))
    }

    fn write_entry_caption(&self, value: Option<&'a Object>, out: &mut String) -> Result<()> {
        match value {
            Some(obj) if obj.kind() == ObjectKind::Reference => self.write_caption(value, out),
            Some(obj) => {
                out.push_str(&obj.to_string());
                Ok(())
            },
            None => {
                out.push_str("null");
                Ok(())
            },
        }
    }

    /// Appends the caption to `out`. On failure `out` holds the part of the
    /// reference chain that did resolve.
    fn write_caption(&self, value: Option<&'a Object>, out: &mut String) -> Result<()> {
        let mut visited: Vec<u32> = Vec::new();
        let mut current = value;
        loop {
            let obj = match current {
                Some(obj) => obj,
                None => {
                    out.push_str("null");
                    return Ok(());
                },
            };
            match self.resolver.kind_of(obj) {
                ObjectKind::Reference => {
                    let target = match obj.as_reference() {
                        Some(r) => r,
                        None => return Err(Error::malformed("Reference", obj.kind().as_str())),
                    };
                    out.push_str(&target.to_string());
                    out.push_str(" -> ");
                    if visited.contains(&target.id)
                        || visited.len() >= self.options.max_reference_chain
                    {
                        out.push_str("...");
                        return Ok(());
                    }
                    visited.push(target.id);
                    current = Some(self.resolver.resolve(target.id)?);
                },
                ObjectKind::Array => {
                    out.push_str("Array");
                    return Ok(());
                },
                ObjectKind::Stream => {
                    out.push_str("Stream");
                    return Ok(());
                },
                ObjectKind::String => {
                    out.push_str(&obj.to_unicode_string().unwrap_or_default());
                    return Ok(());
                },
                _ => {
                    out.push_str(&obj.to_string());
                    return Ok(());
                },
            }
        }
    }
}
