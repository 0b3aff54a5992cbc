//! Tree nodes.
//!
//! Every node in the object tree corresponds with one PDF object value (or
//! with an absent value, shown as `null`). Nodes live in the arena owned by
//! [`ObjectTree`](crate::tree::ObjectTree) and refer to each other by
//! [`NodeId`].

use crate::object::{Object, ObjectKind};
use std::fmt;

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap a raw arena index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which flavour of node this is.
///
/// Chosen once, when the node is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum NodeVariant {
    /// Any object without special meaning
    Generic,
    /// A page tree node (`/Type /Pages`)
    Pages,
    /// A page (`/Type /Page`)
    Page,
    /// The document trailer at the root of the tree
    Trailer,
    /// Stand-in for a subtree that could not be built
    ErrorMarker,
}

/// Symbolic kind used by a presentation layer to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum NodeKind {
    /// `null` or an absent value
    Null,
    /// Boolean
    Boolean,
    /// Number
    Number,
    /// String
    String,
    /// Name
    Name,
    /// Array
    Array,
    /// Dictionary
    Dictionary,
    /// Stream
    Stream,
    /// Indirect reference that can be expanded
    Reference,
    /// Indirect reference back to one of its ancestors
    RecursiveReference,
    /// Page tree node
    Pages,
    /// Page
    Page,
    /// Trailer
    Trailer,
    /// Bookmark in the outline tree
    Outline,
    /// Substituted subtree
    Error,
}

impl From<ObjectKind> for NodeKind {
    fn from(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Null => NodeKind::Null,
            ObjectKind::Boolean => NodeKind::Boolean,
            ObjectKind::Number => NodeKind::Number,
            ObjectKind::String => NodeKind::String,
            ObjectKind::Name => NodeKind::Name,
            ObjectKind::Array => NodeKind::Array,
            ObjectKind::Dictionary => NodeKind::Dictionary,
            ObjectKind::Stream => NodeKind::Stream,
            ObjectKind::Reference => NodeKind::Reference,
        }
    }
}

/// A node in the object tree.
#[derive(Debug, Clone)]
pub struct ObjectNode<'a> {
    pub(crate) value: Option<&'a Object>,
    pub(crate) object_kind: ObjectKind,
    pub(crate) variant: NodeVariant,
    pub(crate) dictionary_key: Option<String>,
    pub(crate) object_number: Option<u32>,
    pub(crate) recursive: bool,
    pub(crate) expanded: bool,
    pub(crate) caption: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl<'a> ObjectNode<'a> {
    pub(crate) fn new(value: Option<&'a Object>, variant: NodeVariant, caption: String) -> Self {
        Self {
            value,
            object_kind: value.map_or(ObjectKind::Null, Object::kind),
            variant,
            dictionary_key: None,
            object_number: None,
            recursive: false,
            expanded: false,
            caption,
            parent: None,
            children: Vec::new(),
        }
    }

    /// The object shown by this node; `None` for an absent value.
    pub fn value(&self) -> Option<&'a Object> {
        self.value
    }

    /// Kind of the underlying object.
    pub fn object_kind(&self) -> ObjectKind {
        self.object_kind
    }

    /// Variant chosen at construction.
    pub fn variant(&self) -> NodeVariant {
        self.variant
    }

    /// Symbolic display kind.
    pub fn kind(&self) -> NodeKind {
        match self.variant {
            NodeVariant::Pages => NodeKind::Pages,
            NodeVariant::Page => NodeKind::Page,
            NodeVariant::Trailer => NodeKind::Trailer,
            NodeVariant::ErrorMarker => NodeKind::Error,
            NodeVariant::Generic if self.recursive => NodeKind::RecursiveReference,
            NodeVariant::Generic => NodeKind::from(self.object_kind),
        }
    }

    /// Display text.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// The dictionary key, if this node is a dictionary entry.
    pub fn dictionary_key(&self) -> Option<&str> {
        self.dictionary_key.as_deref()
    }

    /// Checks if this node is the dictionary entry for `key`.
    pub fn is_dictionary_entry(&self, key: &str) -> bool {
        self.dictionary_key.as_deref() == Some(key)
    }

    /// Object number of the cross-reference slot this node was built from.
    ///
    /// `None` for direct objects and for reference nodes (see
    /// [`effective_number`](Self::effective_number)).
    pub fn object_number(&self) -> Option<u32> {
        self.object_number
    }

    /// The reference target for reference nodes, otherwise the node's own
    /// object number.
    pub fn effective_number(&self) -> Option<u32> {
        match self.value.and_then(Object::as_reference) {
            Some(r) => Some(r.id),
            None => self.object_number,
        }
    }

    /// True if the value is an indirect reference.
    pub fn is_reference_node(&self) -> bool {
        self.object_kind == ObjectKind::Reference
    }

    /// True for references and for objects stored in their own slot.
    pub fn is_indirect(&self) -> bool {
        self.is_reference_node() || self.object_number.is_some()
    }

    /// True if this reference points back at one of its ancestors.
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// True once the node's children have been built.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// True if the node can never have children.
    pub fn is_leaf(&self) -> bool {
        if self.recursive || self.variant == NodeVariant::ErrorMarker {
            return true;
        }
        !matches!(
            self.object_kind,
            ObjectKind::Array | ObjectKind::Dictionary | ObjectKind::Stream | ObjectKind::Reference
        )
    }

    /// Parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children built so far, in dictionary/array order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
