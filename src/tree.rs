//! The object tree.
//!
//! [`ObjectTree`] projects the object graph of a document onto a tree that
//! is built lazily: a node's children exist only after [`ObjectTree::expand`]
//! was called for it. Nodes are stored in an arena and addressed by
//! [`NodeId`]; parent links are plain indices.
//!
//! Expanding a reference node attaches exactly one child, the node for the
//! referenced object (carrying its object number and variant). Expanding a
//! dictionary or stream attaches one node per entry, an array one node per
//! element. References that point back at an ancestor reference are marked
//! recursive when they are attached and never expand.

use crate::config::TreeOptions;
use crate::cycle::CycleGuard;
use crate::error::{Diagnostic, Error, Result};
use crate::factory::{BuiltNode, NodeFactory};
use crate::node::{NodeId, NodeVariant, ObjectNode};
use crate::object::{Object, ObjectKind};
use crate::resolver::ObjectResolver;
use std::collections::HashMap;

/// A lazily built tree over the objects of one document.
pub struct ObjectTree<'a> {
    factory: NodeFactory<'a>,
    nodes: Vec<ObjectNode<'a>>,
    root: NodeId,
    numbers: HashMap<u32, NodeId>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> ObjectTree<'a> {
    /// Build a tree rooted at the resolver's trailer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedContainer`] when the resolver has no trailer
    /// or the trailer is neither a dictionary nor a cross-reference stream.
    pub fn from_resolver(resolver: &'a dyn ObjectResolver) -> Result<Self> {
        Self::from_resolver_with_options(resolver, TreeOptions::default())
    }

    /// Build a tree rooted at the resolver's trailer, with explicit options.
    pub fn from_resolver_with_options(
        resolver: &'a dyn ObjectResolver,
        options: TreeOptions,
    ) -> Result<Self> {
        let trailer = resolver
            .trailer()
            .ok_or_else(|| Error::malformed("Dictionary", "no trailer"))?;
        let kind = resolver.kind_of(trailer);
        if !matches!(kind, ObjectKind::Dictionary | ObjectKind::Stream) {
            return Err(Error::malformed("Dictionary", kind.as_str()));
        }
        let factory = NodeFactory::with_options(resolver, options);
        let root = factory.make_trailer_node(trailer);
        Ok(Self::from_root(factory, root))
    }

    /// Build a tree rooted at a direct value.
    pub fn with_root(resolver: &'a dyn ObjectResolver, value: &'a Object) -> Self {
        let factory = NodeFactory::new(resolver);
        let root = factory.make_node(Some(value));
        Self::from_root(factory, root)
    }

    /// Build a tree rooted at the object stored under `number`.
    pub fn with_indirect_root(
        resolver: &'a dyn ObjectResolver,
        value: &'a Object,
        number: u32,
    ) -> Self {
        let factory = NodeFactory::new(resolver);
        let root = factory.make_indirect_node(value, number);
        Self::from_root(factory, root)
    }

    /// Build a tree from an arbitrary factory and a root node it produced.
    pub fn from_root(factory: NodeFactory<'a>, root: BuiltNode<'a>) -> Self {
        let mut tree = Self {
            factory,
            nodes: Vec::new(),
            root: NodeId::new(0),
            numbers: HashMap::new(),
            diagnostics: Vec::new(),
        };
        tree.root = tree.attach(None, root);
        tree
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The factory nodes are built with.
    pub fn factory(&self) -> &NodeFactory<'a> {
        &self.factory
    }

    /// Options in effect.
    pub fn options(&self) -> &TreeOptions {
        self.factory.options()
    }

    /// Number of nodes built so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&ObjectNode<'a>> {
        self.nodes.get(id.index())
    }

    /// Look up a node, failing for ids this tree did not issue.
    pub fn node(&self, id: NodeId) -> Result<&ObjectNode<'a>> {
        self.get(id).ok_or(Error::UnknownNode(id))
    }

    /// Children built so far. Empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children())
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent()
    }

    /// Non-fatal failures recorded while building.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The first node built for the object stored under `number`.
    pub fn node_for_number(&self, number: u32) -> Option<NodeId> {
        self.numbers.get(&number).copied()
    }

    /// Build the children of a node, once.
    ///
    /// Calling this again returns the children built the first time. Leaves,
    /// recursive references and error markers have no children.
    pub fn expand(&mut self, id: NodeId) -> Result<&[NodeId]> {
        let node = self.nodes.get_mut(id.index()).ok_or(Error::UnknownNode(id))?;
        if node.expanded {
            return Ok(&self.nodes[id.index()].children);
        }
        node.expanded = true;
        if node.is_leaf() {
            return Ok(&self.nodes[id.index()].children);
        }
        let value = match node.value {
            Some(value) => value,
            None => return Ok(&self.nodes[id.index()].children),
        };
        log::debug!("Expanding node {} ({})", id, node.caption);

        let factory = self.factory;
        let resolver = factory.resolver();
        match resolver.kind_of(value) {
            ObjectKind::Reference => {
                if let Some(target) = value.as_reference() {
                    let built = match resolver.resolve(target.id) {
                        Ok(resolved) => factory.make_indirect_node(resolved, target.id),
                        Err(e) => NodeFactory::error_marker(None, format!("{} -> ", target), e),
                    };
                    self.attach(Some(id), built);
                }
            },
            ObjectKind::Dictionary | ObjectKind::Stream => match resolver.entries(value) {
                Ok(entries) => {
                    for (key, entry) in entries {
                        let built = factory.make_entry(key, Some(entry));
                        self.attach(Some(id), built);
                    }
                },
                Err(e) => {
                    self.attach(Some(id), NodeFactory::error_marker(None, String::new(), e));
                },
            },
            ObjectKind::Array => match resolver.elements(value) {
                Ok(elements) => {
                    for element in elements {
                        let built = factory.make_node(Some(element));
                        self.attach(Some(id), built);
                    }
                },
                Err(e) => {
                    self.attach(Some(id), NodeFactory::error_marker(None, String::new(), e));
                },
            },
            _ => {},
        }
        Ok(&self.nodes[id.index()].children)
    }

    /// Expand `id` and its descendants, `depth` levels deep.
    pub fn expand_to_depth(&mut self, id: NodeId, depth: usize) -> Result<()> {
        let mut stack = vec![(id, 0usize)];
        while let Some((current, level)) = stack.pop() {
            if level >= depth {
                continue;
            }
            let children = self.expand(current)?.to_vec();
            stack.extend(children.into_iter().map(|child| (child, level + 1)));
        }
        Ok(())
    }

    /// The ancestor a recursive reference points back to.
    ///
    /// `None` for nodes that are not recursive, for detached nodes and for
    /// the root. A broken parent chain is logged and also yields `None`.
    pub fn ancestor(&self, id: NodeId) -> Option<NodeId> {
        match self.try_ancestor(id) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("{}", e);
                None
            },
        }
    }

    /// Like [`ancestor`](Self::ancestor), but reports broken parent chains.
    pub fn try_ancestor(&self, id: NodeId) -> Result<Option<NodeId>> {
        CycleGuard::ancestor(&self.nodes, id)
    }

    /// Ancestors of a node, starting with its parent and ending at the root.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if path.len() > self.nodes.len() {
                log::warn!("Parent chain of node {} does not terminate", id);
                break;
            }
            path.push(parent);
            current = self.parent(parent);
        }
        path
    }

    /// Number of ancestors of a node.
    pub fn depth(&self, id: NodeId) -> usize {
        self.path_to_root(id).len()
    }

    /// The node showing the object behind `id`.
    ///
    /// For a reference node this expands it and returns the node built for
    /// its target; `None` if the reference is recursive or unresolvable. Any
    /// other node is returned as is.
    pub fn follow(&mut self, id: NodeId) -> Result<Option<NodeId>> {
        let node = self.node(id)?;
        if !node.is_reference_node() {
            return Ok(Some(id));
        }
        if node.is_recursive() || node.variant() == NodeVariant::ErrorMarker {
            return Ok(None);
        }
        let target = self.expand(id)?.first().copied();
        Ok(target.filter(|child| self.nodes[child.index()].variant != NodeVariant::ErrorMarker))
    }

    /// The entry `key` of the dictionary shown by `id`.
    ///
    /// References are followed first, so this works on a reference to a
    /// dictionary as well as on the dictionary node itself.
    pub fn child_by_key(&mut self, id: NodeId, key: &str) -> Result<Option<NodeId>> {
        let target = match self.follow(id)? {
            Some(target) => target,
            None => return Ok(None),
        };
        let children = self.expand(target)?.to_vec();
        Ok(children
            .into_iter()
            .find(|child| self.nodes[child.index()].is_dictionary_entry(key)))
    }

    /// The node showing the document catalog.
    ///
    /// Either the root itself (when it is a catalog) or the object behind the
    /// trailer's `/Root` entry.
    pub fn catalog(&mut self) -> Result<Option<NodeId>> {
        let root = self.root;
        let is_catalog = self.nodes[root.index()]
            .value
            .and_then(Object::dict_type)
            .is_some_and(|t| t == "Catalog");
        if is_catalog {
            return Ok(Some(root));
        }
        match self.child_by_key(root, "Root")? {
            Some(entry) => self.follow(entry),
            None => Ok(None),
        }
    }

    /// All page nodes, in page tree order.
    ///
    /// Walks `/Pages` and the `/Kids` arrays below it, expanding as needed.
    /// Kids that point back into the page tree are skipped.
    pub fn page_nodes(&mut self) -> Result<Vec<NodeId>> {
        let mut pages = Vec::new();
        let catalog = match self.catalog()? {
            Some(catalog) => catalog,
            None => return Ok(pages),
        };
        let page_tree = match self.child_by_key(catalog, "Pages")? {
            Some(entry) => entry,
            None => return Ok(pages),
        };

        let mut stack = vec![page_tree];
        while let Some(current) = stack.pop() {
            let target = match self.follow(current)? {
                Some(target) => target,
                None => continue,
            };
            match self.nodes[target.index()].variant {
                NodeVariant::Page => pages.push(target),
                NodeVariant::Pages => {
                    let kids = match self.child_by_key(target, "Kids")? {
                        Some(kids) => kids,
                        None => continue,
                    };
                    let array = match self.follow(kids)? {
                        Some(array) => array,
                        None => continue,
                    };
                    let children = self.expand(array)?.to_vec();
                    stack.extend(children.into_iter().rev());
                },
                _ => log::debug!("Skipping non-page kid {}", target),
            }
        }
        Ok(pages)
    }

    /// The node of page `index` (0-based).
    pub fn page(&mut self, index: usize) -> Result<Option<NodeId>> {
        Ok(self.page_nodes()?.get(index).copied())
    }

    fn attach(&mut self, parent: Option<NodeId>, built: BuiltNode<'a>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let BuiltNode { mut node, failure } = built;
        node.parent = parent;

        if node.is_reference_node() && node.variant != NodeVariant::ErrorMarker {
            if let Some(target) = node.effective_number() {
                if let Some(ancestor) = CycleGuard::find_cycle(&self.nodes, parent, target) {
                    log::debug!(
                        "Reference to object {} at node {} cycles back to {}",
                        target,
                        id,
                        ancestor
                    );
                    node.recursive = true;
                }
            }
        }
        if let Some(number) = node.object_number {
            self.numbers.entry(number).or_insert(id);
        }

        if let Some(error) = failure {
            log::warn!("Substituted node {} ({}): {}", id, node.caption, error);
            self.diagnostics.push(Diagnostic { node: id, error });
        }

        self.nodes.push(node);
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }
}
