//! Document outline (bookmarks) projection.
//!
//! The outline tree is a second view next to the [`ObjectTree`]. Each
//! bookmark is linked to the node of the object tree that shows the same
//! outline item dictionary, so selecting a bookmark can select that node and
//! the other way round.

use crate::error::Result;
use crate::node::{NodeId, NodeKind};
use crate::object::Object;
use crate::snapshot::NodeSnapshot;
use crate::tree::ObjectTree;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Title of the outline root.
pub const ROOT_TITLE: &str = "Bookmarks";

/// Title used for items without a `/Title` entry.
pub const UNTITLED: &str = "(No Title)";

/// Index of an entry in an [`OutlineTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutlineId(usize);

impl OutlineId {
    /// The raw index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for OutlineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bookmark #{}", self.0)
    }
}

/// A single bookmark.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    title: String,
    corresponding_node: Option<NodeId>,
    parent: Option<OutlineId>,
    children: Vec<OutlineId>,
}

impl OutlineEntry {
    /// The bookmark title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The object tree node showing this bookmark's dictionary.
    ///
    /// `None` only for the root.
    pub fn corresponding_node(&self) -> Option<NodeId> {
        self.corresponding_node
    }

    /// Parent bookmark, `None` for the root.
    pub fn parent(&self) -> Option<OutlineId> {
        self.parent
    }

    /// Child bookmarks in outline order.
    pub fn children(&self) -> &[OutlineId] {
        &self.children
    }
}

/// The bookmark hierarchy of a document.
#[derive(Debug, Clone)]
pub struct OutlineTree {
    entries: Vec<OutlineEntry>,
    by_node: HashMap<NodeId, OutlineId>,
}

impl Default for OutlineTree {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineTree {
    /// An outline with only the root.
    pub fn new() -> Self {
        Self {
            entries: vec![OutlineEntry {
                title: ROOT_TITLE.to_string(),
                corresponding_node: None,
                parent: None,
                children: Vec::new(),
            }],
            by_node: HashMap::new(),
        }
    }

    /// Build the outline of the document shown by `tree`.
    ///
    /// Follows the catalog's `/Outlines` entry. A document without outlines
    /// yields an outline with only the root.
    ///
    /// # Example
    ///
    /// ```
    /// use pdf_objtree::object::Object;
    /// use pdf_objtree::outline::OutlineTree;
    /// use pdf_objtree::resolver::ObjectStore;
    /// use pdf_objtree::tree::ObjectTree;
    ///
    /// let mut store = ObjectStore::new()
    ///     .with_trailer(Object::dictionary([("Root", Object::reference(1))]));
    /// store.insert(1, Object::dictionary([("Outlines", Object::reference(2))]));
    /// store.insert(2, Object::dictionary([("First", Object::reference(3))]));
    /// store.insert(3, Object::dictionary([("Title", Object::string("Intro"))]));
    ///
    /// let mut tree = ObjectTree::from_resolver(&store)?;
    /// let outline = OutlineTree::build(&mut tree)?;
    /// let first = outline.children(outline.root())[0];
    /// assert_eq!(outline.get(first).unwrap().title(), "Intro");
    /// # Ok::<(), pdf_objtree::Error>(())
    /// ```
    pub fn build(tree: &mut ObjectTree<'_>) -> Result<Self> {
        let catalog = match tree.catalog()? {
            Some(catalog) => catalog,
            None => return Ok(Self::new()),
        };
        match tree.child_by_key(catalog, "Outlines")? {
            Some(outlines) => Self::build_from(tree, outlines),
            None => Ok(Self::new()),
        }
    }

    /// Build the outline below the outline dictionary shown by `outlines`.
    ///
    /// `outlines` may be the dictionary node or a reference to it.
    pub fn build_from(tree: &mut ObjectTree<'_>, outlines: NodeId) -> Result<Self> {
        let mut outline = Self::new();
        let outlines = match tree.follow(outlines)? {
            Some(node) => node,
            None => return Ok(outline),
        };
        let mut visited = HashSet::new();
        if let Some(number) = tree.node(outlines)?.effective_number() {
            visited.insert(number);
        }
        let root = outline.root();
        outline.load_items(tree, root, outlines, 0, &mut visited)?;
        Ok(outline)
    }

    fn load_items(
        &mut self,
        tree: &mut ObjectTree<'_>,
        parent: OutlineId,
        dict_node: NodeId,
        depth: usize,
        visited: &mut HashSet<u32>,
    ) -> Result<()> {
        let max_entries = tree.options().max_outline_entries;
        let max_depth = tree.options().max_outline_depth;

        let mut link = tree.child_by_key(dict_node, "First")?;
        if depth >= max_depth {
            if link.is_some() {
                log::warn!("Outline nesting deeper than {} ignored", max_depth);
            }
            return Ok(());
        }
        while let Some(link_node) = link {
            if self.entries.len() > max_entries {
                log::warn!("Outline truncated after {} entries", max_entries);
                break;
            }
            let item = match tree.follow(link_node)? {
                Some(item) => item,
                None => {
                    log::warn!(
                        "Outline link {} points back into the outline or cannot be resolved",
                        link_node
                    );
                    break;
                },
            };
            let node = tree.node(item)?;
            if node.value().and_then(Object::as_dict).is_none() {
                log::warn!("Outline item {} is not a dictionary", item);
                break;
            }
            if let Some(number) = node.effective_number() {
                if !visited.insert(number) {
                    log::warn!("Outline item object {} visited twice", number);
                    break;
                }
            }

            let title = Self::title_of(tree, item);
            let entry = self.push(parent, title, item);
            self.load_items(tree, entry, item, depth + 1, visited)?;

            link = tree.child_by_key(item, "Next")?;
        }
        Ok(())
    }

    fn title_of(tree: &ObjectTree<'_>, item: NodeId) -> String {
        let title = tree
            .get(item)
            .and_then(|node| node.value())
            .and_then(Object::as_dict)
            .and_then(|dict| dict.get("Title"));
        let title = match title {
            Some(Object::Reference(r)) => tree.factory().resolver().resolve(r.id).ok(),
            other => other,
        };
        title
            .and_then(Object::to_unicode_string)
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    fn push(&mut self, parent: OutlineId, title: String, node: NodeId) -> OutlineId {
        let id = OutlineId(self.entries.len());
        self.entries.push(OutlineEntry {
            title,
            corresponding_node: Some(node),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.entries[parent.0].children.push(id);
        self.by_node.entry(node).or_insert(id);
        id
    }

    /// The "Bookmarks" root.
    pub fn root(&self) -> OutlineId {
        OutlineId(0)
    }

    /// Look up an entry.
    pub fn get(&self, id: OutlineId) -> Option<&OutlineEntry> {
        self.entries.get(id.0)
    }

    /// Children of an entry. Empty for unknown ids.
    pub fn children(&self, id: OutlineId) -> &[OutlineId] {
        self.get(id).map_or(&[], |entry| entry.children())
    }

    /// Number of bookmarks, not counting the root.
    pub fn bookmark_count(&self) -> usize {
        self.entries.len() - 1
    }

    /// The bookmark linked to an object tree node.
    pub fn entry_for_node(&self, node: NodeId) -> Option<OutlineId> {
        self.by_node.get(&node).copied()
    }

    /// Serializable copy of the whole outline.
    pub fn snapshot(&self, tree: &ObjectTree<'_>) -> NodeSnapshot {
        self.snapshot_entry(tree, self.root())
    }

    fn snapshot_entry(&self, tree: &ObjectTree<'_>, id: OutlineId) -> NodeSnapshot {
        let entry = &self.entries[id.0];
        NodeSnapshot {
            caption: entry.title.clone(),
            kind: NodeKind::Outline,
            object_number: entry
                .corresponding_node
                .and_then(|node| tree.get(node))
                .and_then(|node| node.effective_number()),
            recursive: false,
            children: entry
                .children
                .iter()
                .map(|child| self.snapshot_entry(tree, *child))
                .collect(),
        }
    }
}
