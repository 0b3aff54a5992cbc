// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # PDF Object Tree
//!
//! Browse the object graph of a PDF document as a tree.
//!
//! A PDF file is a graph: dictionaries and arrays refer to indirect objects by
//! number, and those references may form cycles (`/Parent` links in the page
//! tree, `/Prev`/`/Next` links in outlines, and plain corruption). This crate
//! turns that graph into a finite, navigable tree for inspection tools:
//!
//! - **Lazy expansion**: a node's children are built only when it is expanded
//! - **Cycle detection**: a reference back to one of its ancestors is marked
//!   recursive and never expands, and can report which ancestor it closes
//!   the cycle to
//! - **Captions**: `"12 0 R -> Array"`, `"Parent: 3 0 R -> <<...>>"`,
//!   `"Type: /Page"`
//! - **Node variants**: trailer, page tree nodes and pages get their own
//!   symbolic kind
//! - **Outline view**: bookmarks linked to the object tree nodes they came from
//!
//! Parsing is not part of this crate. Objects come from an
//! [`ObjectResolver`](resolver::ObjectResolver); [`ObjectStore`] is a simple
//! in-memory one.
//!
//! ## Quick Start
//!
//! ```
//! use pdf_objtree::{Object, ObjectStore, ObjectTree};
//!
//! let mut store = ObjectStore::new()
//!     .with_trailer(Object::dictionary([("Root", Object::reference(1))]));
//! store.insert(1, Object::dictionary([
//!     ("Type", Object::name("Catalog")),
//!     ("Pages", Object::reference(2)),
//! ]));
//! store.insert(2, Object::dictionary([
//!     ("Type", Object::name("Pages")),
//!     ("Kids", Object::Array(vec![Object::reference(3)])),
//!     ("Count", Object::Integer(1)),
//! ]));
//! store.insert(3, Object::dictionary([
//!     ("Type", Object::name("Page")),
//!     ("Parent", Object::reference(2)),
//! ]));
//!
//! let mut tree = ObjectTree::from_resolver(&store)?;
//! let root = tree.root();
//! let entries = tree.expand(root)?.to_vec();
//! assert_eq!(
//!     tree.get(entries[0]).unwrap().caption(),
//!     "Root: 1 0 R -> <</Type /Catalog /Pages 2 0 R>>"
//! );
//!
//! let pages = tree.page_nodes()?;
//! assert_eq!(pages.len(), 1);
//! # Ok::<(), pdf_objtree::Error>(())
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Object model
pub mod encoding;
pub mod object;
pub mod resolver;

// Tree model
pub mod config;
pub mod cycle;
pub mod factory;
pub mod node;
pub mod snapshot;
pub mod tree;

// Document structure
pub mod outline;

// Re-exports
pub use config::TreeOptions;
pub use error::{Diagnostic, Error, Result};
pub use factory::NodeFactory;
pub use node::{NodeId, NodeKind, NodeVariant, ObjectNode};
pub use object::{Dictionary, Object, ObjectKind, ObjectRef};
pub use outline::{OutlineEntry, OutlineId, OutlineTree};
pub use resolver::{ObjectResolver, ObjectStore};
pub use snapshot::NodeSnapshot;
pub use tree::ObjectTree;

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
