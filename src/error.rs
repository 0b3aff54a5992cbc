//! Error types for the object tree.
//!
//! Nothing in this crate is fatal to tree construction: most of these errors
//! end up as substitute nodes plus a [`Diagnostic`] rather than being returned
//! from the expanding call.

use crate::node::NodeId;

/// Result type alias for object tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while projecting an object graph into a tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The resolver has no object with this number
    #[error("Unresolved reference: object {0} has no known target")]
    UnresolvedReference(u32),

    /// Entry or element iteration was requested on the wrong kind of object
    #[error("Malformed container: expected {expected}, found {found}")]
    MalformedContainer {
        /// Expected container type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// The ancestor walk ran out of parents before finding the cycle target
    #[error("Broken parent chain: node {0} lost its parent before reaching its ancestor")]
    BrokenParentChain(NodeId),

    /// A node id that was not issued by this tree
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
}

impl Error {
    /// Shorthand for a [`Error::MalformedContainer`] error.
    pub fn malformed(expected: &str, found: &str) -> Self {
        Error::MalformedContainer {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// A non-fatal failure recorded while building one subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// The node that was substituted or whose walk failed
    pub node: NodeId,
    /// What went wrong
    pub error: Error,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node {}: {}", self.node, self.error)
    }
}
