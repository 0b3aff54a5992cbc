//! Configuration for tree construction.

/// Limits applied while projecting an object graph into trees.
///
/// Every limit guards against malformed documents; well-formed files never
/// come near the defaults.
///
/// # Example
///
/// ```
/// use pdf_objtree::config::TreeOptions;
///
/// let options = TreeOptions::new()
///     .with_max_reference_chain(8)
///     .with_max_outline_entries(500);
/// assert_eq!(options.max_reference_chain, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    /// Maximum number of `" -> "` hops in a reference caption.
    ///
    /// A chain that is longer, or that revisits an object number, ends with
    /// `" -> ..."`.
    pub max_reference_chain: usize,

    /// Maximum number of bookmarks collected by the outline projection.
    pub max_outline_entries: usize,

    /// Maximum nesting of bookmarks below the outline root.
    pub max_outline_depth: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self {
            max_reference_chain: 32,
            max_outline_entries: 10_000,
            max_outline_depth: 64,
        }
    }

    /// Set the reference caption chain limit.
    pub fn with_max_reference_chain(mut self, limit: usize) -> Self {
        self.max_reference_chain = limit;
        self
    }

    /// Set the bookmark count limit.
    pub fn with_max_outline_entries(mut self, limit: usize) -> Self {
        self.max_outline_entries = limit;
        self
    }

    /// Set the bookmark nesting limit.
    pub fn with_max_outline_depth(mut self, limit: usize) -> Self {
        self.max_outline_depth = limit;
        self
    }
}
