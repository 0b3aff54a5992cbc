//! Access to the indirect objects of a document.
//!
//! The tree model does not parse documents. It consumes an [`ObjectResolver`]
//! that maps object numbers to already-parsed values, and borrows those
//! values for as long as the tree lives.

use crate::error::{Error, Result};
use crate::object::{Object, ObjectKind};
use indexmap::IndexMap;

/// Capability to look up indirect objects and walk containers.
///
/// Implementors only need [`resolve`](ObjectResolver::resolve); the container
/// accessors have defaults that work on [`Object`] directly.
pub trait ObjectResolver {
    /// Return the current value of indirect object `number`.
    ///
    /// Calling this twice with the same number must return the same value.
    fn resolve(&self, number: u32) -> Result<&Object>;

    /// Report the kind of a value.
    fn kind_of(&self, value: &Object) -> ObjectKind {
        value.kind()
    }

    /// Entries of a dictionary or stream dictionary, in file order.
    fn entries<'o>(&self, value: &'o Object) -> Result<Vec<(&'o str, &'o Object)>> {
        match value.as_dict() {
            Some(dict) => Ok(dict.iter().map(|(k, v)| (k.as_str(), v)).collect()),
            None => Err(Error::malformed("Dictionary", value.kind().as_str())),
        }
    }

    /// Elements of an array, in order.
    fn elements<'o>(&self, value: &'o Object) -> Result<Vec<&'o Object>> {
        match value.as_array() {
            Some(items) => Ok(items.iter().collect()),
            None => Err(Error::malformed("Array", value.kind().as_str())),
        }
    }

    /// The document trailer, if the resolver knows it.
    fn trailer(&self) -> Option<&Object> {
        None
    }
}

/// In-memory cross-reference table.
///
/// Holds objects that were parsed elsewhere. Useful for callers that already
/// have their objects in memory and for building fixtures.
///
/// # Example
///
/// ```
/// use pdf_objtree::object::Object;
/// use pdf_objtree::resolver::{ObjectResolver, ObjectStore};
///
/// let mut store = ObjectStore::new();
/// store.insert(1, Object::dictionary([("Type", Object::name("Catalog"))]));
/// assert_eq!(store.resolve(1).unwrap().dict_type(), Some("Catalog"));
/// assert!(store.resolve(2).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    objects: IndexMap<u32, (u16, Object)>,
    trailer: Option<Object>,
}

impl ObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `object` as number `number`, generation 0.
    pub fn insert(&mut self, number: u32, object: Object) {
        self.insert_with_generation(number, 0, object);
    }

    /// Store `object` under `number` with an explicit generation.
    ///
    /// A later insert for the same number replaces the earlier one, the way a
    /// later revision does in an incrementally updated file.
    pub fn insert_with_generation(&mut self, number: u32, generation: u16, object: Object) {
        if let Some((old_gen, _)) = self.objects.insert(number, (generation, object)) {
            log::debug!(
                "Object {} gen {} replaced by gen {}",
                number,
                old_gen,
                generation
            );
        }
    }

    /// Set the trailer dictionary.
    pub fn set_trailer(&mut self, trailer: Object) {
        self.trailer = Some(trailer);
    }

    /// Builder-style variant of [`set_trailer`](Self::set_trailer).
    pub fn with_trailer(mut self, trailer: Object) -> Self {
        self.set_trailer(trailer);
        self
    }

    /// Generation number of a stored object.
    pub fn generation(&self, number: u32) -> Option<u16> {
        self.objects.get(&number).map(|(gen, _)| *gen)
    }

    /// Object numbers in insertion order.
    pub fn numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.objects.keys().copied()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when no objects are stored.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectResolver for ObjectStore {
    fn resolve(&self, number: u32) -> Result<&Object> {
        self.objects
            .get(&number)
            .map(|(_, object)| object)
            .ok_or(Error::UnresolvedReference(number))
    }

    fn trailer(&self) -> Option<&Object> {
        self.trailer.as_ref()
    }
}
