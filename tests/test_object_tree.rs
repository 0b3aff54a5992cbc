//! Integration tests for node construction, captions and expansion.

use pdf_objtree::error::{Error, Result};
use pdf_objtree::node::{NodeKind, NodeVariant};
use pdf_objtree::object::{Object, ObjectKind};
use pdf_objtree::resolver::{ObjectResolver, ObjectStore};
use pdf_objtree::tree::ObjectTree;
use pdf_objtree::NodeId;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn captions(tree: &ObjectTree<'_>, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .map(|id| tree.get(*id).expect("node exists").caption().to_string())
        .collect()
}

#[test]
fn test_reference_to_array_caption() {
    init_logging();
    let mut store = ObjectStore::new();
    store.insert(7, Object::Array(vec![Object::Integer(1), Object::Integer(2)]));
    let reference = Object::reference(7);
    let tree = ObjectTree::with_root(&store, &reference);
    let root = tree.get(tree.root()).unwrap();
    assert_eq!(root.caption(), "7 0 R -> Array");
    assert_eq!(root.kind(), NodeKind::Reference);
    assert_eq!(root.effective_number(), Some(7));
}

#[test]
fn test_reference_chain_caption() {
    let mut store = ObjectStore::new();
    store.insert(7, Object::reference(9));
    store.insert(9, Object::Array(vec![]));
    let reference = Object::reference(7);
    let tree = ObjectTree::with_root(&store, &reference);
    assert_eq!(tree.get(tree.root()).unwrap().caption(), "7 0 R -> 9 0 R -> Array");
}

#[test]
fn test_page_entry_labels() {
    let mut store = ObjectStore::new();
    store.insert(
        3,
        Object::dictionary([
            ("Type", Object::name("Pages")),
            ("Count", Object::Integer(1)),
        ]),
    );
    let page = Object::dictionary([
        ("Type", Object::name("Page")),
        ("Parent", Object::reference(3)),
    ]);
    let mut tree = ObjectTree::with_indirect_root(&store, &page, 4);
    let root = tree.root();
    let children = tree.expand(root).unwrap().to_vec();

    assert_eq!(
        captions(&tree, &children),
        vec!["Type: /Page", "Parent: 3 0 R -> <</Type /Pages /Count 1>>"]
    );
    assert_eq!(tree.get(root).unwrap().kind(), NodeKind::Page);
    assert_eq!(tree.get(children[0]).unwrap().dictionary_key(), Some("Type"));
    assert!(tree.get(children[1]).unwrap().is_dictionary_entry("Parent"));
}

#[test]
fn test_direct_entries_are_not_resolved() {
    let mut store = ObjectStore::new();
    store.insert(5, Object::Integer(10));
    let dict = Object::dictionary([(
        "Resources",
        Object::dictionary([("Font", Object::reference(5))]),
    )]);
    let mut tree = ObjectTree::with_root(&store, &dict);
    let root = tree.root();
    let children = tree.expand(root).unwrap().to_vec();
    assert_eq!(captions(&tree, &children), vec!["Resources: <</Font 5 0 R>>"]);

    // one level down the reference gets its resolved caption
    let grandchildren = tree.expand(children[0]).unwrap().to_vec();
    assert_eq!(captions(&tree, &grandchildren), vec!["Font: 5 0 R -> 10"]);
}

#[test]
fn test_variant_dispatch() {
    let store = ObjectStore::new();
    let cases = [
        (Object::dictionary(Vec::<(String, Object)>::new()), NodeVariant::Generic),
        (Object::dictionary([("Type", Object::name("Pages"))]), NodeVariant::Pages),
        (Object::dictionary([("Type", Object::name("Page"))]), NodeVariant::Page),
        (Object::dictionary([("Type", Object::name("Catalog"))]), NodeVariant::Generic),
    ];
    for (value, expected) in &cases {
        let tree = ObjectTree::with_root(&store, value);
        assert_eq!(tree.get(tree.root()).unwrap().variant(), *expected, "{}", value);
    }
}

#[test]
fn test_child_order_follows_dictionary() {
    let store = ObjectStore::new();
    let dict = Object::dictionary([
        ("Zebra", Object::Integer(1)),
        ("Apple", Object::Integer(2)),
        ("Mango", Object::Integer(3)),
    ]);
    let mut tree = ObjectTree::with_root(&store, &dict);
    let root = tree.root();
    let children = tree.expand(root).unwrap().to_vec();
    assert_eq!(captions(&tree, &children), vec!["Zebra: 1", "Apple: 2", "Mango: 3"]);
}

#[test]
fn test_unresolvable_sibling_does_not_abort() {
    init_logging();
    let store = ObjectStore::new();
    let dict = Object::dictionary([
        ("A", Object::reference(99)),
        ("B", Object::name("Direct")),
    ]);
    let mut tree = ObjectTree::with_root(&store, &dict);
    let root = tree.root();
    let children = tree.expand(root).unwrap().to_vec();
    assert_eq!(children.len(), 2);

    let a = tree.get(children[0]).unwrap();
    assert_eq!(a.kind(), NodeKind::Error);
    assert!(a.caption().starts_with("A: 99 0 R -> "));
    assert!(a.caption().contains("Unresolved reference"));
    assert!(a.is_leaf());

    let b = tree.get(children[1]).unwrap();
    assert_eq!(b.caption(), "B: /Direct");
    assert_eq!(b.kind(), NodeKind::Name);

    assert_eq!(tree.diagnostics().len(), 1);
    assert_eq!(tree.diagnostics()[0].node, children[0]);
    assert_eq!(tree.diagnostics()[0].error, Error::UnresolvedReference(99));

    // error markers never expand
    assert!(tree.expand(children[0]).unwrap().is_empty());
}

#[test]
fn test_array_elements_and_strings() {
    let store = ObjectStore::new();
    let arr = Object::Array(vec![
        Object::string("Hello"),
        Object::Null,
        Object::Boolean(true),
        Object::Real(0.25),
        Object::Stream {
            dict: Default::default(),
            data: bytes::Bytes::from_static(b"BT ET"),
        },
    ]);
    let mut tree = ObjectTree::with_root(&store, &arr);
    let root = tree.root();
    assert_eq!(tree.get(root).unwrap().caption(), "Array");
    let children = tree.expand(root).unwrap().to_vec();
    assert_eq!(
        captions(&tree, &children),
        vec!["Hello", "null", "true", "0.25", "Stream"]
    );
    let kinds: Vec<NodeKind> = children.iter().map(|id| tree.get(*id).unwrap().kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::String,
            NodeKind::Null,
            NodeKind::Boolean,
            NodeKind::Number,
            NodeKind::Stream
        ]
    );
}

#[test]
fn test_trailer_root() {
    let mut store = ObjectStore::new().with_trailer(Object::dictionary([
        ("Size", Object::Integer(2)),
        ("Root", Object::reference(1)),
    ]));
    store.insert(1, Object::dictionary([("Type", Object::name("Catalog"))]));
    let mut tree = ObjectTree::from_resolver(&store).unwrap();
    let root = tree.root();
    assert_eq!(tree.get(root).unwrap().caption(), "Trailer");
    assert_eq!(tree.get(root).unwrap().kind(), NodeKind::Trailer);

    let catalog = tree.catalog().unwrap().unwrap();
    assert_eq!(tree.get(catalog).unwrap().object_number(), Some(1));
    assert_eq!(tree.node_for_number(1), Some(catalog));
    assert_eq!(tree.path_to_root(catalog).last(), Some(&root));
}

#[test]
fn test_nesting_depth_matches_structure() {
    let store = ObjectStore::new();
    let nested = Object::dictionary([(
        "A",
        Object::dictionary([(
            "B",
            Object::Array(vec![Object::dictionary([("C", Object::Integer(1))])]),
        )]),
    )]);
    let mut tree = ObjectTree::with_root(&store, &nested);
    let root = tree.root();
    tree.expand_to_depth(root, 100).unwrap();

    let max_depth = (0..tree.node_count())
        .map(|i| tree.depth(NodeId::new(i)))
        .max()
        .unwrap();
    // root -> A -> B -> array element -> C
    assert_eq!(max_depth, 4);
    assert_eq!(tree.node_count(), 5);
}

#[test]
fn test_building_twice_is_identical() {
    let mut store = ObjectStore::new();
    store.insert(2, Object::dictionary([("Type", Object::name("Pages"))]));
    let value = Object::dictionary([
        ("Pages", Object::reference(2)),
        ("Lang", Object::string("en")),
    ]);

    let mut first = ObjectTree::with_root(&store, &value);
    let mut second = ObjectTree::with_root(&store, &value);
    let (r1, r2) = (first.root(), second.root());
    first.expand_to_depth(r1, 4).unwrap();
    second.expand_to_depth(r2, 4).unwrap();
    assert_eq!(first.snapshot(r1, 10), second.snapshot(r2, 10));
}

/// Refuses to list the entries of dictionaries typed `/Bad`.
struct BadDictionaries(ObjectStore);

impl ObjectResolver for BadDictionaries {
    fn resolve(&self, number: u32) -> Result<&Object> {
        self.0.resolve(number)
    }

    fn entries<'o>(&self, value: &'o Object) -> Result<Vec<(&'o str, &'o Object)>> {
        if value.dict_type() == Some("Bad") {
            return Err(Error::malformed("Dictionary", "garbage"));
        }
        self.0.entries(value)
    }
}

/// Treats arrays as opaque values.
struct OpaqueArrays(ObjectStore);

impl ObjectResolver for OpaqueArrays {
    fn resolve(&self, number: u32) -> Result<&Object> {
        self.0.resolve(number)
    }

    fn kind_of(&self, value: &Object) -> ObjectKind {
        match value.kind() {
            ObjectKind::Array => ObjectKind::Null,
            other => other,
        }
    }
}

#[test]
fn test_malformed_container_becomes_marker() {
    init_logging();
    let resolver = BadDictionaries(ObjectStore::new());
    let dict = Object::dictionary([
        (
            "A",
            Object::dictionary([("Type", Object::name("Bad")), ("X", Object::Integer(1))]),
        ),
        ("B", Object::name("Direct")),
    ]);
    let mut tree = ObjectTree::with_root(&resolver, &dict);
    let root = tree.root();
    let children = tree.expand(root).unwrap().to_vec();
    assert_eq!(children.len(), 2);

    let markers = tree.expand(children[0]).unwrap().to_vec();
    assert_eq!(markers.len(), 1);
    let marker = tree.get(markers[0]).unwrap();
    assert_eq!(marker.kind(), NodeKind::Error);
    assert_eq!(marker.caption(), "Malformed container: expected Dictionary, found garbage");
    assert!(tree.expand(markers[0]).unwrap().is_empty());

    assert_eq!(tree.get(children[1]).unwrap().caption(), "B: /Direct");
    assert!(tree.expand(children[1]).unwrap().is_empty());

    assert_eq!(tree.diagnostics().len(), 1);
    assert_eq!(tree.diagnostics()[0].node, markers[0]);
    assert_eq!(tree.diagnostics()[0].error, Error::malformed("Dictionary", "garbage"));
}

#[test]
fn test_node_kind_follows_resolver() {
    let resolver = OpaqueArrays(ObjectStore::new());
    let dict = Object::dictionary([
        ("Kids", Object::Array(vec![Object::Integer(1), Object::Integer(2)])),
        ("Count", Object::Integer(2)),
    ]);
    let mut tree = ObjectTree::with_root(&resolver, &dict);
    let root = tree.root();
    let children = tree.expand(root).unwrap().to_vec();

    let kids = tree.get(children[0]).unwrap();
    assert_eq!(kids.caption(), "Kids: [1 2]");
    assert_eq!(kids.kind(), NodeKind::Null);
    assert!(kids.is_leaf());
    assert!(tree.expand(children[0]).unwrap().is_empty());
    assert_eq!(tree.node_count(), 3);
}
