//! Tests for the JSON-backed tree and queries over it.

use arbor_json::{JsonNodeId, JsonTree, JsonTreeError};
use arbor_query::{NodeAdapter, Query};

const CATALOG: &str = r#"{
    "title": "catalog",
    "empty": {},
    "meta": { "version": 2, "draft": null },
    "items": [
        { "id": 1, "name": "a" },
        { "id": 2 },
        { "id": 3, "tags": ["x", null] }
    ],
    "owner": { "contact": {} }
}"#;

// Node ids follow construction order.
const ROOT: JsonNodeId = JsonNodeId(0);
const EMPTY: JsonNodeId = JsonNodeId(1);
const META: JsonNodeId = JsonNodeId(2);
const ITEM_1: JsonNodeId = JsonNodeId(3);
const ITEM_2: JsonNodeId = JsonNodeId(4);
const ITEM_3: JsonNodeId = JsonNodeId(5);
const TAG_X: JsonNodeId = JsonNodeId(6);
const TAG_NULL: JsonNodeId = JsonNodeId(7);
const OWNER: JsonNodeId = JsonNodeId(8);
const CONTACT: JsonNodeId = JsonNodeId(9);

fn catalog() -> JsonTree {
    JsonTree::parse("root", CATALOG).unwrap()
}

fn select(tree: &JsonTree, raw: &str) -> Vec<JsonNodeId> {
    Query::parse(raw)
        .unwrap()
        .select(tree, &tree.root_node())
        .unwrap()
        .into_vec()
}

#[test]
fn test_objects_and_arrays_become_children() {
    let tree = catalog();
    assert_eq!(tree.node_count(), 10);
    assert_eq!(
        tree.children(&ROOT).unwrap(),
        vec![EMPTY, META, ITEM_1, ITEM_2, ITEM_3, OWNER]
    );
    assert_eq!(tree.name(&ITEM_2).unwrap(), "items");
    assert_eq!(tree.children(&ITEM_3).unwrap(), vec![TAG_X, TAG_NULL]);
    assert_eq!(tree.parent(&CONTACT).unwrap(), Some(OWNER));
    assert_eq!(tree.parent(&ROOT).unwrap(), None);
}

#[test]
fn test_primitive_members_are_attributes() {
    let tree = catalog();
    assert_eq!(tree.attribute_names(&ROOT).unwrap(), vec!["title"]);
    assert_eq!(tree.attribute_names(&META).unwrap(), vec!["version", "draft"]);
    assert_eq!(tree.attribute(&META, "version").unwrap().as_deref(), Some("2"));
    assert_eq!(tree.attribute(&META, "draft").unwrap(), None);
    assert!(tree.has_attribute(&META, "draft").unwrap());
    assert!(!tree.has_attribute(&META, "missing").unwrap());
}

#[test]
fn test_attribute_value_keeps_json_type() {
    let tree = catalog();
    assert_eq!(tree.attribute_value(META, "version"), Some(&serde_json::json!(2)));
    assert_eq!(tree.attribute_value(META, "draft"), Some(&serde_json::Value::Null));
    assert_eq!(tree.attribute_value(ROOT, "title"), Some(&serde_json::json!("catalog")));
    assert_eq!(tree.attribute_value(META, "missing"), None);
    assert_eq!(tree.attribute_value(JsonNodeId(99), "version"), None);
}

#[test]
fn test_array_primitives_are_content_leaves() {
    let tree = catalog();
    assert_eq!(tree.content(&TAG_X).unwrap().as_deref(), Some("x"));
    assert_eq!(tree.content(&TAG_NULL).unwrap(), None);
    assert_eq!(tree.content(&ITEM_1).unwrap(), None);
}

#[test]
fn test_emptiness_counts_attributes() {
    let tree = catalog();
    for (node, expected) in [
        (EMPTY, true),
        (META, false),
        (ITEM_2, false),
        (TAG_X, false),
        (TAG_NULL, true),
        (CONTACT, true),
        (OWNER, false),
    ] {
        assert_eq!(NodeAdapter::is_empty(&tree, &node).unwrap(), expected, "{node:?}");
    }
}

#[test]
fn test_path() {
    let tree = catalog();
    assert_eq!(tree.path(TAG_NULL), "/root/items/tags");
    assert_eq!(tree.path(ROOT), "/root");
    assert_eq!(tree.path(JsonNodeId(99)), "");
}

#[test]
fn test_next_sibling() {
    let tree = catalog();
    assert_eq!(tree.next_sibling(&ITEM_1).unwrap(), Some(ITEM_2));
    assert_eq!(tree.next_sibling(&OWNER).unwrap(), None);
    assert_eq!(tree.next_sibling(&ROOT).unwrap(), None);
}

#[test]
fn test_unknown_node_is_backend_error() {
    let tree = catalog();
    assert!(tree.children(&JsonNodeId(42)).is_err());
}

#[test]
fn test_structural_queries() {
    let tree = catalog();
    assert_eq!(select(&tree, "items:first-of-type"), vec![ITEM_1]);
    assert_eq!(select(&tree, "items:last-of-type"), vec![ITEM_3]);
    assert!(select(&tree, "items:last-child").is_empty());
    assert_eq!(select(&tree, "owner:last-child"), vec![OWNER]);
    assert_eq!(select(&tree, "tags:last-child"), vec![TAG_NULL]);
    assert_eq!(select(&tree, ":empty"), vec![EMPTY, TAG_NULL, CONTACT]);
    assert_eq!(select(&tree, "contact:only-child"), vec![CONTACT]);
    assert_eq!(select(&tree, "*:only-of-type"), vec![EMPTY, META, OWNER, CONTACT]);
    assert_eq!(select(&tree, ":root"), vec![ROOT]);
}

#[test]
fn test_top_level_array() {
    let tree = JsonTree::parse("rows", r#"[1, {"a": true}, [2, 3]]"#).unwrap();
    let root = tree.root_node();
    let rows = tree.children(&root).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(tree.children_of_type(&root, "rows").unwrap(), rows);
    assert_eq!(tree.content(&rows[0]).unwrap().as_deref(), Some("1"));
    assert_eq!(tree.attribute(&rows[1], "a").unwrap().as_deref(), Some("true"));
    assert_eq!(tree.content(&rows[3]).unwrap().as_deref(), Some("3"));
}

#[test]
fn test_primitive_document() {
    let tree = JsonTree::parse("doc", r#""hello""#).unwrap();
    assert_eq!(tree.node_count(), 1);
    assert_eq!(
        tree.content(&tree.root_node()).unwrap().as_deref(),
        Some("hello")
    );
}

#[test]
fn test_invalid_json_is_rejected() {
    let err = JsonTree::parse("root", "{\"a\":").unwrap_err();
    assert!(matches!(err, JsonTreeError::Parse(_)));
    assert!(err.to_string().starts_with("invalid JSON document"));
}
