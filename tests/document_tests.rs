// tests/document_tests.rs
use jsonfilter::document::node::{JsonNode, JsonValue};
use jsonfilter::document::parser::parse_json;
use jsonfilter::document::path::{NodePath, PathElement};
use jsonfilter::document::serialize::{serialize, serialize_compact};
use jsonfilter::document::tree::JsonTree;
use jsonfilter::ErrorKind;

fn key(k: &str) -> PathElement {
    PathElement::Key(k.to_string())
}

// ============================================================================
// Parsing Tests
// ============================================================================

#[test]
fn test_parse_preserves_key_order() {
    let tree = parse_json(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
    let keys: Vec<String> = tree.paths().iter().map(|p| p.to_string()).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_parse_scalar_roots() {
    for (input, type_name) in [
        ("null", "null"),
        ("true", "boolean"),
        ("-0.5e10", "number"),
        (r#""s""#, "string"),
    ] {
        let tree = parse_json(input).unwrap();
        assert_eq!(tree.root().value().type_name(), type_name);
        assert!(tree.paths().is_empty());
    }
}

#[test]
fn test_parse_rejects_trailing_content() {
    let err = parse_json(r#"{"a": 1} {"b": 2}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn test_parse_error_reports_position() {
    let err = parse_json("{\n  \"a\": tru\n}").unwrap_err();
    let details = err.details();
    assert!(details.iter().any(|(k, v)| *k == "line" && v == "2"));
}

// ============================================================================
// Path Tests
// ============================================================================

#[test]
fn test_paths_are_pre_order() {
    let tree = parse_json(r#"{"a": [{"b": 1}, 2], "c": {}}"#).unwrap();
    let paths: Vec<String> = tree.paths().iter().map(|p| p.to_string()).collect();
    assert_eq!(paths, vec!["a", "a[0]", "a[0].b", "a[1]", "c"]);
}

#[test]
fn test_path_rendering_escapes_special_keys() {
    let path = NodePath::new(vec![key("a.b"), PathElement::Index(2), key("it's")]);
    assert_eq!(path.to_string(), r"['a.b'][2]['it\'s']");
    assert_eq!(NodePath::root().to_string(), "");
}

#[test]
fn test_path_prefix_is_segment_wise() {
    let ab = NodePath::new(vec![key("ab")]);
    let abc = NodePath::new(vec![key("abc")]);
    let ab_c = NodePath::new(vec![key("ab"), key("c")]);

    assert!(!ab.is_prefix_of(&abc));
    assert!(ab.is_prefix_of(&ab_c));
    assert!(ab.is_ancestor_of(&ab_c));
    assert!(ab.is_prefix_of(&ab));
    assert!(!ab.is_ancestor_of(&ab));
}

// ============================================================================
// Tree Mutation Tests
// ============================================================================

#[test]
fn test_detach_object_member_keeps_sibling_order() {
    let mut tree = parse_json(r#"{"a": 1, "b": 2, "c": 3}"#).unwrap();
    tree.detach(&NodePath::new(vec![key("b")])).unwrap();
    assert_eq!(serialize_compact(tree.root()), r#"{"a":1,"c":3}"#);
}

#[test]
fn test_detach_array_element_shifts_later_elements() {
    let mut tree = parse_json("[10, 20, 30]").unwrap();
    let removed = tree
        .detach(&NodePath::new(vec![PathElement::Index(0)]))
        .unwrap();
    assert_eq!(serialize_compact(&removed), "10");
    assert_eq!(serialize_compact(tree.root()), "[20,30]");
}

#[test]
fn test_detach_root_fails() {
    let mut tree = parse_json(r#"{"a": 1}"#).unwrap();
    assert!(tree.detach(&NodePath::root()).is_err());
}

#[test]
fn test_detach_missing_path_fails() {
    let mut tree = parse_json(r#"{"a": [1]}"#).unwrap();
    assert!(tree
        .detach(&NodePath::new(vec![key("a"), PathElement::Index(3)]))
        .is_err());
    assert!(tree.detach(&NodePath::new(vec![key("zz")])).is_err());
}

// ============================================================================
// Serialization Tests
// ============================================================================

#[test]
fn test_serialize_pretty_uses_two_space_indent() {
    let tree = parse_json(r#"{"a":[1,{"b":null}]}"#).unwrap();
    assert_eq!(
        serialize(tree.root()),
        "{\n  \"a\": [\n    1,\n    {\n      \"b\": null\n    }\n  ]\n}"
    );
}

#[test]
fn test_serialize_empty_containers() {
    let tree = JsonTree::new(JsonNode::new(JsonValue::Object(Default::default())));
    assert_eq!(serialize(tree.root()), "{}");
    let tree = JsonTree::new(JsonNode::new(JsonValue::Array(Vec::new())));
    assert_eq!(serialize(tree.root()), "[]");
}

#[test]
fn test_serialize_escapes_strings() {
    let tree = parse_json(r#"["line\nbreak", "quote\"d", "tab\t"]"#).unwrap();
    assert_eq!(
        serialize_compact(tree.root()),
        r#"["line\nbreak","quote\"d","tab\t"]"#
    );
}

#[test]
fn test_reserved_number_key_is_read_as_number() {
    // serde_json's arbitrary_precision marker object is indistinguishable from a number.
    let tree = parse_json(r#"{"k": {"$serde_json::private::Number": "12"}}"#).unwrap();
    assert_eq!(serialize_compact(tree.root()), r#"{"k":12}"#);

    let err = parse_json(r#"{"$serde_json::private::Number": "abc"}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}
