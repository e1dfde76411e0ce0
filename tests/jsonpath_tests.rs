//! Integration tests for selector parsing and evaluation.

use jsonfilter::document::parser::parse_json;
use jsonfilter::document::tree::JsonTree;
use jsonfilter::jsonpath::{Evaluator, JsonPathError, Parser};

/// Helper to create a sample bookstore JSON structure
fn create_bookstore() -> JsonTree {
    parse_json(
        r#"{
            "store": {
                "book": [
                    {"category": "reference", "author": "Nigel Rees", "title": "Sayings of the Century", "price": 8.95},
                    {"category": "fiction", "author": "Herman Melville", "title": "Moby Dick", "price": 8.99}
                ],
                "bicycle": {"color": "red", "price": 19.95}
            }
        }"#,
    )
    .unwrap()
}

fn select(tree: &JsonTree, selector: &str) -> Vec<String> {
    let query = Parser::parse(selector).unwrap();
    Evaluator::new(tree.root())
        .evaluate_paths(&query)
        .iter()
        .map(|p| p.to_string())
        .collect()
}

#[test]
fn test_jsonpath_wildcard_search() {
    let tree = create_bookstore();
    assert_eq!(
        select(&tree, "$.store.book[*].author"),
        vec!["store.book[0].author", "store.book[1].author"]
    );
}

#[test]
fn test_jsonpath_recursive_descent() {
    let tree = create_bookstore();
    assert_eq!(
        select(&tree, "$..price"),
        vec![
            "store.book[0].price",
            "store.book[1].price",
            "store.bicycle.price"
        ]
    );
}

#[test]
fn test_jsonpath_optional_root_marker() {
    let tree = create_bookstore();
    assert_eq!(
        select(&tree, "store.bicycle.color"),
        select(&tree, "$.store.bicycle.color")
    );
    assert_eq!(
        select(&tree, "['store']['bicycle']"),
        vec!["store.bicycle"]
    );
}

#[test]
fn test_jsonpath_multi_property() {
    let tree = create_bookstore();
    assert_eq!(
        select(&tree, "store.bicycle['price','color']"),
        vec!["store.bicycle.price", "store.bicycle.color"]
    );
}

#[test]
fn test_jsonpath_slice_and_negative_index() {
    let tree = create_bookstore();
    assert_eq!(select(&tree, "store.book[-1].title"), vec!["store.book[1].title"]);
    assert_eq!(select(&tree, "store.book[:1].title"), vec!["store.book[0].title"]);
}

#[test]
fn test_jsonpath_filter() {
    let tree = create_bookstore();
    assert_eq!(
        select(&tree, "store.book[?(@.category == 'fiction')].title"),
        vec!["store.book[1].title"]
    );
    assert_eq!(
        select(&tree, "store.book[?(@.price < $.store.bicycle.price)]"),
        vec!["store.book[0]", "store.book[1]"]
    );
}

#[test]
fn test_jsonpath_no_matches() {
    let tree = create_bookstore();
    assert!(select(&tree, "$.store.magazine").is_empty());
    assert!(select(&tree, "store.book[5]").is_empty());
}

#[test]
fn test_rendered_paths_round_trip_as_selectors() {
    let tree = parse_json(r#"{"a b": {"it's": [1, {"x.y": 2}]}, "plain": 3}"#).unwrap();
    for path in tree.paths() {
        let rendered = path.to_string();
        let query = Parser::parse(&rendered).unwrap();
        let found = Evaluator::new(tree.root()).evaluate_paths(&query);
        assert_eq!(found, vec![path.clone()], "selector {}", rendered);
    }
}

#[test]
fn test_jsonpath_invalid_syntax() {
    assert!(matches!(
        Parser::parse("store..").unwrap_err(),
        JsonPathError::UnexpectedEnd { .. }
    ));
    assert!(matches!(
        Parser::parse("store[1:2:0]").unwrap_err(),
        JsonPathError::InvalidSyntax { .. }
    ));
    assert!(matches!(
        Parser::parse("store]").unwrap_err(),
        JsonPathError::UnexpectedToken { position: 5, .. }
    ));
}
