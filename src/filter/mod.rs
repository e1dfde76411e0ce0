//! Selector-driven pruning of a JSON document.
//!
//! Filtering happens in three steps:
//!
//! 1. every selector is evaluated against the untouched tree, and the concrete
//!    paths it matches are collected into a de-duplicated set (the root path is
//!    dropped, since the root is always kept);
//! 2. the tree is walked in document order, and every child that is not a
//!    match, an ancestor of a match or a descendant of a match is recorded
//!    for removal without descending into it;
//! 3. the recorded paths are detached in reverse order, so that removing a
//!    later array element never shifts an earlier recorded index.
//!
//! The matched set is computed once and never re-evaluated against the
//! partially pruned tree.

use indexmap::IndexSet;
use log::{debug, info, trace};

use crate::document::node::JsonNode;
use crate::document::parser::parse_json;
use crate::document::path::NodePath;
use crate::document::serialize::serialize;
use crate::document::tree::JsonTree;
use crate::error::FilterError;
use crate::jsonpath::{Evaluator, Parser};

/// Evaluates every selector against `root` and returns the de-duplicated
/// matched paths, in first-seen order. Matches on the root itself are dropped.
///
/// Fails on the first selector with invalid syntax.
pub fn matched_paths<S: AsRef<str>>(
    root: &JsonNode,
    selectors: &[S],
) -> Result<IndexSet<NodePath>, FilterError> {
    let evaluator = Evaluator::new(root);
    let mut matches = IndexSet::new();

    for selector in selectors {
        let selector = selector.as_ref();
        let query = Parser::parse(selector).map_err(|source| FilterError::Selector {
            selector: selector.to_string(),
            source,
        })?;

        let found = evaluator.evaluate_paths(&query);
        debug!("selector '{}' matched {} node(s)", selector, found.len());

        for path in found {
            if path.is_root() {
                debug!("selector '{}' matched the root; ignoring that match", selector);
                continue;
            }
            matches.insert(path);
        }
    }

    Ok(matches)
}

/// Returns true if a node at `candidate` survives pruning: it is a match, lies
/// on the way to a match, or lies beneath a match.
pub fn is_path_included(candidate: &NodePath, matches: &IndexSet<NodePath>) -> bool {
    matches
        .iter()
        .any(|matched| candidate.is_prefix_of(matched) || matched.is_prefix_of(candidate))
}

/// Removes every node of `tree` that is not covered by `matches`.
///
/// Returns the number of detached subtrees.
pub fn prune(tree: &mut JsonTree, matches: &IndexSet<NodePath>) -> Result<usize, FilterError> {
    fn collect(
        node: &JsonNode,
        current: &mut NodePath,
        matches: &IndexSet<NodePath>,
        doomed: &mut Vec<NodePath>,
    ) {
        for (element, child) in node.children() {
            current.push(element);
            if is_path_included(current, matches) {
                collect(child, current, matches, doomed);
            } else {
                doomed.push(current.clone());
            }
            current.pop();
        }
    }

    let mut doomed = Vec::new();
    collect(tree.root(), &mut NodePath::root(), matches, &mut doomed);

    for path in doomed.iter().rev() {
        trace!("detaching '{}'", path);
        tree.detach(path)?;
    }

    Ok(doomed.len())
}

/// Filters a JSON document, keeping only the parts covered by `selectors`.
///
/// An empty selector list keeps nothing below the root: an object becomes
/// `{}`, an array becomes `[]`, and a scalar root is returned unchanged.
///
/// # Example
///
/// ```
/// use jsonfilter::filter::filter_json;
///
/// let out = filter_json(r#"{"a":[{"x":1},{"x":2}]}"#, &["a[0].x"]).unwrap();
/// assert_eq!(out, "{\n  \"a\": [\n    {\n      \"x\": 1\n    }\n  ]\n}");
/// ```
pub fn filter_json<S: AsRef<str>>(text: &str, selectors: &[S]) -> Result<String, FilterError> {
    let mut tree = parse_json(text)?;

    let matches = matched_paths(tree.root(), selectors)?;
    let removed = prune(&mut tree, &matches)?;
    info!(
        "{} selector(s) matched {} path(s); removed {} subtree(s)",
        selectors.len(),
        matches.len(),
        removed
    );

    Ok(serialize(tree.root()))
}
