//! Selector evaluation against a document.
//!
//! Evaluation never fails: a segment that does not fit the shape of the node
//! it is applied to (a key on an array, an index past the end) simply
//! contributes no results.

use std::cmp::Ordering;

use super::ast::{CompareOp, FilterExpr, JsonPath, Literal, Operand, PathSegment};
use crate::document::node::{JsonNode, JsonValue};
use crate::document::path::{NodePath, PathElement};

/// A selected node together with its concrete path.
type Match<'a> = (NodePath, &'a JsonNode);

pub struct Evaluator<'a> {
    root: &'a JsonNode,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a JsonNode) -> Self {
        Evaluator { root }
    }

    /// Evaluates a selector and returns the concrete path of every match, in
    /// evaluation order. A path may appear more than once (`$..a..b`).
    pub fn evaluate_paths(&self, query: &JsonPath) -> Vec<NodePath> {
        self.select((NodePath::root(), self.root), &query.segments)
            .into_iter()
            .map(|(path, _)| path)
            .collect()
    }

    /// Evaluates a selector and returns the matching nodes.
    pub fn evaluate(&self, query: &JsonPath) -> Vec<&'a JsonNode> {
        self.select((NodePath::root(), self.root), &query.segments)
            .into_iter()
            .map(|(_, node)| node)
            .collect()
    }

    fn select(&self, start: Match<'a>, segments: &[PathSegment]) -> Vec<Match<'a>> {
        let mut current = vec![start];

        for segment in segments {
            let mut next = Vec::new();
            for (path, node) in &current {
                next.extend(self.evaluate_segment(node, segment, path));
            }
            current = next;
        }

        current
    }

    /// Evaluates a single segment and returns (path, node) pairs.
    fn evaluate_segment(
        &self,
        node: &'a JsonNode,
        segment: &PathSegment,
        current_path: &NodePath,
    ) -> Vec<Match<'a>> {
        match segment {
            PathSegment::Root => vec![(NodePath::root(), self.root)],
            PathSegment::Current => vec![(current_path.clone(), node)],
            PathSegment::Child(name) => find_child(node, name, current_path).into_iter().collect(),
            PathSegment::Index(idx) => array_element(node, *idx, current_path)
                .into_iter()
                .collect(),
            PathSegment::Wildcard => all_children(node, current_path),
            PathSegment::RecursiveDescent(prop) => {
                recursive_descent(node, prop.as_deref(), current_path)
            }
            PathSegment::DescendantOrSelf => {
                let mut results = vec![(current_path.clone(), node)];
                results.extend(recursive_descent(node, None, current_path));
                results
            }
            PathSegment::Slice { start, end, step } => {
                slice(node, *start, *end, step.unwrap_or(1), current_path)
            }
            PathSegment::MultiProperty(props) => props
                .iter()
                .filter_map(|prop| find_child(node, prop, current_path))
                .collect(),
            PathSegment::MultiIndex(indices) => indices
                .iter()
                .filter_map(|idx| array_element(node, *idx, current_path))
                .collect(),
            PathSegment::Filter(expr) => all_children(node, current_path)
                .into_iter()
                .filter(|(_, child)| self.test_filter(expr, *child))
                .collect(),
        }
    }

    fn test_filter(&self, expr: &FilterExpr, current: &'a JsonNode) -> bool {
        match expr {
            FilterExpr::Or(left, right) => {
                self.test_filter(left, current) || self.test_filter(right, current)
            }
            FilterExpr::And(left, right) => {
                self.test_filter(left, current) && self.test_filter(right, current)
            }
            FilterExpr::Not(inner) => !self.test_filter(inner, current),
            FilterExpr::Exists(operand) => self.resolve(operand, current).is_some(),
            FilterExpr::Compare { left, op, right } => {
                let left = self.resolve(left, current);
                let right = self.resolve(right, current);
                compare(left, *op, right)
            }
        }
    }

    /// Resolves a filter operand to a single value. Paths that select nothing,
    /// or more than one node, resolve to `None`.
    fn resolve<'o>(&self, operand: &'o Operand, current: &'a JsonNode) -> Option<Resolved<'a, 'o>> {
        let selected = match operand {
            Operand::Literal(literal) => return Some(Resolved::Literal(literal)),
            Operand::Current(segments) => self.select((NodePath::root(), current), segments),
            Operand::Root(segments) => self.select((NodePath::root(), self.root), segments),
        };
        match selected.as_slice() {
            [(_, node)] => Some(Resolved::Node(*node)),
            _ => None,
        }
    }
}

/// A filter operand after resolution.
enum Resolved<'a, 'o> {
    Node(&'a JsonNode),
    Literal(&'o Literal),
}

/// A comparable scalar view of a resolved operand.
#[derive(PartialEq)]
enum Scalar<'s> {
    Number(f64),
    Str(&'s str),
    Bool(bool),
    Null,
}

impl<'a, 'o> Resolved<'a, 'o> {
    fn scalar(&self) -> Option<Scalar<'_>> {
        match self {
            Resolved::Literal(Literal::Number(n)) => Some(Scalar::Number(*n)),
            Resolved::Literal(Literal::String(s)) => Some(Scalar::Str(s)),
            Resolved::Literal(Literal::Bool(b)) => Some(Scalar::Bool(*b)),
            Resolved::Literal(Literal::Null) => Some(Scalar::Null),
            Resolved::Node(node) => match node.value() {
                JsonValue::Number(n) => n.as_f64().map(Scalar::Number),
                JsonValue::String(s) => Some(Scalar::Str(s)),
                JsonValue::Boolean(b) => Some(Scalar::Bool(*b)),
                JsonValue::Null => Some(Scalar::Null),
                JsonValue::Object(_) | JsonValue::Array(_) => None,
            },
        }
    }
}

fn equals(left: &Resolved<'_, '_>, right: &Resolved<'_, '_>) -> bool {
    match (left, right) {
        (Resolved::Node(a), Resolved::Node(b)) if a.value().is_container() => a == b,
        _ => match (left.scalar(), right.scalar()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

fn ordering(left: &Resolved<'_, '_>, right: &Resolved<'_, '_>) -> Option<Ordering> {
    match (left.scalar()?, right.scalar()?) {
        (Scalar::Number(a), Scalar::Number(b)) => a.partial_cmp(&b),
        (Scalar::Str(a), Scalar::Str(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Compares two operands. A missing operand only equals another missing one;
/// ordering is defined between two numbers or two strings.
fn compare(left: Option<Resolved<'_, '_>>, op: CompareOp, right: Option<Resolved<'_, '_>>) -> bool {
    let equal = match (&left, &right) {
        (None, None) => true,
        (Some(l), Some(r)) => equals(l, r),
        _ => false,
    };
    match op {
        CompareOp::Eq => equal,
        CompareOp::Ne => !equal,
        _ => {
            let (Some(l), Some(r)) = (&left, &right) else {
                return false;
            };
            match (ordering(l, r), op) {
                (Some(Ordering::Less), CompareOp::Lt | CompareOp::Le) => true,
                (Some(Ordering::Greater), CompareOp::Gt | CompareOp::Ge) => true,
                (Some(Ordering::Equal), CompareOp::Le | CompareOp::Ge) => true,
                _ => false,
            }
        }
    }
}

fn find_child<'a>(node: &'a JsonNode, name: &str, current_path: &NodePath) -> Option<Match<'a>> {
    match node.value() {
        JsonValue::Object(props) => props
            .get(name)
            .map(|child| (current_path.child(PathElement::Key(name.to_string())), child)),
        _ => None,
    }
}

/// Resolves a possibly negative index against an array length.
fn normalize_index(idx: isize, len: usize) -> Option<usize> {
    let len = len as isize;
    let normalized = if idx < 0 { len + idx } else { idx };
    (0..len).contains(&normalized).then_some(normalized as usize)
}

fn array_element<'a>(node: &'a JsonNode, idx: isize, current_path: &NodePath) -> Option<Match<'a>> {
    match node.value() {
        JsonValue::Array(items) => {
            let idx = normalize_index(idx, items.len())?;
            Some((current_path.child(PathElement::Index(idx)), &items[idx]))
        }
        _ => None,
    }
}

fn all_children<'a>(node: &'a JsonNode, current_path: &NodePath) -> Vec<Match<'a>> {
    node.children()
        .into_iter()
        .map(|(element, child)| (current_path.child(element), child))
        .collect()
}

fn slice<'a>(
    node: &'a JsonNode,
    start: Option<isize>,
    end: Option<isize>,
    step: isize,
    current_path: &NodePath,
) -> Vec<Match<'a>> {
    let JsonValue::Array(items) = node.value() else {
        return vec![];
    };
    let len = items.len() as isize;

    let clamp = |bound: isize| -> usize {
        if bound < 0 {
            (len + bound).max(0) as usize
        } else {
            bound.min(len) as usize
        }
    };
    let start_idx = start.map(clamp).unwrap_or(0);
    let end_idx = end.map(clamp).unwrap_or(len as usize);

    if start_idx >= end_idx {
        return vec![];
    }

    (start_idx..end_idx)
        .step_by(step.max(1) as usize)
        .map(|idx| (current_path.child(PathElement::Index(idx)), &items[idx]))
        .collect()
}

/// Walks every descendant of `node`. With a property name, yields object
/// members with that name at any depth; without one, yields every descendant.
fn recursive_descent<'a>(
    node: &'a JsonNode,
    prop: Option<&str>,
    current_path: &NodePath,
) -> Vec<Match<'a>> {
    fn walk<'a>(
        node: &'a JsonNode,
        prop: Option<&str>,
        current_path: &mut NodePath,
        results: &mut Vec<Match<'a>>,
    ) {
        for (element, child) in node.children() {
            let matches = match (prop, &element) {
                (None, _) => true,
                (Some(name), PathElement::Key(key)) => key == name,
                (Some(_), PathElement::Index(_)) => false,
            };
            current_path.push(element);
            if matches {
                results.push((current_path.clone(), child));
            }
            walk(child, prop, current_path, results);
            current_path.pop();
        }
    }

    let mut results = Vec::new();
    walk(node, prop, &mut current_path.clone(), &mut results);
    results
}
