//! Abstract syntax tree types for selector expressions.

/// A segment in a selector expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Root node (`$`, or implied when the selector starts with a name)
    Root,
    /// Current node (`@`), only meaningful inside filters
    Current,
    /// Named child (`.property` or `['property']`)
    Child(String),
    /// Array index (`[0]`, `[-1]`)
    Index(isize),
    /// Wildcard (`*` or `[*]`) - all children
    Wildcard,
    /// Recursive descent (`..property` or `..*`)
    RecursiveDescent(Option<String>),
    /// The current node and all of its descendants (`..` before a bracket)
    DescendantOrSelf,
    /// Array slice (`[start:end]` or `[start:end:step]`)
    Slice {
        start: Option<isize>,
        end: Option<isize>,
        step: Option<isize>,
    },
    /// Multiple properties (`['prop1','prop2']`)
    MultiProperty(Vec<String>),
    /// Multiple indices (`[0,2,-1]`)
    MultiIndex(Vec<isize>),
    /// Filter over children (`[?(@.price < 10)]`)
    Filter(FilterExpr),
}

/// A boolean expression inside a filter segment.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    Or(Box<FilterExpr>, Box<FilterExpr>),
    And(Box<FilterExpr>, Box<FilterExpr>),
    Not(Box<FilterExpr>),
    Compare {
        left: Operand,
        op: CompareOp,
        right: Operand,
    },
    /// True when the operand path resolves to a node
    Exists(Operand),
}

/// One side of a filter comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A path relative to the node being filtered (`@.a.b`)
    Current(Vec<PathSegment>),
    /// A path relative to the document root (`$.a.b`)
    Root(Vec<PathSegment>),
    Literal(Literal),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// A complete selector expression.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPath {
    /// Segments that make up the path.
    pub segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Creates a new JsonPath with the given segments.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}
