//! Defines the Abstract Syntax Tree (AST) for path expressions.
//!
//! An AST is immutable once built and can be evaluated any number of times
//! against different trees.

use crate::error::PathError;
use std::fmt;
use std::str::FromStr;

/// The top-level expression that can be evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathExpression {
    Simple(SimplePathExpression),
    /// Two or more alternatives, evaluated independently and merged in order.
    Union(Vec<PathExpression>),
}

/// A sequence of location steps, like `/foo//bar[1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplePathExpression {
    /// True if the text started with `/`. Navigation always starts at the
    /// caller's root, so this only affects how the expression is rendered.
    pub is_absolute: bool,
    pub steps: Vec<LocationStep>,
}

/// Represents a single step in a path, like `following-sibling::foo[?bar]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationStep {
    pub axis: Axis,
    pub node_test: NodeTest,
    pub predicates: Vec<Predicate>,
}

/// The axis of movement from the context node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Child,
    Descendant,
    DescendantOrSelf,
    SelfAxis,
    Parent,
    Ancestor,
    AncestorOrSelf,
    /// Only the immediately following sibling.
    FollowingSibling,
    /// Only the immediately preceding sibling.
    PrecedingSibling,
}

/// A test on the label of the nodes an axis returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTest {
    /// `*`
    Any,
    /// An exact label.
    Name(String),
}

/// A boolean filter over the nodes that passed a step's axis and node test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `[@name='value']`
    AttributeEquals { name: String, value: String },
    /// `[3]`, 1-based.
    Position(usize),
    /// `[other/path]`: true if the path matches anything from the candidate.
    Nested(Box<PathExpression>),
    /// `[?name]`: a function looked up in the caller's registry.
    Function(String),
    /// Either predicate. Has no concrete syntax and can only be built directly.
    Or(Box<Predicate>, Box<Predicate>),
}

impl Axis {
    pub const ALL: [Axis; 9] = [
        Axis::Child,
        Axis::Descendant,
        Axis::DescendantOrSelf,
        Axis::SelfAxis,
        Axis::Parent,
        Axis::Ancestor,
        Axis::AncestorOrSelf,
        Axis::FollowingSibling,
        Axis::PrecedingSibling,
    ];

    /// The name used in the full `name::` syntax.
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Child => "child",
            Axis::Descendant => "descendant",
            Axis::DescendantOrSelf => "descendant-or-self",
            Axis::SelfAxis => "self",
            Axis::Parent => "parent",
            Axis::Ancestor => "ancestor",
            Axis::AncestorOrSelf => "ancestor-or-self",
            Axis::FollowingSibling => "following-sibling",
            Axis::PrecedingSibling => "preceding-sibling",
        }
    }

    pub fn from_name(name: &str) -> Option<Axis> {
        Axis::ALL.into_iter().find(|axis| axis.as_str() == name)
    }

    /// Only `parent` and `self` may omit the node test, which then matches any node.
    pub fn allows_omitted_node_test(&self) -> bool {
        matches!(self, Axis::Parent | Axis::SelfAxis)
    }
}

impl LocationStep {
    pub fn new(axis: Axis, node_test: NodeTest, predicates: Vec<Predicate>) -> Self {
        Self {
            axis,
            node_test,
            predicates,
        }
    }
}

impl NodeTest {
    pub fn named(name: impl Into<String>) -> Self {
        NodeTest::Name(name.into())
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            NodeTest::Any => true,
            NodeTest::Name(expected) => expected == name,
        }
    }
}

impl Predicate {
    pub fn attribute_equals(name: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::AttributeEquals {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn nested(expression: PathExpression) -> Self {
        Predicate::Nested(Box::new(expression))
    }

    pub fn function(name: impl Into<String>) -> Self {
        Predicate::Function(name.into())
    }

    pub fn or(a: Predicate, b: Predicate) -> Self {
        Predicate::Or(Box::new(a), Box::new(b))
    }
}

impl PathExpression {
    /// A simple path expression over the given steps.
    pub fn simple(is_absolute: bool, steps: Vec<LocationStep>) -> Self {
        PathExpression::Simple(SimplePathExpression { is_absolute, steps })
    }

    /// Parses each expression and combines them into a union.
    /// A single expression is returned unchanged.
    pub fn union_of<I, S>(expressions: I) -> Result<PathExpression, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut branches = expressions
            .into_iter()
            .map(|e| e.as_ref().parse::<PathExpression>())
            .collect::<Result<Vec<_>, _>>()?;
        match branches.len() {
            0 => Err(PathError::EmptyUnion),
            1 => Ok(branches.remove(0)),
            _ => Ok(PathExpression::Union(branches)),
        }
    }

    pub fn is_union(&self) -> bool {
        matches!(self, PathExpression::Union(_))
    }

    /// Every predicate in the expression, including those inside nested
    /// expressions, `Or` predicates and union branches.
    pub fn predicates(&self) -> Vec<&Predicate> {
        let mut found = Vec::new();
        collect_predicates(self, &mut found);
        found
    }

    /// The names of all function predicates in the expression, in order of first
    /// appearance and without duplicates.
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for predicate in self.predicates() {
            if let Predicate::Function(name) = predicate {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

fn collect_predicates<'e>(expression: &'e PathExpression, found: &mut Vec<&'e Predicate>) {
    match expression {
        PathExpression::Union(branches) => {
            for branch in branches {
                collect_predicates(branch, found);
            }
        }
        PathExpression::Simple(simple) => {
            for predicate in simple.steps.iter().flat_map(|s| &s.predicates) {
                collect_predicate(predicate, found);
            }
        }
    }
}

fn collect_predicate<'e>(predicate: &'e Predicate, found: &mut Vec<&'e Predicate>) {
    found.push(predicate);
    match predicate {
        Predicate::Nested(expression) => collect_predicates(expression, found),
        Predicate::Or(a, b) => {
            collect_predicate(a, found);
            collect_predicate(b, found);
        }
        _ => {}
    }
}

impl FromStr for PathExpression {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_path_expression(s)
    }
}

// --- Canonical rendering ---

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathExpression::Simple(simple) => write!(f, "{}", simple),
            PathExpression::Union(branches) => {
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{}", branch)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for SimplePathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_absolute {
            f.write_str("/")?;
        }
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl fmt::Display for LocationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.axis, self.node_test)?;
        for predicate in &self.predicates {
            write!(f, "[{}]", predicate)?;
        }
        Ok(())
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NodeTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeTest::Any => f.write_str("*"),
            NodeTest::Name(name) => f.write_str(name),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Literals have no escapes; double quotes are only used when the value needs them.
            Predicate::AttributeEquals { name, value } if value.contains('\'') => {
                write!(f, "@{}=\"{}\"", name, value)
            }
            Predicate::AttributeEquals { name, value } => write!(f, "@{}='{}'", name, value),
            Predicate::Position(position) => write!(f, "{}", position),
            Predicate::Nested(expression) => write!(f, "{}", expression),
            Predicate::Function(name) => write!(f, "?{}", name),
            Predicate::Or(a, b) => write!(f, "{} or {}", a, b),
        }
    }
}
