//! Path expressions over labeled trees.
//!
//! This crate re-exports the tree model (`treepath-tree`) and the expression
//! engine (`treepath-path`), and adds an XML data source and the input and
//! output plumbing used by the `treepath` command-line tool.

pub mod datasources;
pub mod error;
pub mod input;
pub mod output;

pub use datasources::{XmlDocument, XmlNode};
pub use error::CliError;
pub use input::InputFormat;
pub use output::{MatchRecord, OutputMode};

pub use treepath_path::{
    Axis, EvaluationContext, ExecutionResult, FunctionRegistry, LocationStep, NodeTest,
    PathError, PathExpression, Predicate, SimplePathExpression, ToPathExpression, evaluate,
    evaluate_scalar, evaluate_scalar_value, evaluate_scalar_values, parse_path_expression,
};
pub use treepath_tree::{
    Node, NodeRef, ParentIndex, TreeNode, manipulation, parent_of, path_down_to, path_from_root,
    visit, visit_mut,
};
