pub mod ast;
pub mod axes;
pub mod engine;
pub mod error;
pub mod functions;
pub mod parser;
pub mod predicates;

pub use ast::{Axis, LocationStep, NodeTest, PathExpression, Predicate, SimplePathExpression};
pub use engine::{
    EvaluationContext, ExecutionResult, ToPathExpression, evaluate, evaluate_scalar,
    evaluate_scalar_value, evaluate_scalar_values,
};
pub use error::PathError;
pub use functions::{FunctionRegistry, PredicateFunction};
pub use parser::parse_path_expression;
