use crate::ast::Axis;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Path expression parse error in '{expression}' at offset {offset}: {message}")]
    Parse {
        expression: String,
        offset: usize,
        message: String,
    },

    #[error("Unsupported axis specifier '{axis}' in '{expression}'")]
    UnknownAxis { expression: String, axis: String },

    #[error("Axis '{axis}' requires a node test in '{expression}'")]
    MissingNodeTest { expression: String, axis: Axis },

    #[error("A union path expression needs at least one branch")]
    EmptyUnion,

    #[error("Function predicate '{}' not found in registry", .0.join(","))]
    MissingFunctions(Vec<String>),
}

impl PathError {
    /// True for errors in the expression text itself, as opposed to problems
    /// resolving a well-formed expression against a function registry.
    pub fn is_parse_error(&self) -> bool {
        !matches!(self, PathError::MissingFunctions(_))
    }
}
