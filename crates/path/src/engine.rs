//! The evaluation engine for executing a path expression against a generic `TreeNode`.

use crate::ast::{PathExpression, SimplePathExpression};
use crate::error::PathError;
use crate::functions::FunctionRegistry;
use itertools::Itertools;
use std::borrow::Cow;
use treepath_tree::TreeNode;

/// The outcome of an evaluation: the matched nodes in order (possibly none),
/// or the reason the expression could not be evaluated.
pub type ExecutionResult<N> = Result<Vec<N>, PathError>;

/// Anything that can be evaluated: expression text or an already-parsed AST.
pub trait ToPathExpression {
    fn to_path_expression(&self) -> Result<Cow<'_, PathExpression>, PathError>;
}

impl ToPathExpression for str {
    fn to_path_expression(&self) -> Result<Cow<'_, PathExpression>, PathError> {
        self.parse().map(Cow::Owned)
    }
}

impl ToPathExpression for String {
    fn to_path_expression(&self) -> Result<Cow<'_, PathExpression>, PathError> {
        self.as_str().to_path_expression()
    }
}

impl ToPathExpression for PathExpression {
    fn to_path_expression(&self) -> Result<Cow<'_, PathExpression>, PathError> {
        Ok(Cow::Borrowed(self))
    }
}

/// The state shared by one evaluation, handed to predicates and registry functions.
/// `'r` is the lifetime of the borrowed registry.
pub struct EvaluationContext<'r, N> {
    /// The root of the evaluation. Parents of nodes without back-references are
    /// searched for below it, and ancestors stop at it.
    pub root: N,
    pub functions: &'r FunctionRegistry<N>,
}

impl<'a, 'r, N: TreeNode<'a>> EvaluationContext<'r, N> {
    pub fn new(root: N, functions: &'r FunctionRegistry<N>) -> Self {
        Self { root, functions }
    }

    /// Evaluates `expression` starting from `start`, which need not be the tree
    /// root. Function predicates are validated against the registry first.
    pub fn evaluate<E>(&self, start: N, expression: &E) -> ExecutionResult<N>
    where
        E: ToPathExpression + ?Sized,
    {
        let expression = expression.to_path_expression()?;
        self.validate(&expression)?;
        Ok(self.evaluate_expression(start, &expression))
    }

    /// Fails with every function predicate name missing from the registry.
    fn validate(&self, expression: &PathExpression) -> Result<(), PathError> {
        let missing: Vec<String> = expression
            .function_names()
            .into_iter()
            .filter(|name| !self.functions.contains(name))
            .map(str::to_string)
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        log::debug!(
            "Rejecting '{}': unregistered function predicates {:?}",
            expression,
            missing
        );
        Err(PathError::MissingFunctions(missing))
    }

    fn evaluate_expression(&self, start: N, expression: &PathExpression) -> Vec<N> {
        match expression {
            PathExpression::Simple(path) => self.evaluate_simple(start, path),
            PathExpression::Union(branches) => {
                let matches: Vec<N> = branches
                    .iter()
                    .flat_map(|branch| self.evaluate_expression(start, branch))
                    .collect();
                let merged: Vec<N> = matches.iter().copied().unique().collect();
                log::debug!(
                    "Union of {} branches: {} matches, {} after de-duplication",
                    branches.len(),
                    matches.len(),
                    merged.len()
                );
                merged
            }
        }
    }

    fn evaluate_simple(&self, start: N, path: &SimplePathExpression) -> Vec<N> {
        let mut current = vec![start];
        for step in &path.steps {
            if current.is_empty() {
                break;
            }
            let mut next = Vec::new();
            for node in current {
                let candidates: Vec<N> = step
                    .axis
                    .follow(node, self.root)
                    .into_iter()
                    .filter(|candidate| step.node_test.matches(candidate.name()))
                    .collect();
                next.extend(candidates.iter().copied().filter(|candidate| {
                    step.predicates
                        .iter()
                        .all(|predicate| predicate.evaluate(*candidate, &candidates, self))
                }));
            }
            log::trace!("Step '{}' matched {} node(s)", step, next.len());
            current = next;
        }
        current
    }
}

/// Evaluates `expression` against the tree rooted at `root`.
///
/// Expression text is parsed first; parse errors are returned before anything
/// else happens. Every function predicate, including those in nested
/// expressions and union branches, must be present in `functions`, otherwise
/// [`PathError::MissingFunctions`] is returned without navigating the tree.
pub fn evaluate<'a, N, E>(root: N, expression: &E, functions: &FunctionRegistry<N>) -> ExecutionResult<N>
where
    N: TreeNode<'a>,
    E: ToPathExpression + ?Sized,
{
    EvaluationContext::new(root, functions).evaluate(root, expression)
}

/// The single match of `expression`, or `None` if there are zero or several.
pub fn evaluate_scalar<'a, N, E>(
    root: N,
    expression: &E,
    functions: &FunctionRegistry<N>,
) -> Result<Option<N>, PathError>
where
    N: TreeNode<'a>,
    E: ToPathExpression + ?Sized,
{
    let nodes = evaluate(root, expression, functions)?;
    Ok(match nodes.as_slice() {
        [node] => Some(*node),
        _ => None,
    })
}

/// The value of the single match of `expression`.
pub fn evaluate_scalar_value<'a, N, E>(
    root: N,
    expression: &E,
    functions: &FunctionRegistry<N>,
) -> Result<Option<&'a str>, PathError>
where
    N: TreeNode<'a>,
    E: ToPathExpression + ?Sized,
{
    Ok(evaluate_scalar(root, expression, functions)?.and_then(|node| node.value()))
}

/// The values of all matches of `expression`, skipping nodes without a value.
pub fn evaluate_scalar_values<'a, N, E>(
    root: N,
    expression: &E,
    functions: &FunctionRegistry<N>,
) -> Result<Vec<&'a str>, PathError>
where
    N: TreeNode<'a>,
    E: ToPathExpression + ?Sized,
{
    let nodes = evaluate(root, expression, functions)?;
    Ok(nodes.iter().filter_map(|node| node.value()).collect())
}
