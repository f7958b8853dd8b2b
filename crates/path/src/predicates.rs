//! Evaluation of step predicates.

use crate::ast::Predicate;
use crate::engine::EvaluationContext;
use treepath_tree::TreeNode;

impl Predicate {
    /// Tests `candidate`, one of `candidates`: the nodes that passed the current
    /// step's axis and node test for one context node.
    pub fn evaluate<'a, N: TreeNode<'a>>(
        &self,
        candidate: N,
        candidates: &[N],
        ctx: &EvaluationContext<'_, N>,
    ) -> bool {
        match self {
            Predicate::AttributeEquals { name, value } => {
                candidate.try_get_attribute(name) == Some(value.as_str())
            }
            Predicate::Position(position) => {
                candidates.iter().position(|n| *n == candidate) == position.checked_sub(1)
            }
            // The candidate becomes the root, so only back-references reach above it.
            Predicate::Nested(expression) => EvaluationContext::new(candidate, ctx.functions)
                .evaluate(candidate, &**expression)
                .is_ok_and(|nodes| !nodes.is_empty()),
            Predicate::Function(name) => match ctx.functions.get(name) {
                Some(function) => function(candidate, candidates, ctx),
                None => {
                    log::warn!("Function predicate '{}' is not registered", name);
                    false
                }
            },
            Predicate::Or(a, b) => {
                a.evaluate(candidate, candidates, ctx) || b.evaluate(candidate, candidates, ctx)
            }
        }
    }
}
