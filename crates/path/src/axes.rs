//! Contains pure functions for collecting nodes along each axis.
//!
//! Parents are taken from a node's back-reference when the tree provides one and
//! are otherwise found by searching down from the evaluation root, so every axis
//! works on trees without back-references as well.

use crate::ast::Axis;
use treepath_tree::{TreeNode, parent_of, path_from_root};

impl Axis {
    /// Collects the nodes reachable from `node` along this axis, in axis order.
    pub fn follow<'a, N: TreeNode<'a>>(self, node: N, root: N) -> Vec<N> {
        let mut results = Vec::new();
        match self {
            Axis::Child => collect_child_nodes(node, &mut results),
            Axis::Descendant => collect_descendant_nodes(node, &mut results),
            Axis::DescendantOrSelf => collect_descendant_or_self_nodes(node, &mut results),
            Axis::SelfAxis => results.push(node),
            Axis::Parent => collect_parent_nodes(node, root, &mut results),
            Axis::Ancestor => collect_ancestor_nodes(node, root, &mut results),
            Axis::AncestorOrSelf => collect_ancestor_or_self_nodes(node, root, &mut results),
            Axis::FollowingSibling => collect_following_sibling_nodes(node, root, &mut results),
            Axis::PrecedingSibling => collect_preceding_sibling_nodes(node, root, &mut results),
        }
        results
    }
}

pub fn collect_child_nodes<'a, N: TreeNode<'a>>(node: N, results: &mut Vec<N>) {
    results.extend(node.children());
}

/// All children of `node` first, then the descendants of each child in turn.
///
/// For `a { b { d { f } }, c { e } }` the order is `b, c, d, f, e`.
pub fn collect_descendant_nodes<'a, N: TreeNode<'a>>(node: N, results: &mut Vec<N>) {
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        let children: Vec<N> = current.children().collect();
        results.extend(children.iter().copied());
        stack.extend(children.into_iter().rev());
    }
}

/// The descendants of `node`, followed by `node` itself.
pub fn collect_descendant_or_self_nodes<'a, N: TreeNode<'a>>(node: N, results: &mut Vec<N>) {
    collect_descendant_nodes(node, results);
    results.push(node);
}

pub fn collect_parent_nodes<'a, N: TreeNode<'a>>(node: N, root: N, results: &mut Vec<N>) {
    if let Some(parent) = parent_of(node, root) {
        results.push(parent);
    }
}

/// The chain from `root` down to the parent of `node`, root first.
pub fn collect_ancestor_nodes<'a, N: TreeNode<'a>>(node: N, root: N, results: &mut Vec<N>) {
    if let Some(mut path) = path_from_root(node, root) {
        path.pop();
        results.extend(path);
    }
}

/// The chain from `root` down to `node` itself.
pub fn collect_ancestor_or_self_nodes<'a, N: TreeNode<'a>>(node: N, root: N, results: &mut Vec<N>) {
    match path_from_root(node, root) {
        Some(path) => results.extend(path),
        None => results.push(node),
    }
}

/// The sibling directly after `node`, if any.
pub fn collect_following_sibling_nodes<'a, N: TreeNode<'a>>(
    node: N,
    root: N,
    results: &mut Vec<N>,
) {
    if let Some(parent) = parent_of(node, root) {
        let mut siblings = parent.children().skip_while(|sibling| *sibling != node);
        if let Some(sibling) = siblings.nth(1) {
            results.push(sibling);
        }
    }
}

/// The sibling directly before `node`, if any.
pub fn collect_preceding_sibling_nodes<'a, N: TreeNode<'a>>(
    node: N,
    root: N,
    results: &mut Vec<N>,
) {
    if let Some(parent) = parent_of(node, root) {
        let mut previous = None;
        for sibling in parent.children() {
            if sibling == node {
                break;
            }
            previous = Some(sibling);
        }
        results.extend(previous);
    }
}
