//! Root-down parent resolution for trees whose nodes may lack back-references.
//!
//! All searches use an explicit stack, so very deep trees cannot exhaust the call stack.

use crate::node::TreeNode;

/// Returns the path from `from` down to `target`, both included.
/// `None` if `target` is not in the subtree rooted at `from`.
pub fn path_down_to<'a, N: TreeNode<'a>>(target: N, from: N) -> Option<Vec<N>> {
    let mut path: Vec<N> = Vec::new();
    let mut stack: Vec<(N, usize)> = vec![(from, 0)];
    while let Some((node, depth)) = stack.pop() {
        path.truncate(depth);
        path.push(node);
        if node == target {
            return Some(path);
        }
        let children: Vec<N> = node.children().collect();
        stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
    }
    None
}

/// Finds the parent of `node`, using its back-reference when it has one and
/// otherwise searching down from `root`.
///
/// The search is linear in the size of the tree and is not memoized.
pub fn parent_of<'a, N: TreeNode<'a>>(node: N, root: N) -> Option<N> {
    if let Some(parent) = node.parent() {
        return Some(parent);
    }
    let path = path_down_to(node, root)?;
    path.len().checked_sub(2).map(|i| path[i])
}

/// Returns the path from `root` down to `node`, both included.
///
/// Back-references are followed upwards until `root` is reached; if they run
/// out first, the remaining prefix is found by searching down from `root`.
/// `None` if `node` is not under `root`.
pub fn path_from_root<'a, N: TreeNode<'a>>(node: N, root: N) -> Option<Vec<N>> {
    let mut chain = vec![node];
    let mut top = node;
    while top != root {
        match top.parent() {
            Some(parent) => {
                chain.push(parent);
                top = parent;
            }
            None => break,
        }
    }

    if top != root {
        let prefix = path_down_to(top, root)?;
        chain.pop();
        chain.extend(prefix.into_iter().rev());
    }
    chain.reverse();
    Some(chain)
}
