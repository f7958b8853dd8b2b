//! Preorder visiting of owned trees.

use crate::Node;

/// Visits `node` and then, if the visitor returns `true`, each of its children.
pub fn visit<F>(node: &Node, visitor: &mut F)
where
    F: FnMut(&Node) -> bool,
{
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if visitor(current) {
            stack.extend(current.children.iter().rev());
        }
    }
}

/// Mutable counterpart of [`visit`].
pub fn visit_mut<F>(node: &mut Node, visitor: &mut F)
where
    F: FnMut(&mut Node) -> bool,
{
    if visitor(node) {
        for child in node.children.iter_mut() {
            visit_mut(child, visitor);
        }
    }
}
