//! Annotation and canonicalization passes over owned trees.
//!
//! These run before (or beside) evaluation; the engine itself never mutates a tree.

use crate::Node;
use crate::visitor::visit_mut;

/// Strips everything but name, children and value, so trees can be compared structurally.
pub fn strip_positional_info(node: &mut Node) -> &mut Node {
    visit_mut(node, &mut |n| {
        n.offset = None;
        n.attributes.clear();
        true
    });
    node
}

/// Fills in the value of every non-terminal that has an offset but no value with
/// the source text from its offset to the end of its last terminal token.
pub fn fill_in_empty_non_terminal_values(node: &mut Node, input: &str) {
    fill_in(node, input);
}

/// Returns the end offset of the last terminal token under `node`.
fn fill_in(node: &mut Node, input: &str) -> Option<usize> {
    if node.children.is_empty() {
        return match (node.offset, &node.value) {
            (Some(offset), Some(value)) => Some(offset + value.len()),
            _ => None,
        };
    }

    let mut end = None;
    for child in node.children.iter_mut() {
        end = end.max(fill_in(child, input));
    }

    if node.value.is_none() {
        if let (Some(start), Some(end)) = (node.offset, end) {
            node.value = input.get(start..end).map(str::to_string);
        }
    }
    end
}

/// Exposes each terminal child's value as an attribute of its parent, keyed by the
/// child's name, throughout the tree. Existing attributes are kept, and the first
/// of several same-named terminals wins.
pub fn define_dynamic_properties(node: &mut Node) {
    visit_mut(node, &mut |n| {
        let properties: Vec<(String, String)> = n
            .children
            .iter()
            .filter(|child| child.is_terminal())
            .filter_map(|child| Some((child.name.clone(), child.value.clone()?)))
            .collect();
        for (name, value) in properties {
            n.attributes.entry(name).or_insert(value);
        }
        true
    });
}
