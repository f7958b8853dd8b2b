//! Defines the core abstraction for a navigable, read-only labeled tree.
use std::fmt::Debug;
use std::hash::Hash;

/// The universal contract for a node in a labeled tree.
///
/// Path expressions are evaluated exclusively against this trait, so any tree
/// (an owned [`Node`](crate::Node) tree, an XML document, a parser's output)
/// can be queried once it provides a cheap, copyable handle implementing it.
///
/// Equality and hashing must be **identity** based: two distinct nodes with the
/// same label and value are different nodes.
///
/// `'a` is the lifetime of the underlying tree.
pub trait TreeNode<'a>: Debug + Clone + Copy + PartialEq + Eq + Hash {
    /// The node's label, tested by name tests such as `foo` in `/foo`.
    fn name(&self) -> &'a str;

    /// The node's own text value. Always present on terminals; may be absent
    /// on non-terminals.
    fn value(&self) -> Option<&'a str>;

    /// Offset of the node within its source text, if known.
    fn offset(&self) -> Option<usize>;

    /// An iterator over the child nodes of this node, in order.
    /// The iterator is empty for leaf nodes.
    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a>;

    /// The cached back-reference to the parent node, if this tree provides one.
    ///
    /// Returning `None` does not mean the node is a root: navigation then derives
    /// the parent by searching down from the evaluation root.
    fn parent(&self) -> Option<Self>;

    /// A generic string attribute of the node.
    fn attribute(&self, name: &str) -> Option<&'a str>;

    /// Looks up an attribute by name, with `value` (or `$value`) aliasing the
    /// node's own text value and `$name` its label.
    fn try_get_attribute(&self, name: &str) -> Option<&'a str> {
        match name {
            "value" | "$value" => self.value(),
            "$name" => Some(self.name()),
            _ => self.attribute(name),
        }
    }

    /// True if the node has a value and no children.
    fn is_terminal(&self) -> bool {
        self.value().is_some() && self.children().next().is_none()
    }
}
