//! An owned, serde-friendly tree and the identity handles used to query it.

use crate::node::TreeNode;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;

/// An owned tree node.
///
/// Serializes with the `$name`, `$children`, `$value` and `$offset` keys; any
/// other string-valued key holds an attribute. Extra keys with non-string values
/// are skipped when deserializing. The owned tree carries no parent edges, so
/// serializing it can never recurse forever.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "$name")]
    pub name: String,

    #[serde(rename = "$children", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    #[serde(rename = "$value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(rename = "$offset", default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,

    #[serde(flatten, deserialize_with = "string_attributes")]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExtraKey {
    Text(String),
    Other(IgnoredAny),
}

fn string_attributes<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let extras = BTreeMap::<String, ExtraKey>::deserialize(deserializer)?;
    Ok(extras
        .into_iter()
        .filter_map(|(key, extra)| match extra {
            ExtraKey::Text(text) => Some((key, text)),
            ExtraKey::Other(_) => None,
        })
        .collect())
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a terminal node: a label with a value and no children.
    pub fn terminal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name).with_value(value)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// True if the node has a value and no children.
    pub fn is_terminal(&self) -> bool {
        self.value.is_some() && self.children.is_empty()
    }
}

/// Identity of an owned node: its address, stable for as long as it is borrowed.
fn address(node: &Node) -> usize {
    node as *const Node as usize
}

/// A node-identity to parent map, built once from a root.
///
/// Handles obtained through the index answer [`TreeNode::parent`] directly, which
/// keeps parent, sibling and ancestor navigation from searching the whole tree.
#[derive(Debug)]
pub struct ParentIndex<'a> {
    root: &'a Node,
    parents: HashMap<usize, &'a Node>,
}

impl<'a> ParentIndex<'a> {
    pub fn build(root: &'a Node) -> Self {
        let mut parents = HashMap::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            for child in &node.children {
                parents.insert(address(child), node);
                stack.push(child);
            }
        }
        Self { root, parents }
    }

    /// A handle on the indexed root.
    pub fn root(&'a self) -> NodeRef<'a> {
        self.get(self.root)
    }

    /// A handle on any node of the indexed tree.
    pub fn get(&'a self, node: &'a Node) -> NodeRef<'a> {
        NodeRef {
            node,
            index: Some(self),
        }
    }

    pub fn parent_of(&self, node: &Node) -> Option<&'a Node> {
        self.parents.get(&address(node)).copied()
    }
}

/// A copyable handle on a borrowed [`Node`], compared by identity.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    node: &'a Node,
    index: Option<&'a ParentIndex<'a>>,
}

impl<'a> NodeRef<'a> {
    /// A handle without back-references; parents are found by searching from the root.
    pub fn new(node: &'a Node) -> Self {
        Self { node, index: None }
    }

    /// The borrowed node this handle points at.
    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn has_parent_index(&self) -> bool {
        self.index.is_some()
    }
}

impl<'a> From<&'a Node> for NodeRef<'a> {
    fn from(node: &'a Node) -> Self {
        Self::new(node)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.node, other.node)
    }
}

impl Eq for NodeRef<'_> {}

impl Hash for NodeRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        address(self.node).hash(state);
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node.value {
            Some(value) => write!(f, "{}({:?})", self.node.name, value),
            None => write!(f, "{}", self.node.name),
        }
    }
}

impl<'a> TreeNode<'a> for NodeRef<'a> {
    fn name(&self) -> &'a str {
        &self.node.name
    }

    fn value(&self) -> Option<&'a str> {
        self.node.value.as_deref()
    }

    fn offset(&self) -> Option<usize> {
        self.node.offset
    }

    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        let index = self.index;
        Box::new(
            self.node
                .children
                .iter()
                .map(move |node| NodeRef { node, index }),
        )
    }

    fn parent(&self) -> Option<Self> {
        let index = self.index?;
        index
            .parent_of(self.node)
            .map(|node| NodeRef { node, index: Some(index) })
    }

    fn attribute(&self, name: &str) -> Option<&'a str> {
        self.node.attributes.get(name).map(String::as_str)
    }
}
