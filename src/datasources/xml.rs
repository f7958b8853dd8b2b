// XML datasource implementation using roxmltree
use roxmltree::Node;
use std::hash::{Hash, Hasher};
use treepath_tree::TreeNode;

/// Wrapper around roxmltree::Document providing a queryable tree.
pub struct XmlDocument<'input> {
    doc: roxmltree::Document<'input>,
}

impl<'input> XmlDocument<'input> {
    pub fn parse(text: &'input str) -> Result<Self, roxmltree::Error> {
        let doc = roxmltree::Document::parse(text)?;
        Ok(Self { doc })
    }

    /// The document node, named `#document`. Its only child is the root element,
    /// so `/catalog/book` selects `book` elements under a `catalog` root element.
    pub fn root_node(&self) -> XmlNode<'_, 'input> {
        XmlNode(self.doc.root())
    }
}

/// An element, a text node or the document node.
///
/// Comments, processing instructions and whitespace-only text are not part of
/// the tree. An element whose only content is text has no children; the text
/// is its value.
#[derive(Debug, Clone, Copy)]
pub struct XmlNode<'a, 'input>(Node<'a, 'input>);

impl<'a, 'input> XmlNode<'a, 'input> {
    pub fn inner(&self) -> Node<'a, 'input> {
        self.0
    }
}

fn is_significant_text(node: &Node<'_, '_>) -> bool {
    node.is_text() && node.text().is_some_and(|text| !text.trim().is_empty())
}

fn is_text_only(node: &Node<'_, '_>) -> bool {
    node.is_element()
        && !node.children().any(|child| child.is_element())
        && node.children().any(|child| is_significant_text(&child))
}

impl PartialEq for XmlNode<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.id() == other.0.id()
    }
}

impl Eq for XmlNode<'_, '_> {}

impl Hash for XmlNode<'_, '_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id().hash(state);
    }
}

impl<'a> TreeNode<'a> for XmlNode<'a, 'a> {
    fn name(&self) -> &'a str {
        let node = self.0;
        if node.is_root() {
            "#document"
        } else if node.is_text() {
            "#text"
        } else {
            node.tag_name().name()
        }
    }

    fn value(&self) -> Option<&'a str> {
        let node = self.0;
        if node.is_text() {
            node.text()
        } else if is_text_only(&node) {
            node.children()
                .find(is_significant_text)
                .and_then(|child| child.text())
        } else {
            None
        }
    }

    fn offset(&self) -> Option<usize> {
        Some(self.0.range().start)
    }

    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        let node = self.0;
        if is_text_only(&node) {
            return Box::new(std::iter::empty());
        }
        Box::new(
            node.children()
                .filter(|child| child.is_element() || is_significant_text(child))
                .map(XmlNode),
        )
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent().map(XmlNode)
    }

    fn attribute(&self, name: &str) -> Option<&'a str> {
        self.0.attribute(name)
    }
}
