//! Tree sources other than the owned `Node` tree.
pub mod xml;

pub use xml::{XmlDocument, XmlNode};
