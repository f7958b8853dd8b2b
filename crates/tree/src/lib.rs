pub mod manipulation;
pub mod navigation;
pub mod node;
pub mod tree;
pub mod visitor;

pub use navigation::{parent_of, path_down_to, path_from_root};
pub use node::TreeNode;
pub use tree::{Node, NodeRef, ParentIndex};
pub use visitor::{visit, visit_mut};
