pub mod fixtures;

use treepath::TreeNode;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Collects the labels of a node sequence.
pub fn names<'a, N: TreeNode<'a>>(nodes: &[N]) -> Vec<&'a str> {
    nodes.iter().map(|n| n.name()).collect()
}
