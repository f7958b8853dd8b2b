//! Defines the registry of named function predicates (`[?name]`).

use crate::engine::EvaluationContext;
use std::collections::HashMap;
use std::fmt;
use treepath_tree::TreeNode;

/// A function predicate: called with the candidate node, the full set of
/// candidates of the current step, and the evaluation context (which gives access
/// to the tree root, the registry and recursive evaluation).
pub type PredicateFunction<N> = Box<dyn Fn(N, &[N], &EvaluationContext<'_, N>) -> bool>;

/// A mapping from function name to predicate function, supplied per evaluation.
pub struct FunctionRegistry<N> {
    functions: HashMap<String, PredicateFunction<N>>,
}

impl<N> FunctionRegistry<N> {
    /// Creates a new, empty function registry.
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Registers a function, replacing any existing function with the same name.
    pub fn register<F>(&mut self, name: &str, function: F)
    where
        F: Fn(N, &[N], &EvaluationContext<'_, N>) -> bool + 'static,
    {
        self.functions.insert(name.to_string(), Box::new(function));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, name: &str, function: F) -> Self
    where
        F: Fn(N, &[N], &EvaluationContext<'_, N>) -> bool + 'static,
    {
        self.register(name, function);
        self
    }

    pub fn get(&self, name: &str) -> Option<&PredicateFunction<N>> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<'a, N: TreeNode<'a>> FunctionRegistry<N> {
    /// Creates a registry populated with the built-in functions:
    ///
    /// - `terminal`: the candidate has a value and no children.
    /// - `last`: the candidate is the last of its step's candidates.
    pub fn with_builtins() -> Self {
        Self::new()
            .with("terminal", |node, _, _| node.is_terminal())
            .with("last", |node, candidates, _| candidates.last() == Some(&node))
    }
}

impl<N> Default for FunctionRegistry<N> {
    /// An empty registry; expressions using `[?name]` fail validation against it.
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for FunctionRegistry<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}
