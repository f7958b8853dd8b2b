//! Rendering query results for the command line.

use crate::error::CliError;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;
use treepath_path::{FunctionRegistry, PathExpression, evaluate};
use treepath_tree::TreeNode;

/// What to print for the matched nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// One JSON record per match.
    #[default]
    Nodes,
    /// The value of each match that has one, one per line.
    Values,
    /// The single match as a JSON record, or `null` if there are zero or several.
    Scalar,
    /// The number of matches.
    Count,
}

/// A matched node as printed by the command-line tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl<'a> MatchRecord<'a> {
    pub fn of<N: TreeNode<'a>>(node: N) -> Self {
        Self {
            name: node.name(),
            value: node.value(),
            offset: node.offset(),
        }
    }
}

/// Evaluates `expression` against `root` and writes the results in `mode`.
/// Returns the number of matched nodes.
pub fn write_results<'a, N, W>(
    out: &mut W,
    mode: OutputMode,
    root: N,
    expression: &PathExpression,
    functions: &FunctionRegistry<N>,
) -> Result<usize, CliError>
where
    N: TreeNode<'a>,
    W: Write,
{
    let nodes = evaluate(root, expression, functions)?;
    log::debug!("'{}' matched {} node(s)", expression, nodes.len());

    match mode {
        OutputMode::Nodes => {
            for node in &nodes {
                serde_json::to_writer(&mut *out, &MatchRecord::of(*node))?;
                writeln!(out)?;
            }
        }
        OutputMode::Values => {
            for value in nodes.iter().filter_map(|node| node.value()) {
                writeln!(out, "{}", value)?;
            }
        }
        OutputMode::Scalar => {
            let record = match nodes.as_slice() {
                [node] => Some(MatchRecord::of(*node)),
                _ => None,
            };
            serde_json::to_writer(&mut *out, &record)?;
            writeln!(out)?;
        }
        OutputMode::Count => writeln!(out, "{}", nodes.len())?,
    }
    Ok(nodes.len())
}
