//! Reading trees from files or standard input.

use crate::error::CliError;
use clap::ValueEnum;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use treepath_tree::Node;
use treepath_tree::manipulation::define_dynamic_properties;

/// The syntax of an input tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// A serialized `Node` tree using the `$name`/`$children`/`$value` keys.
    Json,
    /// Any XML document.
    Xml,
}

impl InputFormat {
    /// Guesses the format from a file extension, defaulting to JSON.
    pub fn detect(path: Option<&Path>) -> Self {
        let extension = path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xml") => InputFormat::Xml,
            _ => InputFormat::Json,
        }
    }
}

/// Reads the whole input, from `path` or from standard input when there is none.
pub fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => {
            log::debug!("Reading tree from {}", path.display());
            Ok(fs::read_to_string(path)?)
        }
        None => {
            log::debug!("Reading tree from standard input");
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Parses a JSON tree, optionally exposing terminal children as attributes.
pub fn parse_json_tree(text: &str, dynamic_properties: bool) -> Result<Node, CliError> {
    let mut tree: Node = serde_json::from_str(text)?;
    if dynamic_properties {
        define_dynamic_properties(&mut tree);
    }
    Ok(tree)
}
