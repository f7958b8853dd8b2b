// src/error.rs
use thiserror::Error;
use treepath_path::PathError;

/// Everything that can go wrong between reading a tree and printing the matches.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error(transparent)]
    Path(#[from] PathError),
}
