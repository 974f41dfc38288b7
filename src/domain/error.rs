// src/domain/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Error decoding JSON from the file: {}", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("An error occurred: {0:#}")]
    Unexpected(#[from] anyhow::Error),
}

impl ExtractError {
    /// Stable, machine-readable name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::NotFound(_) => "not_found",
            ExtractError::MalformedInput { .. } => "malformed_input",
            ExtractError::Unexpected(_) => "unexpected",
        }
    }
}
