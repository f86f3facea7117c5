//! Error types for source extraction.

use std::path::PathBuf;

use thiserror::Error;
use valforge_model::ModelError;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    /// Source text handed in directly failed to parse.
    #[error("failed to parse Rust source: {0}")]
    Syntax(#[from] syn::Error),

    #[error("no Rust source files found in {path}")]
    NoSourceFiles { path: PathBuf },

    #[error("invalid #[{attribute}] on {record}.{field}: {message}")]
    Attribute {
        record: String,
        field: String,
        attribute: &'static str,
        message: String,
    },

    /// Generated `impl` blocks cannot name a generic record.
    #[error("record '{record}' has generic parameters and cannot be validated")]
    GenericRecord { record: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
