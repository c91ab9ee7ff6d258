// src/core/error.rs

use crate::system::executor::ExecutionError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the secrets workflow. Every variant is terminal for the current command.
#[derive(Error, Debug)]
pub enum SecretsError {
    #[error("Could not find alias '{alias}' in the alias listing.")]
    UnknownAlias { alias: String },
    #[error("Alias '{alias}' cannot be split into a site and an environment (expected '<site>.<env>').")]
    MalformedAlias { alias: String },
    #[error("Alias '{alias}' has no '{field}' defined, cannot connect to it.")]
    MissingConnection { alias: String, field: &'static str },
    #[error("File '{}' not found. {hint}", path.display())]
    MissingFile { path: PathBuf, hint: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Could not read the alias listing: {0}")]
    AliasListing(#[from] serde_json::Error),
    #[error(transparent)]
    External(#[from] ExecutionError),
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SecretsResult<T> = Result<T, SecretsError>;
