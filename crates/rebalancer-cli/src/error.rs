//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Request entries that match nothing in the holdings (with `--strict`).
    #[error("Allocation request names entries absent from the holdings: {}", .0.join(", "))]
    UnknownEntities(Vec<String>),

    /// Configuration failed validation.
    #[error("Configuration has {0} validation error(s)")]
    InvalidConfig(usize),

    /// Output file already exists.
    #[error("Refusing to overwrite existing file: {} (use --force)", .0.display())]
    FileExists(PathBuf),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
