//! Error types for Rubicon
//!
//! Each layer has its own `thiserror` enum; `RubiconError` aggregates them for
//! callers that open projects and load configuration.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::{CommitAllError, StoreError};
use crate::domain::entities::PathListError;
use crate::domain::ports::{RepositoryError, ScanError};
use crate::domain::settings::ValidationFailed;

/// Result type alias for Rubicon operations
pub type RubiconResult<T> = Result<T, RubiconError>;

/// Main error type for Rubicon operations
#[derive(Error, Debug)]
pub enum RubiconError {
    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Project root is missing or not a directory
    #[error("project directory not found: {path}")]
    ProjectNotFound { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    CommitAll(#[from] CommitAllError),

    #[error(transparent)]
    Validation(#[from] ValidationFailed),

    #[error(transparent)]
    PathList(#[from] PathListError),

    #[error(transparent)]
    Scan(#[from] ScanError),
}
