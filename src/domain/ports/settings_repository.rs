//! SettingsRepository port
//!
//! Persists a project's settings document. The domain only sees the decoded
//! document; the on-disk format is an infrastructure concern.

use std::path::{Path, PathBuf};

use crate::domain::entities::SettingsDocument;

pub trait SettingsRepository: Send + Sync {
    /// Load the document. A missing file is not an error: it yields `None`.
    fn load(&self) -> Result<Option<SettingsDocument>, RepositoryError>;

    fn save(&self, document: &SettingsDocument) -> Result<(), RepositoryError>;

    /// Where the document lives, for messages.
    fn location(&self) -> &Path;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Failed to access settings file: {message}")]
    AccessError { message: String },

    #[error("Failed to serialize settings: {message}")]
    SerializationError { message: String },

    #[error(
        "settings file corrupted: {}\n  → Fix: correct the file by hand or delete it to start from defaults\n  → Details: {message}",
        path.display()
    )]
    Corrupted { path: PathBuf, message: String },
}
