//! TOML Settings Repository
//!
//! Persists a project's settings document at `<project>/.rubicon/settings.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::entities::SettingsDocument;
use crate::domain::ports::{RepositoryError, SettingsRepository};
use crate::infrastructure::fs::atomic_write;

/// Settings file location relative to the project root, unless configured.
pub const DEFAULT_SETTINGS_FILE: &str = ".rubicon/settings.toml";

#[derive(Debug, Clone)]
pub struct TomlSettingsRepository {
    path: PathBuf,
}

impl TomlSettingsRepository {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository for `settings_file` under `root`. An absolute
    /// `settings_file` is used as is.
    pub fn for_project(root: &Path, settings_file: &Path) -> Self {
        Self::with_path(root.join(settings_file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn load_from_disk(&self) -> Result<Option<SettingsDocument>, RepositoryError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RepositoryError::AccessError {
                    message: e.to_string(),
                })
            }
        };

        let table: toml::Table =
            toml::from_str(&content).map_err(|e| RepositoryError::Corrupted {
                path: self.path.clone(),
                message: e.message().to_string(),
            })?;

        Ok(Some(SettingsDocument::from_table(table)))
    }

    fn save_to_disk(&self, document: &SettingsDocument) -> Result<(), RepositoryError> {
        let content = toml::to_string_pretty(document.as_table()).map_err(|e| {
            RepositoryError::SerializationError {
                message: e.to_string(),
            }
        })?;

        atomic_write(&self.path, content.as_bytes()).map_err(|e| RepositoryError::AccessError {
            message: e.to_string(),
        })
    }
}

impl SettingsRepository for TomlSettingsRepository {
    fn load(&self) -> Result<Option<SettingsDocument>, RepositoryError> {
        self.load_from_disk()
    }

    fn save(&self, document: &SettingsDocument) -> Result<(), RepositoryError> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| RepositoryError::AccessError {
                message: e.to_string(),
            })?;
        }

        let lock_file = fs::File::create(&lock_path).map_err(|e| RepositoryError::AccessError {
            message: e.to_string(),
        })?;
        lock_file
            .lock_exclusive()
            .map_err(|e| RepositoryError::AccessError {
                message: e.to_string(),
            })?;

        let result = self.save_to_disk(document);

        let _ = lock_file.unlock();
        result
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
