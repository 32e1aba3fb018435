//! In-memory file system
//!
//! Tracks a set of existing paths. Clones share state, so a test can hand one
//! clone to the code under test and mutate the other.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::ports::file_system::FileSystem;

#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    paths: Arc<Mutex<BTreeSet<PathBuf>>>,
    home: PathBuf,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self {
            paths: Arc::default(),
            home: PathBuf::from("/mock/home"),
        }
    }

    pub fn with_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let fs = Self::new();
        for path in paths {
            fs.add_path(path);
        }
        fs
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = home.into();
        self
    }

    pub fn add_path(&self, path: impl Into<PathBuf>) {
        self.lock().insert(path.into());
    }

    pub fn remove_path(&self, path: impl AsRef<Path>) {
        self.lock().remove(path.as_ref());
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<PathBuf>> {
        self.paths.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileSystem for MemoryFs {
    /// A path exists when it was added, or when it is an ancestor of one that
    /// was.
    fn exists(&self, path: &Path) -> bool {
        self.lock()
            .iter()
            .any(|known| known.as_path() == path || known.starts_with(path))
    }

    fn expand_home(&self, path: &Path) -> PathBuf {
        let p = path.to_string_lossy();
        if p == "~" {
            self.home.clone()
        } else if let Some(rest) = p.strip_prefix("~/") {
            self.home.join(rest)
        } else {
            path.to_path_buf()
        }
    }
}
