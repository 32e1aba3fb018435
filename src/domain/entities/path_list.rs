//! PathList entity - ordered, deduplicated search paths
//!
//! Order is search precedence and is never changed implicitly. Entries that
//! do not exist on disk are flagged, not removed: the user may be pointing at
//! a directory the build has not created yet.

use std::path::{Component, Path, PathBuf};

use crate::domain::ports::FileSystem;

/// Whether path comparison ignores case on this host.
const CASE_INSENSITIVE_HOST: bool = cfg!(any(windows, target_os = "macos"));

/// Key used for duplicate detection. Raw strings are never rewritten.
pub(crate) fn comparison_key(raw: &str) -> String {
    let normalized: PathBuf = Path::new(raw.trim())
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let mut key = normalized.to_string_lossy().replace('\\', "/");
    if key.is_empty() {
        key.push('.');
    }
    if CASE_INSENSITIVE_HOST {
        key.to_lowercase()
    } else {
        key
    }
}

/// One row of the search path table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    raw_path: String,
    resolved: bool,
    exists_on_disk: bool,
}

impl PathEntry {
    fn unchecked(raw_path: String) -> Self {
        Self {
            raw_path,
            resolved: false,
            exists_on_disk: false,
        }
    }

    /// The path exactly as the user entered it.
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    /// Whether the raw path could be turned into an absolute location.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Result of the last existence check (add time or `refresh_existence`).
    pub fn exists_on_disk(&self) -> bool {
        self.exists_on_disk
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathListError {
    #[error("path is empty")]
    EmptyPath,

    #[error("'{path}' is already in the list at position {existing}")]
    DuplicateEntry { path: String, existing: usize },

    #[error("index {index} is out of range for a list of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Ordered collection of search path entries.
///
/// Two lists are equal when their raw path sequences are equal; the
/// `resolved`/`exists_on_disk` flags are derived state.
#[derive(Debug, Clone, Default)]
pub struct PathList {
    entries: Vec<PathEntry>,
    base_dir: Option<PathBuf>,
}

impl PartialEq for PathList {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| a.raw_path == b.raw_path)
    }
}

impl Eq for PathList {}

impl PathList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative entries are resolved against `base_dir` (usually the project root).
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Existence flags are not re-checked; call `refresh_existence`.
    pub fn set_base_dir(&mut self, base_dir: Option<PathBuf>) {
        self.base_dir = base_dir;
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&PathEntry> {
        self.entries.get(index)
    }

    /// Position of an entry equal to `raw` under normalized comparison.
    pub fn position(&self, raw: &str) -> Option<usize> {
        let key = comparison_key(raw);
        self.entries
            .iter()
            .position(|e| comparison_key(&e.raw_path) == key)
    }

    /// Entries whose last existence check failed.
    pub fn missing(&self) -> impl Iterator<Item = (usize, &PathEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.exists_on_disk)
    }

    /// Absolute location of `raw`, if it can be determined.
    pub fn resolve(&self, raw: &str, fs: &dyn FileSystem) -> Option<PathBuf> {
        let expanded = fs.expand_home(Path::new(raw.trim()));
        if expanded.is_absolute() {
            return Some(expanded);
        }
        if expanded.starts_with("~") {
            return None;
        }
        self.base_dir.as_ref().map(|base| base.join(expanded))
    }

    fn check(&self, entry: &mut PathEntry, fs: &dyn FileSystem) {
        match self.resolve(&entry.raw_path, fs) {
            Some(location) => {
                entry.resolved = true;
                entry.exists_on_disk = fs.exists(&location);
            }
            None => {
                entry.resolved = false;
                entry.exists_on_disk = false;
            }
        }
    }

    /// Append `raw` at the end, checking existence now.
    pub fn add(
        &mut self,
        raw: impl Into<String>,
        fs: &dyn FileSystem,
    ) -> Result<(), PathListError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(PathListError::EmptyPath);
        }
        if let Some(existing) = self.position(&raw) {
            return Err(PathListError::DuplicateEntry {
                path: raw,
                existing,
            });
        }

        let mut entry = PathEntry::unchecked(raw);
        self.check(&mut entry, fs);
        self.entries.push(entry);
        Ok(())
    }

    /// Remove the entry at `index`; the rest keep their relative order.
    pub fn remove(&mut self, index: usize) -> Result<PathEntry, PathListError> {
        if index >= self.entries.len() {
            return Err(PathListError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Move the entry at `from` so that it ends up at `to`.
    ///
    /// Rotates the affected sub-slice in place; no entry is ever absent or
    /// present twice during the move.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<(), PathListError> {
        let len = self.entries.len();
        for index in [from, to] {
            if index >= len {
                return Err(PathListError::IndexOutOfRange { index, len });
            }
        }
        if from < to {
            self.entries[from..=to].rotate_left(1);
        } else if to < from {
            self.entries[to..=from].rotate_right(1);
        }
        Ok(())
    }

    /// Re-check every entry against the file system. Returns how many
    /// `exists_on_disk` flags changed. Never removes entries.
    pub fn refresh_existence(&mut self, fs: &dyn FileSystem) -> usize {
        let mut entries = std::mem::take(&mut self.entries);
        let mut changed = 0;
        for entry in &mut entries {
            let before = entry.exists_on_disk;
            self.check(entry, fs);
            if entry.exists_on_disk != before {
                changed += 1;
            }
        }
        self.entries = entries;
        changed
    }

    /// Raw strings in order, exactly as entered.
    pub fn to_serializable(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.raw_path.clone()).collect()
    }

    /// Rebuild a list from persisted raw strings.
    ///
    /// Blank strings and duplicates (a hand-edited file) are dropped, keeping
    /// the first occurrence; the dropped strings are returned. Existence flags
    /// start unchecked until `refresh_existence` runs.
    pub fn from_serializable<I, S>(items: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        let mut dropped = Vec::new();
        for raw in items.into_iter().map(Into::into) {
            if raw.trim().is_empty() || list.position(&raw).is_some() {
                dropped.push(raw);
                continue;
            }
            list.entries.push(PathEntry::unchecked(raw));
        }
        (list, dropped)
    }
}
