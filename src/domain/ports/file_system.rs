//! FileSystem port - the path queries the domain needs
//!
//! Search path existence checks and `~` expansion go through this trait so
//! the settings domains can be exercised against an in-memory tree. Reading
//! and writing the settings document is the repository's concern.

use std::path::{Path, PathBuf};

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - the real disk
/// - `MemoryFs` - in-memory set of existing paths
pub trait FileSystem: Send + Sync {
    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Expand a leading `~` to the home directory
    fn expand_home(&self, path: &Path) -> PathBuf;
}
