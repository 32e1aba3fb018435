//! Stable project identifier.

use std::fmt;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Identifies a project across editor sessions.
///
/// Derived from the project root path, so reopening the same directory yields
/// the same id. Callers should pass a canonicalized root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn from_root(root: &Path) -> Self {
        let normalized = root.to_string_lossy().replace('\\', "/");
        let digest = Sha256::digest(normalized.as_bytes());
        let hex = format!("{:x}", digest);
        Self(hex[..16].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
