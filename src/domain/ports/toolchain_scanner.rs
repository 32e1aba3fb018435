//! ToolchainScanner port - discovery of installed runtimes
//!
//! The registry owns caching and ordering; a scanner only reports what it
//! finds on disk, in any order.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::value_objects::ToolchainVersion;

/// Cooperative cancellation flag shared between the control thread and a
/// background scan.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to scan toolchain root {}: {source}", root.display())]
    Io {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("toolchain scan cancelled")]
    Cancelled,
}

pub trait ToolchainScanner: Send + Sync {
    /// Scan installation roots. Implementations should check `cancel` between
    /// units of work and return `ScanError::Cancelled` once it is set.
    fn scan(&self, cancel: &CancelToken) -> Result<Vec<ToolchainVersion>, ScanError>;
}
