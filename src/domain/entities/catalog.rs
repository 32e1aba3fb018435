//! Toolchain catalog snapshot
//!
//! A snapshot is immutable once built. The registry publishes a new snapshot
//! to change anything, so a reader holding one never sees a partial update.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_objects::{ToolchainId, ToolchainVersion};

/// Freshness of the cached catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheState {
    /// No scan has completed yet
    Empty,
    /// A scan is in flight; the versions are those of the previous snapshot
    Loading,
    /// The last scan succeeded
    Ready,
    /// The last scan failed; the versions are from an earlier scan
    Stale,
}

#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    versions: Arc<[ToolchainVersion]>,
    state: CacheState,
    refreshed_at: Option<DateTime<Utc>>,
}

impl CatalogSnapshot {
    pub fn empty() -> Self {
        Self {
            versions: Arc::from(Vec::new()),
            state: CacheState::Empty,
            refreshed_at: None,
        }
    }

    /// Build a `Ready` snapshot from scan output in any order.
    ///
    /// Sorted by version, ties by install path; when an id appears twice the
    /// first one in that order wins.
    pub fn from_scan(mut versions: Vec<ToolchainVersion>) -> Self {
        versions.sort_by(|a, b| a.catalog_cmp(b));
        let mut seen = std::collections::HashSet::new();
        versions.retain(|v| seen.insert(v.id().clone()));

        Self {
            versions: Arc::from(versions),
            state: CacheState::Ready,
            refreshed_at: Some(Utc::now()),
        }
    }

    /// Same versions, different state. The version list is shared, not copied.
    pub fn with_state(&self, state: CacheState) -> Self {
        Self {
            versions: Arc::clone(&self.versions),
            state,
            refreshed_at: self.refreshed_at,
        }
    }

    pub fn versions(&self) -> &[ToolchainVersion] {
        &self.versions
    }

    pub fn state(&self) -> CacheState {
        self.state
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn find(&self, id: &ToolchainId) -> Option<&ToolchainVersion> {
        self.versions.iter().find(|v| v.id() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ToolchainId> {
        self.versions.iter().map(ToolchainVersion::id)
    }

    /// Whether both snapshots hold the very same version list.
    pub fn shares_versions_with(&self, other: &CatalogSnapshot) -> bool {
        Arc::ptr_eq(&self.versions, &other.versions)
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
