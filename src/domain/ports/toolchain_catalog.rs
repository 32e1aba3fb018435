//! ToolchainCatalog port - read side of the toolchain registry
//!
//! Settings domains hold toolchain ids, not versions. They resolve them
//! through this trait whenever they validate or render.

use std::sync::Arc;

use crate::domain::entities::CatalogSnapshot;
use crate::domain::value_objects::{Resolution, ToolchainId};

pub trait ToolchainCatalog: Send + Sync {
    /// The current catalog. Never a partially updated one.
    fn snapshot(&self) -> Arc<CatalogSnapshot>;

    fn resolve(&self, id: &ToolchainId) -> Resolution {
        match self.snapshot().find(id) {
            Some(version) => Resolution::Resolved(version.clone()),
            None => Resolution::Unresolved(id.clone()),
        }
    }
}
