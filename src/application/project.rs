//! Project aggregate
//!
//! One open project: its settings store, the toolchain registry its
//! compilation settings resolve against, and any refresh in flight.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::config::RubiconConfig;
use crate::domain::ports::{FileSystem, SettingsRepository, ToolchainScanner};
use crate::domain::value_objects::{ProjectId, ReservedNames};
use crate::error::{RubiconError, RubiconResult};
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::repositories::TomlSettingsRepository;
use crate::infrastructure::toolchain::RubyInstallScanner;

use super::settings_store::{ProjectDomainFactory, ProjectSettingsStore};
use super::toolchain_registry::{RefreshEvent, RefreshHandle, ToolchainRegistry};

#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    id: ProjectId,
    registry: Arc<ToolchainRegistry>,
    store: ProjectSettingsStore,
    refresh: Option<RefreshHandle>,
}

impl Project {
    /// Open the project rooted at `root` with on-disk storage and scanning.
    pub fn open(root: impl AsRef<Path>, config: &RubiconConfig) -> RubiconResult<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(RubiconError::ProjectNotFound {
                path: root.to_path_buf(),
            });
        }
        let root = root.canonicalize()?;

        let scanner: Arc<dyn ToolchainScanner> = Arc::new(RubyInstallScanner::from_config(config));
        let repository = Arc::new(TomlSettingsRepository::for_project(
            &root,
            &config.project.settings_file,
        ));

        Ok(Self::from_parts(
            root,
            Arc::new(ToolchainRegistry::new(scanner)),
            repository,
            Arc::new(LocalFs::new()),
            config.reserved_names(),
        ))
    }

    /// Assemble a project from explicit collaborators.
    pub fn from_parts(
        root: impl Into<PathBuf>,
        registry: Arc<ToolchainRegistry>,
        repository: Arc<dyn SettingsRepository>,
        fs: Arc<dyn FileSystem>,
        reserved: ReservedNames,
    ) -> Self {
        let root = root.into();
        let factory = ProjectDomainFactory::new(registry.clone(), fs, root.clone())
            .with_reserved_names(reserved);
        let store = ProjectSettingsStore::new(repository, Box::new(factory));

        debug!(root = %root.display(), "project opened");
        Self {
            id: ProjectId::from_root(&root),
            root,
            registry,
            store,
            refresh: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn store(&self) -> &ProjectSettingsStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProjectSettingsStore {
        &mut self.store
    }

    pub fn registry(&self) -> &Arc<ToolchainRegistry> {
        &self.registry
    }

    /// Scan for toolchains on the calling thread.
    pub fn refresh_toolchains(&mut self) -> RefreshEvent {
        self.cancel_refresh();
        self.registry.refresh()
    }

    /// Start a background scan, replacing any scan already running.
    pub fn start_toolchain_refresh(&mut self) {
        self.cancel_refresh();
        self.refresh = Some(self.registry.spawn_refresh());
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_some()
    }

    /// Non-blocking check for the background scan's outcome.
    pub fn poll_toolchain_events(&mut self) -> Option<RefreshEvent> {
        let event = self.refresh.as_mut()?.try_event()?;
        self.refresh = None;
        Some(event)
    }

    /// Block until the background scan reports, if one is running.
    pub fn wait_for_toolchains(&mut self) -> Option<RefreshEvent> {
        self.refresh.take().map(RefreshHandle::wait)
    }

    /// Close the project, abandoning any scan in flight.
    pub fn close(mut self) {
        self.cancel_refresh();
    }

    fn cancel_refresh(&mut self) {
        if let Some(handle) = self.refresh.take() {
            debug!("cancelling toolchain refresh");
            handle.cancel();
        }
    }
}

impl Drop for Project {
    fn drop(&mut self) {
        self.cancel_refresh();
    }
}
