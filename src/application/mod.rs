//! Application Layer
//!
//! Orchestrates the domain for an open project.
//! This layer:
//! - Depends on Domain layer (entities, settings, ports)
//! - Does NOT contain settings rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Components
//!
//! - `ToolchainRegistry` - Cached toolchain catalog with background refresh
//! - `ProjectSettingsStore` - Lazily loaded settings domains, commit and save
//! - `Project` - One open project wiring the two together

mod project;
pub mod settings_store;
pub mod toolchain_registry;

pub use project::Project;
pub use settings_store::{
    CommitAllError, DomainFactory, LoadWarning, ProjectDomainFactory, ProjectSettingsStore,
    StoreError,
};
pub use toolchain_registry::{RefreshEvent, RefreshHandle, ToolchainRegistry};
