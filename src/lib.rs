//! Rubicon - project settings engine for Ruby IDEs
//!
//! Rubicon keeps a project's compilation and run settings: which Ruby
//! toolchain to build with, the ordered search paths, the output file name,
//! and what to execute. Edits are held in memory, validated, committed
//! all-or-nothing and saved to a TOML document inside the project.
//!
//! ```no_run
//! use rubicon::{CompilationSettings, Project, RubiconConfig};
//!
//! # fn main() -> rubicon::RubiconResult<()> {
//! let mut project = Project::open(".", &RubiconConfig::load_or_default())?;
//! project.refresh_toolchains();
//!
//! let compilation = project.store_mut().domain::<CompilationSettings>()?;
//! compilation.add_search_path("lib")?;
//! compilation.set_output_file_name("app");
//! project.store_mut().commit_and_save()?;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

// Re-exports for convenience
pub use application::{
    LoadWarning, Project, ProjectSettingsStore, RefreshEvent, StoreError, ToolchainRegistry,
};
pub use config::RubiconConfig;
pub use domain::entities::{CacheState, PathList, PathListError};
pub use domain::settings::{CompilationSettings, RunSettings, SettingsDomain};
pub use domain::value_objects::{SettingsKind, Severity, ToolchainId, ValidationIssue};
pub use error::{RubiconError, RubiconResult};
