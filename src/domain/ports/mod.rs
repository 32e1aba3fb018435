//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure and application layers provide concrete implementations.

pub mod file_system;
pub mod settings_repository;
pub mod toolchain_catalog;
pub mod toolchain_scanner;

pub use file_system::FileSystem;
pub use settings_repository::{RepositoryError, SettingsRepository};
pub use toolchain_catalog::ToolchainCatalog;
pub use toolchain_scanner::{CancelToken, ScanError, ToolchainScanner};
