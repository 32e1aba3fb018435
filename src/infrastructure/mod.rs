//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, Memory)
//! - `repositories/` - Settings document persistence
//! - `toolchain/` - Toolchain discovery on disk

pub mod fs;
pub mod repositories;
pub mod toolchain;

// Re-export for convenience
pub use fs::{LocalFs, MemoryFs};
pub use repositories::TomlSettingsRepository;
pub use toolchain::RubyInstallScanner;
