//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod settings;

pub use settings::{TomlSettingsRepository, DEFAULT_SETTINGS_FILE};
