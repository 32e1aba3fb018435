//! Configuration module for Rubicon
//!
//! Configuration hierarchy:
//! 1. Environment variables (RUBICON_*) (highest priority)
//! 2. User config (`$XDG_CONFIG_HOME/rubicon/config.toml`)
//! 3. Built-in defaults (lowest priority)
//!
//! Project settings themselves live in the per-project settings document,
//! not here.

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{
    discover, user_config_path, ENV_RESERVED_NAMES, ENV_SETTINGS_FILE, ENV_TOOLCHAIN_ROOTS,
};
pub use types::{OutputConfig, ProjectConfig, RubiconConfig, ToolchainsConfig};
