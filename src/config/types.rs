//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ReservedNames;
use crate::error::RubiconResult;

use super::loader::{self, ConfigWarning};

/// Where toolchains are discovered
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ToolchainsConfig {
    /// Installation roots to scan. Empty means the version-manager defaults.
    #[serde(default)]
    pub roots: Vec<PathBuf>,
}

/// Output naming rules
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Names rejected in addition to the platform-reserved ones
    #[serde(default)]
    pub reserved_names: Vec<String>,
}

/// Per-project storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Settings document path, relative to the project root
    #[serde(default = "default_settings_file")]
    pub settings_file: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            settings_file: default_settings_file(),
        }
    }
}

fn default_settings_file() -> PathBuf {
    PathBuf::from(crate::infrastructure::repositories::DEFAULT_SETTINGS_FILE)
}

/// Complete Rubicon configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RubiconConfig {
    #[serde(default)]
    pub toolchains: ToolchainsConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub project: ProjectConfig,
}

impl RubiconConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> RubiconResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> RubiconResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// User config if present, else defaults; environment overrides on top.
    pub fn load_or_default() -> Self {
        loader::load_or_default()
    }

    /// Apply environment variable overrides (RUBICON_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Platform-reserved output names plus the configured extras
    pub fn reserved_names(&self) -> ReservedNames {
        ReservedNames::default().extended(self.output.reserved_names.iter().map(String::as_str))
    }
}
