//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{RubiconError, RubiconResult};
use crate::infrastructure::fs::rubicon_home_dir;

use super::types::RubiconConfig;

pub use crate::domain::value_objects::ConfigWarning;

pub const ENV_TOOLCHAIN_ROOTS: &str = "RUBICON_TOOLCHAIN_ROOTS";
pub const ENV_SETTINGS_FILE: &str = "RUBICON_SETTINGS_FILE";
pub const ENV_RESERVED_NAMES: &str = "RUBICON_RESERVED_NAMES";

/// Every key the config format understands, for typo suggestions.
const KNOWN_KEYS: &[&str] = &[
    "toolchains",
    "roots",
    "output",
    "reserved_names",
    "project",
    "settings_file",
];

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> RubiconResult<(RubiconConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

pub(crate) fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> RubiconResult<(RubiconConfig, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: RubiconConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| RubiconError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.message().to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|key| {
            let leaf = key.split('.').next_back().unwrap_or(key.as_str()).to_string();
            ConfigWarning {
                line: find_line_number(content, &leaf),
                suggestion: suggest_key(&leaf),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// User config path: `$XDG_CONFIG_HOME/rubicon/config.toml`, falling back to
/// `~/.config/rubicon/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| rubicon_home_dir().map(|h| h.join(".config")))
        .map(|dir| dir.join("rubicon/config.toml"))
}

/// Load the user config, if there is one, with env overrides applied.
pub fn discover() -> RubiconResult<(RubiconConfig, Vec<ConfigWarning>)> {
    let (config, warnings) = match user_config_path() {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "loading user config");
            load_with_warnings(&path)?
        }
        _ => (RubiconConfig::default(), Vec::new()),
    };
    Ok((with_env_overrides(config), warnings))
}

/// Like [`discover`], but an unreadable config falls back to defaults.
pub fn load_or_default() -> RubiconConfig {
    match discover() {
        Ok((config, _)) => config,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable user config");
            with_env_overrides(RubiconConfig::default())
        }
    }
}

/// Apply environment variable overrides (RUBICON_* prefix)
pub fn with_env_overrides(config: RubiconConfig) -> RubiconConfig {
    apply_overrides(config, |name| std::env::var_os(name))
}

pub(crate) fn apply_overrides<F>(mut config: RubiconConfig, lookup: F) -> RubiconConfig
where
    F: Fn(&str) -> Option<std::ffi::OsString>,
{
    // RUBICON_TOOLCHAIN_ROOTS (OS path list)
    if let Some(roots) = lookup(ENV_TOOLCHAIN_ROOTS) {
        let parsed: Vec<PathBuf> = std::env::split_paths(&roots)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        if !parsed.is_empty() {
            config.toolchains.roots = parsed;
        }
    }

    // RUBICON_SETTINGS_FILE
    if let Some(file) = lookup(ENV_SETTINGS_FILE) {
        if !file.is_empty() {
            config.project.settings_file = PathBuf::from(file);
        }
    }

    // RUBICON_RESERVED_NAMES (comma-separated, appended)
    if let Some(names) = lookup(ENV_RESERVED_NAMES) {
        config.output.reserved_names.extend(
            names
                .to_string_lossy()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for candidate in KNOWN_KEYS {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
