//! Discovery of Ruby installations under version-manager roots.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::RubiconConfig;
use crate::domain::ports::{CancelToken, ScanError, ToolchainScanner};
use crate::domain::value_objects::ToolchainVersion;
use crate::infrastructure::fs::{expand_home, rubicon_home_dir};

/// Roots searched when the config does not name any, relative to home.
const HOME_ROOTS: &[&str] = &[
    ".rbenv/versions",
    ".rubies",
    ".rvm/rubies",
    ".asdf/installs/ruby",
    ".local/share/mise/installs/ruby",
];

const SYSTEM_ROOTS: &[&str] = &["/opt/rubies"];

/// Interpreter names whose presence under `bin/` marks an installation.
const INTERPRETERS: &[&str] = &["ruby", "ruby.exe"];

#[derive(Debug, Clone)]
pub struct RubyInstallScanner {
    roots: Vec<PathBuf>,
}

impl RubyInstallScanner {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn default_roots() -> Vec<PathBuf> {
        let mut roots: Vec<PathBuf> = match rubicon_home_dir() {
            Some(home) => HOME_ROOTS.iter().map(|r| home.join(r)).collect(),
            None => Vec::new(),
        };
        roots.extend(SYSTEM_ROOTS.iter().map(PathBuf::from));
        roots
    }

    /// Configured roots with `~` expanded, or the defaults when none are set.
    pub fn from_config(config: &RubiconConfig) -> Self {
        if config.toolchains.roots.is_empty() {
            Self::new(Self::default_roots())
        } else {
            Self::new(
                config
                    .toolchains
                    .roots
                    .iter()
                    .map(|root| expand_home(root))
                    .collect(),
            )
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn scan_root(&self, root: &Path) -> Result<Vec<ToolchainVersion>, ScanError> {
        let entries = match std::fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(root = %root.display(), "toolchain root absent, skipping");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(ScanError::Io {
                    root: root.to_path_buf(),
                    source,
                })
            }
        };

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ScanError::Io {
                root: root.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !path.is_dir() || !has_interpreter(&path) {
                continue;
            }
            let Some(id) = entry.file_name().to_str().map(str::to_string) else {
                warn!(path = %path.display(), "skipping toolchain with non UTF-8 name");
                continue;
            };
            found.push(ToolchainVersion::new(
                id.clone(),
                display_name_for(&id),
                path,
            ));
        }
        Ok(found)
    }
}

impl ToolchainScanner for RubyInstallScanner {
    fn scan(&self, cancel: &CancelToken) -> Result<Vec<ToolchainVersion>, ScanError> {
        let mut versions = Vec::new();
        for root in &self.roots {
            if cancel.is_cancelled() {
                return Err(ScanError::Cancelled);
            }
            versions.extend(self.scan_root(root)?);
        }
        debug!(count = versions.len(), roots = self.roots.len(), "toolchain scan finished");
        Ok(versions)
    }
}

fn has_interpreter(install: &Path) -> bool {
    let bin = install.join("bin");
    INTERPRETERS.iter().any(|name| bin.join(name).is_file())
}

/// Human label for an installation directory name.
///
/// `ruby-3.2.2` and `3.2.2` become `Ruby 3.2.2`; other engines keep their
/// version behind a capitalised engine name. Unknown names are returned as is.
pub fn display_name_for(id: &str) -> String {
    const ENGINES: &[(&str, &str)] = &[
        ("ruby-", "Ruby"),
        ("jruby-", "JRuby"),
        ("truffleruby-", "TruffleRuby"),
        ("mruby-", "mruby"),
    ];

    for (prefix, label) in ENGINES {
        if let Some(version) = id.strip_prefix(prefix) {
            if !version.is_empty() {
                return format!("{} {}", label, version);
            }
        }
    }

    if id.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("Ruby {}", id);
    }

    id.to_string()
}
