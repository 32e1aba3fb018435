//! Settings domain kinds
//!
//! Each kind owns exactly one sub-record in the persisted settings document.

use std::fmt;

/// Category of project settings with its own edit/commit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SettingsKind {
    /// Toolchain selection, search paths and output naming
    Compilation,
    /// Main script, arguments and working directory
    Run,
}

impl SettingsKind {
    /// Every kind, in document order.
    pub const ALL: [SettingsKind; 2] = [SettingsKind::Compilation, SettingsKind::Run];

    /// Key of this kind's sub-record in the persisted document.
    pub fn record_key(self) -> &'static str {
        match self {
            SettingsKind::Compilation => "compilation",
            SettingsKind::Run => "run",
        }
    }
}

impl fmt::Display for SettingsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record_key())
    }
}
