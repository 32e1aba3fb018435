//! Configuration warning value object.

use std::path::PathBuf;

/// Non-fatal problem found while reading a configuration file.
///
/// Unknown keys are reported rather than rejected so an older binary can
/// still read a config written for a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the unknown key (e.g. `toolchains.rootz`)
    pub key: String,
    /// The file where the warning occurred
    pub file: PathBuf,
    /// The line number (1-indexed) if available
    pub line: Option<usize>,
    /// A known key with a similar spelling, if any
    pub suggestion: Option<String>,
}
