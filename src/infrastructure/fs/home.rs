//! Home directory resolution with test isolation support.
//!
//! On Windows, `dirs::home_dir()` uses the Windows system API rather than
//! environment variables, so setting `HOME` in tests has no effect there.
//! `rubicon_home_dir()` checks `RUBICON_TEST_HOME` first and falls back to
//! `dirs::home_dir()`.
//!
//! Use it for every functional path derived from the home directory: the
//! user config file, default toolchain roots and `~` expansion of search paths.

use std::path::PathBuf;

/// Environment variable for test isolation of home directory.
pub const RUBICON_TEST_HOME_VAR: &str = "RUBICON_TEST_HOME";

pub fn rubicon_home_dir() -> Option<PathBuf> {
    std::env::var(RUBICON_TEST_HOME_VAR)
        .ok()
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}
