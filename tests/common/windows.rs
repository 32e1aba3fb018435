//! Windows-compatible test environment helpers.
//!
//! On Windows, `dirs::home_dir()` uses the Windows system API, not `HOME` or
//! `USERPROFILE`. Rubicon reads `RUBICON_TEST_HOME` first, so setting it
//! isolates the user config and default toolchain roots on every platform.

use std::path::Path;
use std::process::Command;

/// Extension trait for Command to add home directory isolation.
///
/// # Example
///
/// ```ignore
/// Command::new(bin())
///     .with_test_home(&home)
///     .args(["show", "--json"])
///     .output()
///     .unwrap();
/// ```
pub trait WindowsCompatExt {
    /// Sets `HOME`, `USERPROFILE`, `XDG_CONFIG_HOME` and `RUBICON_TEST_HOME`,
    /// and clears every `RUBICON_*` override inherited from the caller.
    fn with_test_home(&mut self, home: &Path) -> &mut Self;
}

impl WindowsCompatExt for Command {
    fn with_test_home(&mut self, home: &Path) -> &mut Self {
        self.env("HOME", home)
            .env("USERPROFILE", home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env("RUBICON_TEST_HOME", home)
            .env_remove("RUBICON_TOOLCHAIN_ROOTS")
            .env_remove("RUBICON_SETTINGS_FILE")
            .env_remove("RUBICON_RESERVED_NAMES")
            .env_remove("RUBICON_LOG")
    }
}
