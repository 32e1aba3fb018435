//! Test fixtures: settings documents as they appear on disk.

/// A document with both records and keys this version does not know.
pub const SETTINGS_WITH_UNKNOWN_KEYS: &str = r#"version = 1
workspaceColor = "teal"

[compilation]
toolchainVersionId = "ruby-3.2.2"
searchPaths = ["lib", "vendor/lib"]
outputFileName = "app"
optimizer = { level = 2 }

[run]
mainFile = "bin/app.rb"
arguments = ["--port", "8080"]
workingDirectory = ""
"#;

/// `searchPaths` has the wrong type next to keys this version does not
/// know; the run record is fine.
pub const SETTINGS_WITH_MALFORMED_COMPILATION: &str = r#"version = 1

[compilation]
searchPaths = "lib"
futureFlag = true
generatedAt = 2031-01-01T00:00:00Z

[run]
mainFile = "main.rb"
"#;

/// Not TOML at all.
pub const CORRUPTED_SETTINGS: &str = "[compilation\nsearchPaths = [";

/// Selects a toolchain that is not installed.
pub const SETTINGS_WITH_MISSING_TOOLCHAIN: &str = r#"version = 1

[compilation]
toolchainVersionId = "ruby-1.9.3"
searchPaths = []
outputFileName = ""
"#;
