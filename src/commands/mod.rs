pub mod edit;
pub mod inspect;
mod project_root;

use std::path::Path;

use anyhow::{Context, Result};
use rubicon::{LoadWarning, Project};

/// Load config (user file + env) and open the project at `dir`, or at the
/// project enclosing the working directory.
pub(crate) fn open_project(dir: Option<&Path>) -> Result<Project> {
    let (config, warnings) = rubicon::config::discover()?;
    for warning in &warnings {
        tracing::warn!(
            key = %warning.key,
            file = %warning.file.display(),
            line = ?warning.line,
            suggestion = ?warning.suggestion,
            "unknown config key"
        );
    }

    let root = match dir {
        Some(dir) => dir.to_path_buf(),
        None => project_root::discover_project_root(&std::env::current_dir()?),
    };
    Project::open(&root, &config)
        .with_context(|| format!("failed to open project at {}", root.display()))
}

pub(crate) fn print_load_warnings(warnings: &[LoadWarning]) {
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}
