//! Mutating commands. Each applies one field edit, then commits every loaded
//! domain and saves; a refused commit leaves the file untouched.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Result};
use rubicon::application::CommitAllError;
use rubicon::domain::settings::ChooserOutcome;
use rubicon::{
    CompilationSettings, Project, RunSettings, SettingsKind, Severity, StoreError, ValidationIssue,
};

use super::{open_project, print_load_warnings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    SelectToolchain(String),
    ClearToolchain,
    AddPath(String),
    RemovePath(usize),
    MovePath { from: usize, to: usize },
    SetOutput(String),
    ChooseOutput(PathBuf),
    SetMain(String),
    SetArgs(Vec<String>),
    SetWorkdir(String),
}

impl Edit {
    fn kind(&self) -> SettingsKind {
        match self {
            Edit::SetMain(_) | Edit::SetArgs(_) | Edit::SetWorkdir(_) => SettingsKind::Run,
            _ => SettingsKind::Compilation,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Edit::SelectToolchain(_) => "select-toolchain",
            Edit::ClearToolchain => "clear-toolchain",
            Edit::AddPath(_) => "add-path",
            Edit::RemovePath(_) => "remove-path",
            Edit::MovePath { .. } => "move-path",
            Edit::SetOutput(_) => "set-output",
            Edit::ChooseOutput(_) => "choose-output",
            Edit::SetMain(_) => "set-main",
            Edit::SetArgs(_) => "set-args",
            Edit::SetWorkdir(_) => "set-workdir",
        }
    }
}

pub fn cmd_edit(project_dir: Option<&Path>, edit: Edit, json: bool) -> Result<ExitCode> {
    let mut project = open_project(project_dir)?;
    if edit.kind() == SettingsKind::Compilation {
        // Toolchain warnings are only meaningful against a fresh catalog.
        project.refresh_toolchains();
    }

    apply(&mut project, &edit)?;
    if !json {
        print_load_warnings(project.store().load_warnings());
    }

    match project.store_mut().commit_and_save() {
        Ok(()) => {
            let warnings = project
                .store()
                .validate_all()
                .remove(&edit.kind())
                .unwrap_or_default();
            report_saved(&project, &edit, &warnings, json);
            Ok(ExitCode::SUCCESS)
        }
        Err(StoreError::CommitRefused(refused)) => {
            report_refused(&edit, &refused, json);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

fn apply(project: &mut Project, edit: &Edit) -> Result<()> {
    let store = project.store_mut();
    match edit {
        Edit::SelectToolchain(id) => store
            .domain::<CompilationSettings>()?
            .select_toolchain(id.as_str()),
        Edit::ClearToolchain => store.domain::<CompilationSettings>()?.clear_toolchain(),
        Edit::AddPath(raw) => store
            .domain::<CompilationSettings>()?
            .add_search_path(raw.as_str())?,
        Edit::RemovePath(index) => {
            store
                .domain::<CompilationSettings>()?
                .remove_search_path(*index)?;
        }
        Edit::MovePath { from, to } => store
            .domain::<CompilationSettings>()?
            .move_search_path(*from, *to)?,
        Edit::SetOutput(name) => store
            .domain::<CompilationSettings>()?
            .set_output_file_name(name.as_str()),
        Edit::ChooseOutput(path) => {
            let applied = store
                .domain::<CompilationSettings>()?
                .apply_chooser_outcome(ChooserOutcome::Selected(path.clone()));
            if !applied {
                bail!("'{}' does not name a file", path.display());
            }
        }
        Edit::SetMain(file) => store.domain::<RunSettings>()?.set_main_file(file.as_str()),
        Edit::SetArgs(args) => store
            .domain::<RunSettings>()?
            .set_arguments(args.iter().map(String::as_str)),
        Edit::SetWorkdir(dir) => store
            .domain::<RunSettings>()?
            .set_working_directory(dir.as_str()),
    }
    Ok(())
}

fn report_saved(project: &Project, edit: &Edit, warnings: &[ValidationIssue], json: bool) {
    let warnings: Vec<&ValidationIssue> = warnings
        .iter()
        .filter(|i| i.severity == Severity::Warning)
        .collect();

    if json {
        let out = serde_json::json!({
            "type": "edit",
            "command": edit.name(),
            "saved": true,
            "settingsFile": project.store().location().display().to_string(),
            "warnings": warnings,
        });
        println!("{}", out);
        return;
    }

    for warning in warnings {
        eprintln!("{}", warning);
    }
    println!("Saved {}", project.store().location().display());
}

fn report_refused(edit: &Edit, refused: &CommitAllError, json: bool) {
    if json {
        let failures: BTreeMap<String, &Vec<ValidationIssue>> = refused
            .failures
            .iter()
            .map(|(kind, failed)| (kind.to_string(), &failed.issues))
            .collect();
        let out = serde_json::json!({
            "type": "edit",
            "command": edit.name(),
            "saved": false,
            "failures": failures,
        });
        println!("{}", out);
        return;
    }

    eprintln!("Not saved: {}", refused);
    for failed in refused.failures.values() {
        for issue in failed.issues.iter().filter(|i| i.is_error()) {
            eprintln!("  {}", issue);
        }
    }
}
