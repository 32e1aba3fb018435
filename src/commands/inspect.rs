//! Read-only commands: show, validate, toolchains.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use rubicon::domain::ports::ToolchainCatalog;
use rubicon::domain::settings::ToolchainSelection;
use rubicon::domain::value_objects::has_errors;
use rubicon::{CompilationSettings, RefreshEvent, RunSettings, ValidationIssue};

use super::{open_project, print_load_warnings};

pub fn cmd_show(project_dir: Option<&Path>, json: bool) -> Result<ExitCode> {
    let mut project = open_project(project_dir)?;
    project.refresh_toolchains();
    project.store_mut().load_all()?;

    let root = project.root().display().to_string();
    let id = project.id().to_string();
    let location = project.store().location().display().to_string();
    let warnings: Vec<String> = project
        .store()
        .load_warnings()
        .iter()
        .map(ToString::to_string)
        .collect();

    let compilation = project.store_mut().domain::<CompilationSettings>()?;
    let choices = compilation.toolchain_choices();
    let paths: Vec<(String, bool)> = compilation
        .search_paths()
        .entries()
        .iter()
        .map(|e| (e.raw_path().to_string(), e.exists_on_disk()))
        .collect();
    let output = compilation.output_file_name().to_string();

    let run = project.store_mut().domain::<RunSettings>()?;
    let main_file = run.main_file().to_string();
    let arguments = run.arguments().to_vec();
    let working_directory = run.working_directory().to_string();

    if json {
        let toolchain = match &choices.selection {
            ToolchainSelection::None => serde_json::Value::Null,
            ToolchainSelection::Resolved(version) => serde_json::json!({
                "id": version.id(),
                "resolved": true,
                "version": version,
            }),
            ToolchainSelection::Unresolved(id) => serde_json::json!({
                "id": id,
                "resolved": false,
            }),
        };
        let out = serde_json::json!({
            "type": "show",
            "project": root,
            "id": id,
            "settingsFile": location,
            "compilation": {
                "toolchain": toolchain,
                "searchPaths": paths
                    .iter()
                    .map(|(path, exists)| serde_json::json!({ "path": path, "exists": exists }))
                    .collect::<Vec<_>>(),
                "outputFileName": output,
            },
            "run": {
                "mainFile": main_file,
                "arguments": arguments,
                "workingDirectory": working_directory,
            },
            "warnings": warnings,
        });
        println!("{}", out);
        return Ok(ExitCode::SUCCESS);
    }

    for warning in &warnings {
        eprintln!("warning: {}", warning);
    }

    println!("Project:  {} ({})", root, id);
    println!("Settings: {}", location);
    println!();
    println!("Compilation");
    let toolchain = match &choices.selection {
        ToolchainSelection::None => "(none)".to_string(),
        ToolchainSelection::Resolved(version) => {
            format!("{} ({})", version.id(), version.display_name())
        }
        ToolchainSelection::Unresolved(id) => format!("{} (not installed)", id),
    };
    println!("  toolchain:    {}", toolchain);
    if paths.is_empty() {
        println!("  search paths: (none)");
    } else {
        println!("  search paths:");
        for (index, (path, exists)) in paths.iter().enumerate() {
            let marker = if *exists { "" } else { "  (missing)" };
            println!("    [{}] {}{}", index, path, marker);
        }
    }
    println!("  output:       {}", or_placeholder(&output, "(none)"));
    println!();
    println!("Run");
    println!("  main file:    {}", or_placeholder(&main_file, "(none)"));
    println!("  arguments:    {}", arguments.join(" "));
    println!(
        "  working dir:  {}",
        or_placeholder(&working_directory, "(project root)")
    );

    Ok(ExitCode::SUCCESS)
}

pub fn cmd_validate(project_dir: Option<&Path>, json: bool) -> Result<ExitCode> {
    let mut project = open_project(project_dir)?;
    project.refresh_toolchains();
    project.store_mut().load_all()?;

    let report = project.store().validate_all();
    let failed = report.values().any(|issues| has_errors(issues));

    if json {
        let domains: serde_json::Map<String, serde_json::Value> = report
            .iter()
            .map(|(kind, issues)| (kind.to_string(), serde_json::json!(issues)))
            .collect();
        let out = serde_json::json!({
            "type": "validate",
            "ok": !failed,
            "domains": domains,
        });
        println!("{}", out);
    } else {
        print_load_warnings(project.store().load_warnings());
        for (kind, issues) in &report {
            println!("{}: {}", kind, summary(issues));
            for issue in issues {
                println!("  {}", issue);
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

pub fn cmd_toolchains(project_dir: Option<&Path>, json: bool) -> Result<ExitCode> {
    let mut project = open_project(project_dir)?;
    let event = project.refresh_toolchains();
    let snapshot = project.registry().snapshot();
    let selected = project
        .store_mut()
        .domain::<CompilationSettings>()?
        .selected_toolchain()
        .cloned();

    if json {
        let out = serde_json::json!({
            "type": "toolchains",
            "state": snapshot.state(),
            "refresh": event,
            "selected": selected,
            "versions": snapshot.versions(),
        });
        println!("{}", out);
        return Ok(ExitCode::SUCCESS);
    }

    if let RefreshEvent::Failed { message } = &event {
        eprintln!("warning: {}; showing the previous list", message);
    }
    if snapshot.is_empty() {
        println!("No Ruby toolchains found.");
        return Ok(ExitCode::SUCCESS);
    }
    for version in snapshot.versions() {
        let marker = if selected.as_ref() == Some(version.id()) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<24} {:<20} {}",
            marker,
            version.id().as_str(),
            version.display_name(),
            version.install_path().display()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn summary(issues: &[ValidationIssue]) -> String {
    let errors = issues.iter().filter(|i| i.is_error()).count();
    let warnings = issues.len() - errors;
    match (errors, warnings) {
        (0, 0) => "ok".to_string(),
        _ => format!("{} error(s), {} warning(s)", errors, warnings),
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}
