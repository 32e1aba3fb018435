//! Scenario: Selected Toolchain Disappears
//!
//! Journey: A project was set up against `ruby-3.1.4`. The developer later
//! uninstalls it and installs `ruby-3.3.0`.
//!
//! Success Criteria:
//! - The selection is kept, reported as a warning, and still saves
//! - Reinstalling the toolchain resolves the selection again without edits

use rubicon::domain::settings::ToolchainSelection;
use rubicon::{CompilationSettings, Project, RubiconConfig, SettingsKind, Severity};
use tempfile::TempDir;

use crate::common::install_ruby_under;

#[test]
fn scenario_missing_toolchain_is_a_warning_not_an_error() {
    let project_dir = TempDir::new().unwrap();
    let rubies = TempDir::new().unwrap();
    install_ruby_under(rubies.path(), "ruby-3.3.0");
    let mut config = RubiconConfig::default();
    config.toolchains.roots = vec![rubies.path().to_path_buf()];

    let mut project = Project::open(project_dir.path(), &config).unwrap();
    project.refresh_toolchains();
    project
        .store_mut()
        .domain::<CompilationSettings>()
        .unwrap()
        .select_toolchain("ruby-3.1.4");

    let report = project.store().validate_all();
    let issues = &report[&SettingsKind::Compilation];
    assert_eq!(issues.len(), 1, "{:?}", issues);
    assert_eq!(issues[0].severity, Severity::Warning);
    assert_eq!(issues[0].field, "toolchainVersionId");
    assert!(issues[0].message.contains("ruby-3.1.4"));

    project.store_mut().commit_and_save().unwrap();
    let saved = std::fs::read_to_string(project.store().location()).unwrap();
    assert!(saved.contains("toolchainVersionId = \"ruby-3.1.4\""), "{}", saved);

    // the selection is an id, so a later scan resolves it
    install_ruby_under(rubies.path(), "ruby-3.1.4");
    assert!(project.refresh_toolchains().is_completed());
    let compilation = project.store_mut().domain::<CompilationSettings>().unwrap();
    match compilation.toolchain_choices().selection {
        ToolchainSelection::Resolved(version) => assert_eq!(version.id().as_str(), "ruby-3.1.4"),
        other => panic!("expected resolution after reinstall, got {:?}", other),
    }
    assert!(project.store().validate_all()[&SettingsKind::Compilation].is_empty());
}
