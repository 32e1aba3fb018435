//! Scenario: First-Time Project Setup
//!
//! Journey: A developer opens a fresh Ruby project and configures how it is
//! compiled and run.
//!
//! Steps:
//! 1. Open the project; nothing is persisted yet
//! 2. Scan toolchains and pick one
//! 3. Add search paths, set an output name and a main file
//! 4. Commit and save
//! 5. Reopen and find everything as left

use std::path::{Path, PathBuf};

use rubicon::domain::settings::ToolchainSelection;
use rubicon::{
    CompilationSettings, Project, RubiconConfig, RunSettings, SettingsDomain, SettingsKind,
    Severity,
};
use tempfile::TempDir;

use crate::common::install_ruby_under;

fn config_for(rubies: &Path) -> RubiconConfig {
    let mut config = RubiconConfig::default();
    config.toolchains.roots = vec![rubies.to_path_buf()];
    config
}

/// SCENARIO: From an empty project to persisted settings.
#[test]
fn scenario_first_project_setup_complete_journey() {
    let project_dir = TempDir::new().unwrap();
    let rubies = TempDir::new().unwrap();
    install_ruby_under(rubies.path(), "ruby-3.2.2");
    install_ruby_under(rubies.path(), "ruby-3.10.0");
    std::fs::create_dir_all(project_dir.path().join("lib")).unwrap();
    let config = config_for(rubies.path());

    // Step 1: nothing on disk, defaults everywhere
    let mut project = Project::open(project_dir.path(), &config).unwrap();
    {
        let compilation = project.store_mut().domain::<CompilationSettings>().unwrap();
        assert_eq!(compilation.output_file_name(), "");
        assert!(compilation.search_paths().is_empty());
        assert!(!compilation.is_dirty());
    }
    assert!(!project.store().location().exists());

    // Step 2: scan, catalog comes back in version order
    assert!(project.refresh_toolchains().is_completed());
    let choices = project
        .store_mut()
        .domain::<CompilationSettings>()
        .unwrap()
        .toolchain_choices();
    let ids: Vec<&str> = choices.catalog.versions().iter().map(|v| v.id().as_str()).collect();
    assert_eq!(ids, vec!["ruby-3.2.2", "ruby-3.10.0"]);
    assert_eq!(choices.selection, ToolchainSelection::None);

    // Step 3: edit
    let compilation = project.store_mut().domain::<CompilationSettings>().unwrap();
    compilation.select_toolchain("ruby-3.10.0");
    compilation.add_search_path("lib").unwrap();
    compilation.add_search_path("generated").unwrap();
    compilation.set_output_file_name("out");
    let run = project.store_mut().domain::<RunSettings>().unwrap();
    run.set_main_file("bin/app.rb");
    run.set_arguments(["--port", "8080"]);
    assert!(project.store().is_dirty());

    let report = project.store().validate_all();
    let compilation_issues = &report[&SettingsKind::Compilation];
    assert_eq!(compilation_issues.len(), 1, "only the missing path: {:?}", compilation_issues);
    assert_eq!(compilation_issues[0].field, "searchPaths[1]");
    assert_eq!(compilation_issues[0].severity, Severity::Warning);

    // Step 4: warnings never block a commit
    project.store_mut().commit_and_save().unwrap();
    assert!(!project.store().is_dirty());
    assert!(project.store().location().exists());
    project.close();

    // Step 5: reopen
    let mut reopened = Project::open(project_dir.path(), &config).unwrap();
    reopened.refresh_toolchains();
    let compilation = reopened.store_mut().domain::<CompilationSettings>().unwrap();
    assert_eq!(compilation.output_file_name(), "out");
    assert_eq!(
        compilation.search_paths().to_serializable(),
        vec!["lib".to_string(), "generated".to_string()]
    );
    assert!(compilation.search_paths().entries()[0].exists_on_disk());
    assert!(!compilation.search_paths().entries()[1].exists_on_disk());
    match compilation.toolchain_choices().selection {
        ToolchainSelection::Resolved(version) => {
            assert_eq!(version.display_name(), "Ruby 3.10.0");
            assert_eq!(
                version.install_path(),
                rubies.path().join("ruby-3.10.0").as_path()
            );
        }
        other => panic!("expected a resolved toolchain, got {:?}", other),
    }

    let run = reopened.store_mut().domain::<RunSettings>().unwrap();
    assert_eq!(run.main_file(), "bin/app.rb");
    assert_eq!(run.arguments(), ["--port".to_string(), "8080".to_string()]);
}

/// SCENARIO: Editing the output name moves the domain through dirty and back.
#[test]
fn scenario_output_name_lifecycle() {
    let project_dir = TempDir::new().unwrap();
    let rubies = TempDir::new().unwrap();
    let mut project = Project::open(project_dir.path(), &config_for(rubies.path())).unwrap();

    let compilation = project.store_mut().domain::<CompilationSettings>().unwrap();
    compilation.set_output_file_name("out");
    assert_eq!(project.store().dirty_kinds(), vec![SettingsKind::Compilation]);

    project.store_mut().commit_all().unwrap();
    assert!(!project.store().is_dirty());

    // setting the committed value again is not an edit
    let compilation = project.store_mut().domain::<CompilationSettings>().unwrap();
    compilation.set_output_file_name("out");
    assert!(!project.store().is_dirty());

    // the file chooser keeps only the file name
    let compilation = project.store_mut().domain::<CompilationSettings>().unwrap();
    assert!(compilation.apply_chooser_outcome(
        rubicon::domain::settings::ChooserOutcome::Selected(PathBuf::from("/tmp/build/app.bin"))
    ));
    assert_eq!(compilation.output_file_name(), "app.bin");
    project.store_mut().revert_all();

    let compilation = project.store_mut().domain::<CompilationSettings>().unwrap();
    assert_eq!(compilation.output_file_name(), "out");
}

/// SCENARIO: One invalid domain keeps every domain uncommitted.
#[test]
fn scenario_commit_is_all_or_nothing() {
    let project_dir = TempDir::new().unwrap();
    let rubies = TempDir::new().unwrap();
    let mut project = Project::open(project_dir.path(), &config_for(rubies.path())).unwrap();

    project
        .store_mut()
        .domain::<RunSettings>()
        .unwrap()
        .set_main_file("main.rb");
    project
        .store_mut()
        .domain::<CompilationSettings>()
        .unwrap()
        .set_output_file_name("CON");

    let err = project.store_mut().commit_and_save().unwrap_err();
    match err {
        rubicon::StoreError::CommitRefused(refused) => {
            assert_eq!(
                refused.failures.keys().copied().collect::<Vec<_>>(),
                vec![SettingsKind::Compilation]
            );
        }
        other => panic!("expected a refused commit, got {:?}", other),
    }

    // the valid run edit was not committed either
    assert_eq!(
        project.store().dirty_kinds(),
        vec![SettingsKind::Compilation, SettingsKind::Run]
    );
    assert!(!project.store().location().exists());
}
