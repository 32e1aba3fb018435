//! Scenario: Hand-Edited Settings File
//!
//! Journey: The settings file was edited by hand or by a newer release. The
//! developer keeps working in the IDE.
//!
//! Success Criteria:
//! - Keys this version does not understand survive a save
//! - A bad record falls back to defaults for that kind only
//! - An unreadable file is reported and replaced on the next save

use rubicon::domain::settings::MalformedPersistedData;
use rubicon::{
    CompilationSettings, LoadWarning, Project, RubiconConfig, RunSettings, SettingsKind,
};

use crate::common::*;

fn open(env: &TestEnv) -> Project {
    let mut config = RubiconConfig::default();
    config.toolchains.roots = vec![env.toolchain_root.path().to_path_buf()];
    Project::open(env.project_root.path(), &config).unwrap()
}

#[test]
fn scenario_unknown_keys_survive_an_edit() {
    let env = TestEnv::builder()
        .with_settings(SETTINGS_WITH_UNKNOWN_KEYS)
        .build();
    let mut project = open(&env);

    let compilation = project.store_mut().domain::<CompilationSettings>().unwrap();
    assert_eq!(compilation.output_file_name(), "app");
    compilation.set_output_file_name("server");
    project.store_mut().commit_and_save().unwrap();
    assert!(project.store().load_warnings().is_empty());

    let saved = env.read_settings_toml();
    assert_eq!(saved["workspaceColor"].as_str(), Some("teal"));
    let compilation = saved["compilation"].as_table().unwrap();
    assert_eq!(compilation["outputFileName"].as_str(), Some("server"));
    assert_eq!(compilation["toolchainVersionId"].as_str(), Some("ruby-3.2.2"));
    assert_eq!(compilation["optimizer"]["level"].as_integer(), Some(2));

    // run was never loaded, its record is written back as read
    let run = saved["run"].as_table().unwrap();
    assert_eq!(run["mainFile"].as_str(), Some("bin/app.rb"));
    assert_eq!(
        run["arguments"].as_array().unwrap().len(),
        2,
        "arguments: {:?}",
        run["arguments"]
    );
}

#[test]
fn scenario_malformed_record_falls_back_to_defaults() {
    let env = TestEnv::builder()
        .with_settings(SETTINGS_WITH_MALFORMED_COMPILATION)
        .build();
    let mut project = open(&env);

    let compilation = project.store_mut().domain::<CompilationSettings>().unwrap();
    assert!(compilation.search_paths().is_empty());
    assert_eq!(compilation.output_file_name(), "");

    let warnings = project.store().load_warnings().to_vec();
    assert!(
        matches!(
            warnings.as_slice(),
            [LoadWarning::MalformedRecord(MalformedPersistedData {
                kind: SettingsKind::Compilation,
                ..
            })]
        ),
        "{:?}",
        warnings
    );

    // the other kind is unaffected
    let run = project.store_mut().domain::<RunSettings>().unwrap();
    assert_eq!(run.main_file(), "main.rb");
    assert_eq!(project.store().load_warnings().len(), 1);

    // saving replaces the bad record with a well-formed one
    project
        .store_mut()
        .domain::<CompilationSettings>()
        .unwrap()
        .add_search_path("lib")
        .unwrap();
    project.store_mut().commit_and_save().unwrap();
    let saved = env.read_settings_toml();
    let paths = saved["compilation"]["searchPaths"].as_array().unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].as_str(), Some("lib"));

    // keys a newer version wrote next to the bad field are kept as they were
    assert_eq!(saved["compilation"]["futureFlag"].as_bool(), Some(true));
    assert!(saved["compilation"]["generatedAt"].is_datetime());
}

#[test]
fn scenario_corrupted_file_is_replaced_on_save() {
    let env = TestEnv::builder().with_settings(CORRUPTED_SETTINGS).build();
    let mut project = open(&env);

    let run = project.store_mut().domain::<RunSettings>().unwrap();
    assert_eq!(run.main_file(), "");
    assert!(matches!(
        project.store().load_warnings(),
        [LoadWarning::CorruptedDocument { .. }]
    ));

    // nothing is written until the user saves
    assert_eq!(env.read_settings(), CORRUPTED_SETTINGS);

    project
        .store_mut()
        .domain::<RunSettings>()
        .unwrap()
        .set_main_file("app.rb");
    project.store_mut().commit_and_save().unwrap();

    let saved = env.read_settings_toml();
    assert_eq!(saved["version"].as_integer(), Some(1));
    assert_eq!(saved["run"]["mainFile"].as_str(), Some("app.rb"));
}

#[test]
fn scenario_newer_document_version_is_kept() {
    let env = TestEnv::builder()
        .with_settings("version = 7\nfutureSection = { enabled = true }\n\n[run]\nmainFile = \"main.rb\"\n")
        .build();
    let mut project = open(&env);

    project
        .store_mut()
        .domain::<RunSettings>()
        .unwrap()
        .set_arguments(["-v"]);
    project.store_mut().commit_and_save().unwrap();
    assert!(matches!(
        project.store().load_warnings(),
        [LoadWarning::NewerVersion { found: 7 }]
    ));

    let saved = env.read_settings_toml();
    assert_eq!(saved["version"].as_integer(), Some(7));
    assert_eq!(saved["futureSection"]["enabled"].as_bool(), Some(true));
}
