//! Run settings domain: what to execute and how.

use std::any::Any;

use serde::Deserialize;

use crate::domain::value_objects::{SettingsKind, ValidationIssue};

use super::{
    commit_validated, decode_record, MalformedPersistedData, SettingsDomain, Tracked,
    TypedDomain, ValidationFailed,
};

const FIELD_MAIN_FILE: &str = "mainFile";
const FIELD_ARGUMENTS: &str = "arguments";
const FIELD_WORKING_DIRECTORY: &str = "workingDirectory";
const KNOWN_FIELDS: &[&str] = &[FIELD_MAIN_FILE, FIELD_ARGUMENTS, FIELD_WORKING_DIRECTORY];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFields {
    /// Script to run, relative to the project root. Empty means none.
    pub main_file: String,
    pub arguments: Vec<String>,
    /// Empty means the project root
    pub working_directory: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunRecord {
    #[serde(default)]
    main_file: String,
    #[serde(default)]
    arguments: Vec<String>,
    #[serde(default)]
    working_directory: String,
}

#[derive(Debug, Default)]
pub struct RunSettings {
    fields: Tracked<RunFields>,
    extra: toml::Table,
}

impl RunSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &RunFields {
        self.fields.current()
    }

    pub fn committed(&self) -> &RunFields {
        self.fields.committed()
    }

    pub fn main_file(&self) -> &str {
        &self.fields.current().main_file
    }

    pub fn set_main_file(&mut self, main_file: impl Into<String>) {
        let main_file = main_file.into();
        self.fields.edit(|f| f.main_file = main_file);
    }

    pub fn arguments(&self) -> &[String] {
        &self.fields.current().arguments
    }

    pub fn set_arguments<I, S>(&mut self, arguments: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let arguments: Vec<String> = arguments.into_iter().map(Into::into).collect();
        self.fields.edit(|f| f.arguments = arguments);
    }

    pub fn working_directory(&self) -> &str {
        &self.fields.current().working_directory
    }

    pub fn set_working_directory(&mut self, dir: impl Into<String>) {
        let dir = dir.into();
        self.fields.edit(|f| f.working_directory = dir);
    }
}

impl SettingsDomain for RunSettings {
    fn kind(&self) -> SettingsKind {
        SettingsKind::Run
    }

    fn load(&mut self, record: Option<&toml::Value>) -> Result<(), MalformedPersistedData> {
        let decoded = decode_record::<RunRecord>(self.kind(), record, KNOWN_FIELDS);
        self.extra = decoded.extra;
        match decoded.fields {
            Ok(record) => {
                self.fields.reset(RunFields {
                    main_file: record.main_file,
                    arguments: record.arguments,
                    working_directory: record.working_directory,
                });
                Ok(())
            }
            Err(err) => {
                self.fields.reset(RunFields::default());
                Err(err)
            }
        }
    }

    fn validate(&self) -> Vec<ValidationIssue> {
        let current = self.fields.current();
        let mut issues = Vec::new();

        if current.main_file.is_empty() {
            issues.push(ValidationIssue::warning(
                FIELD_MAIN_FILE,
                "no main file configured; the project cannot be run directly",
            ));
        } else if current.main_file.trim().is_empty() {
            issues.push(ValidationIssue::error(FIELD_MAIN_FILE, "main file is blank"));
        } else if current.main_file.contains('\0') {
            issues.push(ValidationIssue::error(
                FIELD_MAIN_FILE,
                "main file contains a NUL character",
            ));
        }

        for (index, arg) in current.arguments.iter().enumerate() {
            if arg.contains('\0') {
                issues.push(ValidationIssue::error(
                    format!("{}[{}]", FIELD_ARGUMENTS, index),
                    "argument contains a NUL character",
                ));
            }
        }

        if current.working_directory.contains('\0') {
            issues.push(ValidationIssue::error(
                FIELD_WORKING_DIRECTORY,
                "working directory contains a NUL character",
            ));
        }

        issues
    }

    fn commit(&mut self) -> Result<(), ValidationFailed> {
        let issues = self.validate();
        commit_validated(self.kind(), &mut self.fields, issues)
    }

    fn revert(&mut self) {
        self.fields.revert();
    }

    fn is_dirty(&self) -> bool {
        self.fields.is_dirty()
    }

    fn to_record(&self) -> toml::Table {
        let committed = self.fields.committed();
        let mut table = self.extra.clone();
        table.insert(
            FIELD_MAIN_FILE.to_string(),
            toml::Value::String(committed.main_file.clone()),
        );
        table.insert(
            FIELD_ARGUMENTS.to_string(),
            toml::Value::Array(
                committed
                    .arguments
                    .iter()
                    .cloned()
                    .map(toml::Value::String)
                    .collect(),
            ),
        );
        table.insert(
            FIELD_WORKING_DIRECTORY.to_string(),
            toml::Value::String(committed.working_directory.clone()),
        );
        table
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl TypedDomain for RunSettings {
    const KIND: SettingsKind = SettingsKind::Run;
}
