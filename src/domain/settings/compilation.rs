//! Compilation settings domain
//!
//! Toolchain selection, ordered search paths and the output file name of the
//! compilation target. The toolchain is held as an id and resolved against
//! the catalog whenever it is validated or rendered.

use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use crate::domain::entities::{CatalogSnapshot, PathEntry, PathList, PathListError};
use crate::domain::ports::{FileSystem, ToolchainCatalog};
use crate::domain::value_objects::{
    check_output_name, ReservedNames, Resolution, SettingsKind, ToolchainId, ToolchainVersion,
    ValidationIssue,
};

use super::{
    commit_validated, decode_record, MalformedPersistedData, SettingsDomain, Tracked,
    TypedDomain, ValidationFailed,
};

const FIELD_TOOLCHAIN: &str = "toolchainVersionId";
const FIELD_SEARCH_PATHS: &str = "searchPaths";
const FIELD_OUTPUT: &str = "outputFileName";
const KNOWN_FIELDS: &[&str] = &[FIELD_TOOLCHAIN, FIELD_SEARCH_PATHS, FIELD_OUTPUT];

/// Editable compilation fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationFields {
    pub toolchain: Option<ToolchainId>,
    pub search_paths: PathList,
    /// Empty means "use the build system default"
    pub output_file_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilationRecord {
    #[serde(default)]
    toolchain_version_id: Option<String>,
    #[serde(default)]
    search_paths: Vec<String>,
    #[serde(default)]
    output_file_name: String,
}

/// Result handed back by the external file chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChooserOutcome {
    Selected(PathBuf),
    Cancelled,
}

/// State of the toolchain selection against the current catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolchainSelection {
    None,
    Resolved(ToolchainVersion),
    /// Selected id no longer (or not yet) in the catalog
    Unresolved(ToolchainId),
}

/// Everything a toolchain pop-up needs to render.
#[derive(Debug, Clone)]
pub struct ToolchainChoices {
    pub catalog: Arc<CatalogSnapshot>,
    pub selection: ToolchainSelection,
}

pub struct CompilationSettings {
    fields: Tracked<CompilationFields>,
    extra: toml::Table,
    catalog: Arc<dyn ToolchainCatalog>,
    fs: Arc<dyn FileSystem>,
    reserved: ReservedNames,
    base_dir: Option<PathBuf>,
}

impl CompilationSettings {
    pub fn new(catalog: Arc<dyn ToolchainCatalog>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fields: Tracked::default(),
            extra: toml::Table::new(),
            catalog,
            fs,
            reserved: ReservedNames::default(),
            base_dir: None,
        }
    }

    pub fn with_reserved_names(mut self, reserved: ReservedNames) -> Self {
        self.reserved = reserved;
        self
    }

    /// Directory relative search paths are resolved against.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        self.fields
            .refresh_derived(|f| f.search_paths.set_base_dir(Some(base_dir.clone())));
        self.base_dir = Some(base_dir);
        self
    }

    pub fn current(&self) -> &CompilationFields {
        self.fields.current()
    }

    pub fn committed(&self) -> &CompilationFields {
        self.fields.committed()
    }

    pub fn selected_toolchain(&self) -> Option<&ToolchainId> {
        self.fields.current().toolchain.as_ref()
    }

    pub fn select_toolchain(&mut self, id: impl Into<ToolchainId>) {
        let id = id.into();
        self.fields.edit(|f| f.toolchain = Some(id));
    }

    pub fn clear_toolchain(&mut self) {
        self.fields.edit(|f| f.toolchain = None);
    }

    /// Catalog snapshot plus where the current selection stands in it.
    pub fn toolchain_choices(&self) -> ToolchainChoices {
        let catalog = self.catalog.snapshot();
        let selection = match self.selected_toolchain() {
            None => ToolchainSelection::None,
            Some(id) => match catalog.find(id) {
                Some(version) => ToolchainSelection::Resolved(version.clone()),
                None => ToolchainSelection::Unresolved(id.clone()),
            },
        };
        ToolchainChoices { catalog, selection }
    }

    pub fn search_paths(&self) -> &PathList {
        &self.fields.current().search_paths
    }

    pub fn add_search_path(&mut self, raw: impl Into<String>) -> Result<(), PathListError> {
        let fs = Arc::clone(&self.fs);
        let raw = raw.into();
        self.fields.edit(|f| f.search_paths.add(raw, fs.as_ref()))
    }

    pub fn remove_search_path(&mut self, index: usize) -> Result<PathEntry, PathListError> {
        self.fields.edit(|f| f.search_paths.remove(index))
    }

    pub fn move_search_path(&mut self, from: usize, to: usize) -> Result<(), PathListError> {
        self.fields.edit(|f| f.search_paths.move_entry(from, to))
    }

    /// Re-check search path existence. Does not affect the dirty state.
    pub fn refresh_search_path_existence(&mut self) -> usize {
        let fs = Arc::clone(&self.fs);
        self.fields
            .refresh_derived(|f| f.search_paths.refresh_existence(fs.as_ref()))
    }

    pub fn output_file_name(&self) -> &str {
        &self.fields.current().output_file_name
    }

    pub fn set_output_file_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.fields.edit(|f| f.output_file_name = name);
    }

    /// Feed a file chooser result through the output name mutation.
    ///
    /// Only the file name component of a selected path is kept. Returns
    /// whether anything was applied.
    pub fn apply_chooser_outcome(&mut self, outcome: ChooserOutcome) -> bool {
        match outcome {
            ChooserOutcome::Cancelled => false,
            ChooserOutcome::Selected(path) => match path.file_name() {
                Some(name) => {
                    self.set_output_file_name(name.to_string_lossy().into_owned());
                    true
                }
                None => false,
            },
        }
    }

    fn fields_from_record(&self, record: CompilationRecord) -> CompilationFields {
        let (mut search_paths, dropped) = PathList::from_serializable(record.search_paths);
        if !dropped.is_empty() {
            warn!(
                dropped = ?dropped,
                "ignoring blank or duplicate search paths in persisted settings"
            );
        }
        search_paths.set_base_dir(self.base_dir.clone());
        search_paths.refresh_existence(self.fs.as_ref());

        CompilationFields {
            toolchain: record.toolchain_version_id.map(ToolchainId::from),
            search_paths,
            output_file_name: record.output_file_name,
        }
    }

    fn default_fields(&self) -> CompilationFields {
        let mut search_paths = PathList::new();
        search_paths.set_base_dir(self.base_dir.clone());
        CompilationFields {
            search_paths,
            ..CompilationFields::default()
        }
    }
}

impl SettingsDomain for CompilationSettings {
    fn kind(&self) -> SettingsKind {
        SettingsKind::Compilation
    }

    fn load(&mut self, record: Option<&toml::Value>) -> Result<(), MalformedPersistedData> {
        let decoded = decode_record::<CompilationRecord>(self.kind(), record, KNOWN_FIELDS);
        self.extra = decoded.extra;
        match decoded.fields {
            Ok(record) => {
                let fields = self.fields_from_record(record);
                self.fields.reset(fields);
                Ok(())
            }
            Err(err) => {
                let defaults = self.default_fields();
                self.fields.reset(defaults);
                Err(err)
            }
        }
    }

    fn validate(&self) -> Vec<ValidationIssue> {
        let current = self.fields.current();
        let mut issues = Vec::new();

        match &current.toolchain {
            None => issues.push(ValidationIssue::warning(
                FIELD_TOOLCHAIN,
                "no toolchain selected; the build system's default toolchain will be used",
            )),
            Some(id) => {
                if let Resolution::Unresolved(_) = self.catalog.resolve(id) {
                    issues.push(ValidationIssue::warning(
                        FIELD_TOOLCHAIN,
                        format!(
                            "toolchain '{}' is not installed; it may have been removed or not scanned yet",
                            id
                        ),
                    ));
                }
            }
        }

        for (index, entry) in current.search_paths.missing() {
            let message = if entry.is_resolved() {
                format!("search path '{}' does not exist on disk", entry.raw_path())
            } else {
                format!(
                    "search path '{}' could not be resolved to a location",
                    entry.raw_path()
                )
            };
            issues.push(ValidationIssue::warning(
                format!("{}[{}]", FIELD_SEARCH_PATHS, index),
                message,
            ));
        }

        if let Err(violation) = check_output_name(&current.output_file_name, &self.reserved) {
            issues.push(ValidationIssue::error(FIELD_OUTPUT, violation.to_string()));
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
        if let Some(id) = &committed.toolchain {
            table.insert(
                FIELD_TOOLCHAIN.to_string(),
                toml::Value::String(id.to_string()),
            );
        }
        table.insert(
            FIELD_SEARCH_PATHS.to_string(),
            toml::Value::Array(
                committed
                    .search_paths
                    .to_serializable()
                    .into_iter()
                    .map(toml::Value::String)
                    .collect(),
            ),
        );
        table.insert(
            FIELD_OUTPUT.to_string(),
            toml::Value::String(committed.output_file_name.clone()),
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

impl TypedDomain for CompilationSettings {
    const KIND: SettingsKind = SettingsKind::Compilation;
}
