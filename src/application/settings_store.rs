//! Project settings store
//!
//! Owns one domain per settings kind for a project. Domains are created and
//! loaded from the persisted document the first time they are asked for;
//! kinds nobody touched are written back exactly as they were read.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{SettingsDocument, DOCUMENT_VERSION};
use crate::domain::ports::{FileSystem, RepositoryError, SettingsRepository, ToolchainCatalog};
use crate::domain::settings::{
    CompilationSettings, MalformedPersistedData, RunSettings, SettingsDomain, TypedDomain,
    ValidationFailed,
};
use crate::domain::value_objects::{has_errors, ReservedNames, SettingsKind, ValidationIssue};

/// Creates an unloaded domain for a kind.
pub trait DomainFactory: Send {
    fn create(&self, kind: SettingsKind) -> Box<dyn SettingsDomain>;
}

impl<F> DomainFactory for F
where
    F: Fn(SettingsKind) -> Box<dyn SettingsDomain> + Send,
{
    fn create(&self, kind: SettingsKind) -> Box<dyn SettingsDomain> {
        self(kind)
    }
}

/// The shipped domains, wired to a project's catalog and file system.
pub struct ProjectDomainFactory {
    catalog: Arc<dyn ToolchainCatalog>,
    fs: Arc<dyn FileSystem>,
    reserved: ReservedNames,
    base_dir: PathBuf,
}

impl ProjectDomainFactory {
    pub fn new(
        catalog: Arc<dyn ToolchainCatalog>,
        fs: Arc<dyn FileSystem>,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            catalog,
            fs,
            reserved: ReservedNames::default(),
            base_dir: base_dir.into(),
        }
    }

    pub fn with_reserved_names(mut self, reserved: ReservedNames) -> Self {
        self.reserved = reserved;
        self
    }
}

impl DomainFactory for ProjectDomainFactory {
    fn create(&self, kind: SettingsKind) -> Box<dyn SettingsDomain> {
        match kind {
            SettingsKind::Compilation => Box::new(
                CompilationSettings::new(Arc::clone(&self.catalog), Arc::clone(&self.fs))
                    .with_reserved_names(self.reserved.clone())
                    .with_base_dir(self.base_dir.clone()),
            ),
            SettingsKind::Run => Box::new(RunSettings::new()),
        }
    }
}

/// Something was wrong with the persisted data but the store recovered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadWarning {
    #[error("settings file {} is unreadable and was ignored: {message}", path.display())]
    CorruptedDocument { path: PathBuf, message: String },

    #[error("settings file was written by a newer version (format {found}); unknown keys are kept")]
    NewerVersion { found: i64 },

    #[error("{0}; defaults were used")]
    MalformedRecord(MalformedPersistedData),
}

/// `commit_all` refused: at least one loaded domain reported an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("commit refused: {} settings domain(s) failed validation", failures.len())]
pub struct CommitAllError {
    pub failures: BTreeMap<SettingsKind, ValidationFailed>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("uncommitted changes in {}; commit or revert before saving", kind_list(.0))]
    UncommittedChanges(Vec<SettingsKind>),

    #[error(transparent)]
    CommitRefused(#[from] CommitAllError),

    #[error("domain factory built {found} settings when {expected} was requested")]
    KindMismatch {
        expected: SettingsKind,
        found: SettingsKind,
    },

    #[error("{kind} settings are not of the requested type")]
    UnexpectedDomainType { kind: SettingsKind },
}

fn kind_list(kinds: &[SettingsKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct ProjectSettingsStore {
    repository: Arc<dyn SettingsRepository>,
    factory: Box<dyn DomainFactory>,
    /// Last document read or written; `None` until first needed
    document: Option<SettingsDocument>,
    domains: BTreeMap<SettingsKind, Box<dyn SettingsDomain>>,
    warnings: Vec<LoadWarning>,
}

impl ProjectSettingsStore {
    pub fn new(repository: Arc<dyn SettingsRepository>, factory: Box<dyn DomainFactory>) -> Self {
        Self {
            repository,
            factory,
            document: None,
            domains: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn location(&self) -> &Path {
        self.repository.location()
    }

    /// The domain for `kind`, loading it on first access.
    pub fn domain_mut(
        &mut self,
        kind: SettingsKind,
    ) -> Result<&mut dyn SettingsDomain, StoreError> {
        let Self {
            repository,
            factory,
            document,
            domains,
            warnings,
        } = self;

        let domain = match domains.entry(kind) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let document = ensure_document(document, repository.as_ref(), warnings)?;
                let mut domain = factory.create(kind);
                if domain.kind() != kind {
                    return Err(StoreError::KindMismatch {
                        expected: kind,
                        found: domain.kind(),
                    });
                }
                if let Err(err) = domain.load(document.record(kind)) {
                    warn!(%kind, error = %err, "malformed settings record, using defaults");
                    warnings.push(LoadWarning::MalformedRecord(err));
                }
                debug!(%kind, "settings domain loaded");
                entry.insert(domain)
            }
        };
        Ok(domain.as_mut())
    }

    /// Typed access, e.g. `store.domain::<CompilationSettings>()`.
    pub fn domain<D: TypedDomain>(&mut self) -> Result<&mut D, StoreError> {
        self.domain_mut(D::KIND)?
            .as_any_mut()
            .downcast_mut::<D>()
            .ok_or(StoreError::UnexpectedDomainType { kind: D::KIND })
    }

    /// A domain that has already been loaded, without loading it.
    pub fn loaded(&self, kind: SettingsKind) -> Option<&dyn SettingsDomain> {
        self.domains.get(&kind).map(|d| d.as_ref())
    }

    pub fn loaded_kinds(&self) -> impl Iterator<Item = SettingsKind> + '_ {
        self.domains.keys().copied()
    }

    /// Load every kind. Useful before rendering a full view.
    pub fn load_all(&mut self) -> Result<(), StoreError> {
        for kind in SettingsKind::ALL {
            self.domain_mut(kind)?;
        }
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.domains.values().any(|d| d.is_dirty())
    }

    pub fn dirty_kinds(&self) -> Vec<SettingsKind> {
        self.domains
            .iter()
            .filter(|(_, d)| d.is_dirty())
            .map(|(kind, _)| *kind)
            .collect()
    }

    /// Issues of every loaded domain.
    pub fn validate_all(&self) -> BTreeMap<SettingsKind, Vec<ValidationIssue>> {
        self.domains
            .iter()
            .map(|(kind, d)| (*kind, d.validate()))
            .collect()
    }

    /// Commit every loaded domain, or none of them.
    pub fn commit_all(&mut self) -> Result<(), CommitAllError> {
        let failures: BTreeMap<SettingsKind, ValidationFailed> = self
            .validate_all()
            .into_iter()
            .filter(|(_, issues)| has_errors(issues))
            .map(|(kind, issues)| (kind, ValidationFailed { kind, issues }))
            .collect();
        if !failures.is_empty() {
            info!(failed = failures.len(), "commit refused");
            return Err(CommitAllError { failures });
        }

        let mut failures = BTreeMap::new();
        for (kind, domain) in self.domains.iter_mut() {
            if domain.is_dirty() {
                if let Err(err) = domain.commit() {
                    failures.insert(*kind, err);
                }
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(CommitAllError { failures })
        }
    }

    pub fn revert_all(&mut self) {
        for domain in self.domains.values_mut() {
            domain.revert();
        }
    }

    /// Persist committed snapshots. Refuses while any loaded domain is dirty.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let dirty = self.dirty_kinds();
        if !dirty.is_empty() {
            return Err(StoreError::UncommittedChanges(dirty));
        }

        let current = ensure_document(
            &mut self.document,
            self.repository.as_ref(),
            &mut self.warnings,
        )?;
        let mut next = current.clone();
        if next.version().is_none() {
            next = with_version(next);
        }
        for (kind, domain) in &self.domains {
            next.set_record(*kind, domain.to_record());
        }

        self.repository.save(&next)?;
        info!(path = %self.repository.location().display(), "settings saved");
        self.document = Some(next);
        Ok(())
    }

    /// `commit_all` then `save`.
    pub fn commit_and_save(&mut self) -> Result<(), StoreError> {
        self.commit_all()?;
        self.save()
    }

    pub fn load_warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }
}

impl std::fmt::Debug for ProjectSettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectSettingsStore")
            .field("location", &self.repository.location())
            .field("loaded", &self.domains.keys().collect::<Vec<_>>())
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

fn ensure_document<'a>(
    slot: &'a mut Option<SettingsDocument>,
    repository: &dyn SettingsRepository,
    warnings: &mut Vec<LoadWarning>,
) -> Result<&'a SettingsDocument, RepositoryError> {
    let document = match slot.take() {
        Some(document) => document,
        None => read_document(repository, warnings)?,
    };
    Ok(slot.insert(document))
}

fn read_document(
    repository: &dyn SettingsRepository,
    warnings: &mut Vec<LoadWarning>,
) -> Result<SettingsDocument, RepositoryError> {
    match repository.load() {
        Ok(Some(document)) => {
            if document.is_newer_than_supported() {
                let found = document.version().unwrap_or_default();
                warn!(found, supported = DOCUMENT_VERSION, "settings written by a newer version");
                warnings.push(LoadWarning::NewerVersion { found });
            }
            Ok(document)
        }
        Ok(None) => {
            debug!(path = %repository.location().display(), "no settings file, using defaults");
            Ok(SettingsDocument::new())
        }
        Err(RepositoryError::Corrupted { path, message }) => {
            warn!(
                path = %path.display(),
                %message,
                "settings file corrupted, starting from defaults"
            );
            warnings.push(LoadWarning::CorruptedDocument { path, message });
            Ok(SettingsDocument::new())
        }
        Err(err) => Err(err),
    }
}

fn with_version(document: SettingsDocument) -> SettingsDocument {
    let mut table = document.into_table();
    table.insert("version".to_string(), toml::Value::Integer(DOCUMENT_VERSION));
    SettingsDocument::from_table(table)
}
