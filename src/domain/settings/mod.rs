//! Settings domains
//!
//! A settings domain is one editable category of project settings with its
//! own lifecycle:
//!
//! ```text
//! Clean --(field mutation)--> Dirty --(commit | revert)--> Clean
//! ```
//!
//! Domains never perform I/O from field setters. Loading takes an already
//! decoded record; persisting is the store's job.

mod compilation;
mod run;
mod tracked;

use std::any::Any;

use serde::de::DeserializeOwned;

use crate::domain::value_objects::{has_errors, SettingsKind, ValidationIssue};

pub use compilation::{
    ChooserOutcome, CompilationFields, CompilationSettings, ToolchainChoices, ToolchainSelection,
};
pub use run::{RunFields, RunSettings};
pub use tracked::Tracked;

/// A persisted sub-record could not be decoded into the domain's shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed {kind} settings: {message}")]
pub struct MalformedPersistedData {
    pub kind: SettingsKind,
    pub message: String,
}

/// A commit was refused because validation reported errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} settings failed validation with {} error(s)", error_count(issues))]
pub struct ValidationFailed {
    pub kind: SettingsKind,
    /// Every issue found, warnings included
    pub issues: Vec<ValidationIssue>,
}

fn error_count(issues: &[ValidationIssue]) -> usize {
    issues.iter().filter(|i| i.is_error()).count()
}

/// Lifecycle contract implemented by each settings category.
pub trait SettingsDomain: Any + Send {
    fn kind(&self) -> SettingsKind;

    /// Populate fields and snapshot from a persisted sub-record (`None` when
    /// the document has no record for this kind). Always leaves the domain
    /// clean; on error the domain holds its defaults.
    fn load(&mut self, record: Option<&toml::Value>) -> Result<(), MalformedPersistedData>;

    /// Pure check of the in-memory fields, in field order.
    fn validate(&self) -> Vec<ValidationIssue>;

    /// Copy fields into the snapshot unless `validate` reports an error.
    fn commit(&mut self) -> Result<(), ValidationFailed>;

    /// Discard edits and restore the snapshot.
    fn revert(&mut self);

    fn is_dirty(&self) -> bool;

    /// The committed snapshot as a persisted sub-record, including keys this
    /// version does not understand.
    fn to_record(&self) -> toml::Table;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A domain type bound to exactly one kind, for typed store access.
pub trait TypedDomain: SettingsDomain {
    const KIND: SettingsKind;
}

/// A sub-record split into its decoded known keys and everything else.
pub(crate) struct DecodedRecord<R> {
    pub fields: Result<R, MalformedPersistedData>,
    /// Keys outside `known`, kept verbatim even when `fields` failed
    pub extra: toml::Table,
}

/// Decode the `known` keys of a sub-record into `R`.
///
/// Unknown keys never pass through serde, so values such as datetimes keep
/// their exact TOML type. A missing record yields the record type's defaults.
pub(crate) fn decode_record<R>(
    kind: SettingsKind,
    record: Option<&toml::Value>,
    known: &[&str],
) -> DecodedRecord<R>
where
    R: DeserializeOwned + Default,
{
    let table = match record {
        None => {
            return DecodedRecord {
                fields: Ok(R::default()),
                extra: toml::Table::new(),
            }
        }
        Some(toml::Value::Table(table)) => table,
        Some(other) => {
            return DecodedRecord {
                fields: Err(MalformedPersistedData {
                    kind,
                    message: format!("expected a table, found {}", other.type_str()),
                }),
                extra: toml::Table::new(),
            }
        }
    };

    let (known_keys, extra): (toml::Table, toml::Table) = table
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .partition(|(k, _)| known.contains(&k.as_str()));

    let fields = toml::Value::Table(known_keys)
        .try_into()
        .map_err(|e: toml::de::Error| MalformedPersistedData {
            kind,
            message: e.message().to_string(),
        });
    DecodedRecord { fields, extra }
}

/// Commit `fields` if `issues` holds no error.
pub(crate) fn commit_validated<T: Clone + PartialEq>(
    kind: SettingsKind,
    fields: &mut Tracked<T>,
    issues: Vec<ValidationIssue>,
) -> Result<(), ValidationFailed> {
    if has_errors(&issues) {
        tracing::debug!(%kind, issues = issues.len(), "commit refused");
        return Err(ValidationFailed { kind, issues });
    }
    fields.commit();
    tracing::debug!(%kind, "settings committed");
    Ok(())
}
