//! Settings document entity
//!
//! The decoded persisted project settings: a keyed record with one
//! sub-record per settings kind. Keys this version does not know about, at
//! any level, are carried through untouched.

use crate::domain::value_objects::SettingsKind;

/// Document format version written by this build.
pub const DOCUMENT_VERSION: i64 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsDocument {
    table: toml::Table,
}

impl SettingsDocument {
    pub fn new() -> Self {
        let mut table = toml::Table::new();
        table.insert("version".to_string(), toml::Value::Integer(DOCUMENT_VERSION));
        Self { table }
    }

    pub fn from_table(table: toml::Table) -> Self {
        Self { table }
    }

    /// Format version, if the document declares a valid one.
    pub fn version(&self) -> Option<i64> {
        self.table.get("version").and_then(toml::Value::as_integer)
    }

    /// True when the document was written by a newer format version.
    pub fn is_newer_than_supported(&self) -> bool {
        self.version().is_some_and(|v| v > DOCUMENT_VERSION)
    }

    pub fn record(&self, kind: SettingsKind) -> Option<&toml::Value> {
        self.table.get(kind.record_key())
    }

    pub fn set_record(&mut self, kind: SettingsKind, record: toml::Table) {
        self.table
            .insert(kind.record_key().to_string(), toml::Value::Table(record));
    }

    pub fn as_table(&self) -> &toml::Table {
        &self.table
    }

    pub fn into_table(self) -> toml::Table {
        self.table
    }
}

impl Default for SettingsDocument {
    fn default() -> Self {
        Self::new()
    }
}
