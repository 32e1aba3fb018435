//! Domain Entities
//!
//! Core domain objects with identity and lifecycle.

mod catalog;
mod document;
mod path_list;

pub use catalog::{CacheState, CatalogSnapshot};
pub use document::{SettingsDocument, DOCUMENT_VERSION};
pub use path_list::{PathEntry, PathList, PathListError};
