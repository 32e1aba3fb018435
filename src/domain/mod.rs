//! Domain Layer
//!
//! Settings model and rules, free of concrete I/O.
//!
//! ## Structure
//!
//! - `entities/` - PathList, catalog snapshots, the settings document
//! - `value_objects/` - Ids, kinds, validation issues, naming rules
//! - `settings/` - The settings domain lifecycle and its implementations
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No implicit I/O** - file system access goes through the `FileSystem`
//!    port and only happens in explicit, caller-invoked operations
//! 2. **Pure validation** - `validate()` never mutates or touches the disk
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod settings;
pub mod value_objects;
