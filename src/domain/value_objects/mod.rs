//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod output_name;
mod project_id;
mod settings_kind;
mod toolchain;
mod validation;

pub use config_warning::ConfigWarning;
pub use output_name::{check_output_name, OutputNameViolation, ReservedNames};
pub use project_id::ProjectId;
pub use settings_kind::SettingsKind;
pub use toolchain::{compare_versions, Resolution, ToolchainId, ToolchainVersion};
pub use validation::{has_errors, Severity, ValidationIssue};
