//! Toolchain discovery implementations.

mod ruby_install;

pub use ruby_install::{display_name_for, RubyInstallScanner};
