//! Common test utilities for Rubicon integration and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project, home directory and toolchain roots
//! - Fixtures: Reusable settings documents

#![allow(dead_code)]

pub mod env;
pub mod fixtures;
pub mod windows;

pub use env::*;
pub use fixtures::*;
pub use windows::*;
