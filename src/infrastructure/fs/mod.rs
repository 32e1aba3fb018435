//! File System Implementations
//!
//! Concrete implementations of the FileSystem port.

mod home;
mod local;
mod memory;

pub use home::{rubicon_home_dir, RUBICON_TEST_HOME_VAR};
pub use local::{atomic_write, expand_home, LocalFs};
pub use memory::MemoryFs;
