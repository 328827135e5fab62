//! File system utilities used by the release tools.
//!
//! # Modules
//!
//! - [`dirs`] - Creating, replacing and recursively removing directories
//! - [`atomic`] - Full-replace file writes and JSON helpers
//! - [`discovery`] - Pattern-based file lookup and permission changes

pub mod atomic;
pub mod dirs;
pub mod discovery;

pub use atomic::{atomic_write, read_json_file, write_json_file};
pub use dirs::{ensure_dir, recreate_dir, remove_dir_all};
pub use discovery::{find_files, set_mode};
