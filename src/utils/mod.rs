//! Cross-cutting utilities.
//!
//! - [`fs`] - File system helpers (recursive removal, atomic writes, file lookup)

pub mod fs;
