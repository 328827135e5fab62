//! Core types shared by every release tool.
//!
//! Currently this is the error model: [`ReleaseError`] for typed failures,
//! [`ErrorContext`] for rendering them, and [`exit_code`] for mapping them to
//! process exit statuses.

pub mod error;

pub use error::{ErrorContext, ReleaseError, exit_code, user_friendly_error};
