//! Utility functions for string formatting used by the views.

pub mod format;

pub use format::{contains_ignore_case, format_optional, truncate_string};
