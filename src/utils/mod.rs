//! Shared path and glob helpers.

pub mod glob;
pub mod paths;

pub use glob::expand_glob;
pub use paths::{absolutize, convert_filename, normalize_path};
