//! crytic-compile: compile smart-contract projects and export normalized artifacts
//!
//! Resolves options from the command line and a JSON config file, compiles
//! the target with the matching platform (`solc` or `truffle`), and exports
//! the results in the standard, solc or truffle layout.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod platform;
pub mod utils;

pub use domain::{Compilation, CompileOptions, Filename};
pub use error::CompileError;
