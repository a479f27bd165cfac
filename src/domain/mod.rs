//! Core domain types shared by the resolver, platforms and exporters.

pub mod compilation;
pub mod options;

pub use compilation::{Compilation, CompilerInfo, ContractUnit, Filename};
pub use options::{CompileOptions, ExportFormat, PlatformKind};
