//! Resolved run configuration

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "crytic.config.json";
pub const DEFAULT_EXPORT_DIR: &str = "crytic-export";
pub const DEFAULT_SOLC: &str = "solc";
pub const DEFAULT_TRUFFLE_BUILD_DIRECTORY: &str = "build/contracts";

/// Non-default export layouts. `None` in [`CompileOptions::export_format`]
/// selects the standard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Solc,
    Truffle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Solc,
    Truffle,
}

impl PlatformKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PlatformKind::Solc => "solc",
            PlatformKind::Truffle => "truffle",
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved argument set: CLI values overlaid with the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    pub target: String,
    pub config_file: PathBuf,
    pub export_format: Option<ExportFormat>,
    pub export_dir: PathBuf,
    pub export_src: bool,
    pub print_filenames: bool,

    pub compile_force_framework: Option<PlatformKind>,
    pub compile_remove_metadata: bool,
    pub ignore_compile: bool,

    pub solc: String,
    pub solc_args: Option<String>,
    pub solc_remaps: Option<String>,
    pub solc_disable_warnings: bool,
    pub solc_working_dir: Option<PathBuf>,

    pub truffle_ignore_compile: bool,
    pub truffle_build_directory: String,
    pub truffle_version: Option<String>,
    pub npx_disable: bool,
}

impl CompileOptions {
    /// Options for `target` with every other value at its default.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            export_format: None,
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            export_src: false,
            print_filenames: false,
            compile_force_framework: None,
            compile_remove_metadata: false,
            ignore_compile: false,
            solc: DEFAULT_SOLC.to_string(),
            solc_args: None,
            solc_remaps: None,
            solc_disable_warnings: false,
            solc_working_dir: None,
            truffle_ignore_compile: false,
            truffle_build_directory: DEFAULT_TRUFFLE_BUILD_DIRECTORY.to_string(),
            truffle_version: None,
            npx_disable: false,
        }
    }

    /// Extra `solc` arguments split on whitespace.
    pub fn solc_args_list(&self) -> Vec<String> {
        split_words(self.solc_args.as_deref())
    }

    /// Remappings (`prefix=path`) split on whitespace.
    pub fn solc_remaps_list(&self) -> Vec<String> {
        split_words(self.solc_remaps.as_deref())
    }
}

fn split_words(value: Option<&str>) -> Vec<String> {
    value.map(|s| s.split_whitespace().map(str::to_string).collect()).unwrap_or_default()
}
