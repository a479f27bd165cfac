//! Platform-specific command-line options

use clap::Args;
use std::path::PathBuf;

use crate::domain::options::{DEFAULT_SOLC, DEFAULT_TRUFFLE_BUILD_DIRECTORY};
use crate::domain::PlatformKind;

#[derive(Args, Debug)]
pub struct PlatformArgs {
    /// Force the compile to a given framework
    #[arg(long, value_enum, value_name = "PLATFORM", help_heading = "Compile options")]
    pub compile_force_framework: Option<PlatformKind>,

    /// Remove the metadata trailer from the bytecodes
    #[arg(long, help_heading = "Compile options")]
    pub compile_remove_metadata: bool,

    /// Do not run the framework's compile step, use existing build artifacts
    #[arg(long, help_heading = "Compile options")]
    pub ignore_compile: bool,

    /// solc binary to use
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SOLC, help_heading = "Solc options")]
    pub solc: String,

    /// Extra arguments passed to solc, e.g. '--optimize'
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true, help_heading = "Solc options")]
    pub solc_args: Option<String>,

    /// Remappings passed to solc, space separated
    #[arg(long, value_name = "REMAPS", help_heading = "Solc options")]
    pub solc_remaps: Option<String>,

    /// Do not log solc warnings
    #[arg(long, help_heading = "Solc options")]
    pub solc_disable_warnings: bool,

    /// Directory solc is run from
    #[arg(long, value_name = "DIR", help_heading = "Solc options")]
    pub solc_working_dir: Option<PathBuf>,

    /// Do not run `truffle compile`
    #[arg(long, help_heading = "Truffle options")]
    pub truffle_ignore_compile: bool,

    /// Directory holding the truffle artifacts, relative to the project
    #[arg(
        long,
        value_name = "DIR",
        default_value = DEFAULT_TRUFFLE_BUILD_DIRECTORY,
        help_heading = "Truffle options"
    )]
    pub truffle_build_directory: String,

    /// Truffle version to run through npx
    #[arg(long, value_name = "VERSION", help_heading = "Truffle options")]
    pub truffle_version: Option<String>,

    /// Run truffle directly instead of through npx
    #[arg(long, help_heading = "Truffle options")]
    pub npx_disable: bool,
}
