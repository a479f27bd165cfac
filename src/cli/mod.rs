//! Command-line interface for crytic-compile
//!
//! Parses arguments, overlays the JSON config file, then compiles and exports.

use anyhow::Result;
use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{resolve_options, ConfigKey, ExplicitOptions};
use crate::domain::options::{DEFAULT_CONFIG_FILE, DEFAULT_EXPORT_DIR};
use crate::domain::{CompileOptions, ExportFormat};

pub mod compile;
mod platform_args;

pub use compile::{CryticToolchain, Outcome, Toolchain};
pub use platform_args::PlatformArgs;

/// Compile smart-contract projects and export normalized artifacts
#[derive(Parser, Debug)]
#[command(name = "crytic-compile")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "crytic-compile contract.sol [flag]")]
pub struct Cli {
    /// Compilation target: a .sol file, a project directory or a glob pattern
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Provide a config file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    /// Export json with non crytic-compile format
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub export_format: Option<ExportFormat>,

    /// Export directory
    #[arg(long, value_name = "DIR", default_value = DEFAULT_EXPORT_DIR)]
    pub export_dir: PathBuf,

    /// Include source code when exporting
    #[arg(long)]
    pub export_src: bool,

    /// Print all the filenames
    #[arg(long)]
    pub print_filenames: bool,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(flatten)]
    pub platform: PlatformArgs,
}

impl Cli {
    pub fn into_options(self) -> CompileOptions {
        let platform = self.platform;
        CompileOptions {
            target: self.target,
            config_file: self.config_file,
            export_format: self.export_format,
            export_dir: self.export_dir,
            export_src: self.export_src,
            print_filenames: self.print_filenames,
            compile_force_framework: platform.compile_force_framework,
            compile_remove_metadata: platform.compile_remove_metadata,
            ignore_compile: platform.ignore_compile,
            solc: platform.solc,
            solc_args: platform.solc_args,
            solc_remaps: platform.solc_remaps,
            solc_disable_warnings: platform.solc_disable_warnings,
            solc_working_dir: platform.solc_working_dir,
            truffle_ignore_compile: platform.truffle_ignore_compile,
            truffle_build_directory: platform.truffle_build_directory,
            truffle_version: platform.truffle_version,
            npx_disable: platform.npx_disable,
        }
    }
}

/// Config-capable options the user typed on the command line.
pub fn explicit_options(matches: &ArgMatches) -> ExplicitOptions {
    ConfigKey::ALL
        .iter()
        .copied()
        .filter(|key| matches.value_source(key.as_str()) == Some(ValueSource::CommandLine))
        .collect()
}

/// Install the stderr subscriber for the duration of the run.
///
/// `RUST_LOG` in the environment always takes precedence; otherwise INFO, or
/// DEBUG with `--verbose`. Dropping the guard flushes and removes it.
pub fn init_logging(verbose: bool) -> tracing::subscriber::DefaultGuard {
    let filter = if verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(std::io::stderr().is_terminal()))
        .with(filter)
        .set_default()
}

pub fn run() -> Result<ExitCode> {
    run_from(std::env::args_os())
}

pub fn run_from<I, T>(args: I) -> Result<ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let mut command = Cli::command();

    if args.len() <= 1 {
        eprintln!("{}", command.render_help());
        return Ok(ExitCode::from(1));
    }

    let matches = command.get_matches_from(args);
    let explicit = explicit_options(&matches);
    let cli = Cli::from_arg_matches(&matches)?;

    let _logging = init_logging(cli.verbose);
    let opts = resolve_options(cli.into_options(), &explicit)?;

    let outcome = compile::run(&CryticToolchain, &opts, &mut std::io::stdout().lock())?;
    Ok(outcome.exit_code())
}
