//! Compilation orchestration: compile, print filenames, export.

use anyhow::Result;
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::domain::{Compilation, CompileOptions, Filename};
use crate::error::CompileError;
use crate::utils::expand_glob;

/// Exit status reported when the target cannot be compiled (`-1` as a byte).
pub const INVALID_COMPILATION_EXIT_CODE: u8 = 255;

/// The compile and export collaborators driven by [`run`].
pub trait Toolchain {
    fn compile_all(&self, opts: &CompileOptions) -> crate::error::Result<Vec<Compilation>>;

    fn export_all(&self, compilations: &[Compilation], opts: &CompileOptions)
        -> Result<Vec<PathBuf>>;
}

/// Toolchain backed by the built-in platforms and exporters.
pub struct CryticToolchain;

impl Toolchain for CryticToolchain {
    fn compile_all(&self, opts: &CompileOptions) -> crate::error::Result<Vec<Compilation>> {
        crate::platform::compile_all(opts)
    }

    fn export_all(
        &self,
        compilations: &[Compilation],
        opts: &CompileOptions,
    ) -> Result<Vec<PathBuf>> {
        crate::export::export_all(compilations, opts)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Exported,
    InvalidCompilation,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Exported => ExitCode::SUCCESS,
            Outcome::InvalidCompilation => ExitCode::from(INVALID_COMPILATION_EXIT_CODE),
        }
    }
}

pub fn run<T, W>(toolchain: &T, opts: &CompileOptions, out: &mut W) -> Result<Outcome>
where
    T: Toolchain + ?Sized,
    W: Write,
{
    // Target selection belongs to the toolchain; the expansion is diagnostic only.
    match expand_glob(&opts.target) {
        Ok(globbed) => {
            tracing::debug!("{} matches {} path(s): {:?}", opts.target, globbed.len(), globbed)
        }
        Err(e) => tracing::debug!("{} is not a valid glob pattern: {}", opts.target, e),
    }

    let compilations = match toolchain.compile_all(opts) {
        Ok(compilations) => compilations,
        Err(CompileError::InvalidCompilation(message)) => {
            tracing::error!("{}", message);
            return Ok(Outcome::InvalidCompilation);
        }
        Err(e) => return Err(e.into()),
    };

    if opts.print_filenames {
        print_filenames(&compilations, out)?;
    }

    toolchain.export_all(&compilations, opts)?;
    Ok(Outcome::Exported)
}

/// Print the filename record of every contract, once per `(contract, filename)`.
///
/// Returns how many records were printed.
pub fn print_filenames<W: Write>(compilations: &[Compilation], out: &mut W) -> Result<usize> {
    let mut printed: HashSet<(String, Filename)> = HashSet::new();
    for compilation in compilations {
        for contract in compilation.contract_names() {
            let Some(filename) = compilation.filename_of_contract(contract) else {
                continue;
            };
            if !printed.insert((contract.to_string(), filename.clone())) {
                tracing::debug!("Already printed {} - {}", contract, filename);
                continue;
            }
            writeln!(out, "{} -> \n\tAbsolute: {}", contract, filename.absolute)?;
            writeln!(out, "\tRelative: {}", filename.relative)?;
            writeln!(out, "\tShort: {}", filename.short)?;
            writeln!(out, "\tUsed: {}", filename.used)?;
        }
    }
    Ok(printed.len())
}
