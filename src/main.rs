//! crytic-compile: compile smart-contract projects and export normalized artifacts

use anyhow::Result;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    crytic_compile::cli::run()
}
