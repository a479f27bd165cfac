//! `solc` platform: compile a single file with `--combined-json`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::Platform;
use crate::domain::{Compilation, CompileOptions, CompilerInfo, ContractUnit, PlatformKind};
use crate::error::{CompileError, Result};
use crate::utils::{absolutize, convert_filename};

const COMBINED_JSON: &str = "abi,ast,bin,bin-runtime,srcmap,srcmap-runtime,userdoc,devdoc,hashes";

static VERSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+\.\d+\.\d+)").unwrap());

pub struct Solc;

impl Platform for Solc {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Solc
    }

    fn is_supported(&self, target: &Path) -> bool {
        target.is_file() && target.extension().is_some_and(|ext| ext == "sol")
    }

    fn compile(&self, target: &str, opts: &CompileOptions) -> Result<Compilation> {
        let working_dir =
            absolutize(opts.solc_working_dir.as_deref().unwrap_or_else(|| Path::new(".")));
        let output = run_solc(target, opts, &working_dir)?;

        let version = match output.get("version").and_then(Value::as_str) {
            Some(raw) => parse_version(raw)
                .ok_or_else(|| CompileError::invalid(format!("Unknown solc version: {raw}")))?,
            None => solc_version(&opts.solc)?,
        };
        let mut compiler = CompilerInfo::new("solc", version);
        compiler.optimized = Some(opts.solc_args_list().iter().any(|arg| arg == "--optimize"));

        parse_combined_json(target, &output, working_dir, compiler)
    }
}

fn run_solc(target: &str, opts: &CompileOptions, working_dir: &Path) -> Result<Value> {
    let mut cmd = Command::new(&opts.solc);
    cmd.arg("--combined-json")
        .arg(COMBINED_JSON)
        .arg("--allow-paths")
        .arg(".")
        .args(opts.solc_remaps_list())
        .args(opts.solc_args_list())
        .arg(target)
        .current_dir(working_dir);

    tracing::debug!("Running {:?}", cmd);
    let output = cmd.output().map_err(|e| spawn_error(&opts.solc, e))?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        return Err(CompileError::invalid(format!("Invalid solc compilation {}", stderr.trim())));
    }
    if !opts.solc_disable_warnings && !stderr.trim().is_empty() {
        tracing::warn!("{}", stderr.trim());
    }

    serde_json::from_slice(&output.stdout).map_err(|e| {
        CompileError::invalid(format!("Unable to parse solc output for {target}: {e}"))
    })
}

fn solc_version(solc: &str) -> Result<String> {
    let output = Command::new(solc).arg("--version").output().map_err(|e| spawn_error(solc, e))?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find(|line| line.starts_with("Version:"))
        .and_then(parse_version)
        .ok_or_else(|| CompileError::invalid(format!("Unable to detect the version of {solc}")))
}

fn spawn_error(program: &str, e: std::io::Error) -> CompileError {
    if e.kind() == ErrorKind::NotFound {
        CompileError::invalid(format!("{program} was not found. Is it installed and on PATH?"))
    } else {
        CompileError::invalid(format!("Failed to execute {program}: {e}"))
    }
}

/// Extract `x.y.z` from strings like `0.8.19+commit.7dd6d404.Linux.g++`.
pub(crate) fn parse_version(raw: &str) -> Option<String> {
    VERSION_RE.captures(raw).map(|caps| caps[1].to_string())
}

/// Normalize solc `--combined-json` output into a [`Compilation`].
pub fn parse_combined_json(
    target: &str,
    output: &Value,
    working_dir: PathBuf,
    compiler: CompilerInfo,
) -> Result<Compilation> {
    let contracts = output
        .get("contracts")
        .and_then(Value::as_object)
        .ok_or_else(|| CompileError::invalid(format!("solc produced no contracts for {target}")))?;

    let mut compilation = Compilation::new(target, PlatformKind::Solc, working_dir, compiler);

    for (key, info) in contracts {
        // Very old solc reports bare contract names; those belong to the compiled file.
        let (path, name) = key.rsplit_once(':').unwrap_or((target, key.as_str()));
        let filename = convert_filename(path, &compilation.working_dir);

        let mut unit = ContractUnit::new(name, filename);
        unit.abi = embedded_json(info, "abi", key)?.unwrap_or(unit.abi);
        unit.userdoc = embedded_json(info, "userdoc", key)?.unwrap_or(unit.userdoc);
        unit.devdoc = embedded_json(info, "devdoc", key)?.unwrap_or(unit.devdoc);
        unit.bytecode_init = string_field(info, "bin");
        unit.bytecode_runtime = string_field(info, "bin-runtime");
        unit.srcmap_init = string_field(info, "srcmap");
        unit.srcmap_runtime = string_field(info, "srcmap-runtime");
        if let Some(hashes) = info.get("hashes").and_then(Value::as_object) {
            unit.hashes = hashes
                .iter()
                .filter_map(|(sig, sel)| sel.as_str().map(|s| (sig.clone(), s.to_string())))
                .collect();
        }
        compilation.add_contract(unit);
    }

    if let Some(sources) = output.get("sources").and_then(Value::as_object) {
        for (path, source) in sources {
            if let Some(ast) = source.get("AST").or_else(|| source.get("ast")) {
                let filename = convert_filename(path, &compilation.working_dir);
                compilation.add_ast(filename, ast.clone());
            }
        }
    }

    Ok(compilation)
}

/// Legacy solc emits ABI and natspec as JSON encoded inside strings.
fn embedded_json(info: &Value, field: &str, key: &str) -> Result<Option<Value>> {
    match info.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => serde_json::from_str(s).map(Some).map_err(|e| {
            CompileError::invalid(format!("Unable to parse {field} of {key}: {e}"))
        }),
        Some(other) => Ok(Some(other.clone())),
    }
}

fn string_field(info: &Value, key: &str) -> String {
    info.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}
