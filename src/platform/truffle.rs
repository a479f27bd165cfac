//! `truffle` platform: build with truffle, then read its per-contract artifacts.

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::solc::parse_version;
use super::Platform;
use crate::domain::{Compilation, CompileOptions, CompilerInfo, ContractUnit, PlatformKind};
use crate::error::{CompileError, Result};
use crate::utils::{absolutize, convert_filename};

const CONFIG_FILES: &[&str] = &["truffle-config.js", "truffle.js"];

pub struct Truffle;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TruffleArtifact {
    contract_name: String,
    #[serde(default)]
    abi: Value,
    #[serde(default)]
    bytecode: String,
    #[serde(default)]
    deployed_bytecode: String,
    #[serde(default)]
    source_map: String,
    #[serde(default)]
    deployed_source_map: String,
    #[serde(default)]
    source_path: String,
    #[serde(default)]
    ast: Option<Value>,
    #[serde(default)]
    userdoc: Option<Value>,
    #[serde(default)]
    devdoc: Option<Value>,
    #[serde(default)]
    compiler: Option<TruffleCompiler>,
}

#[derive(Debug, Deserialize)]
struct TruffleCompiler {
    name: String,
    version: String,
}

impl Platform for Truffle {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Truffle
    }

    fn is_supported(&self, target: &Path) -> bool {
        target.is_dir() && CONFIG_FILES.iter().any(|name| target.join(name).is_file())
    }

    fn compile(&self, target: &str, opts: &CompileOptions) -> Result<Compilation> {
        let project = absolutize(Path::new(target));

        if opts.ignore_compile || opts.truffle_ignore_compile {
            tracing::debug!("Skipping truffle compile for {}", project.display());
        } else {
            run_truffle_compile(&project, opts)?;
        }

        let build_dir = project.join(&opts.truffle_build_directory);
        if !build_dir.is_dir() {
            return Err(CompileError::invalid(format!(
                "No truffle build directory found at {}. Did you run `truffle compile`?",
                build_dir.display()
            )));
        }

        let artifacts = list_artifacts(&build_dir)?;
        if artifacts.is_empty() {
            return Err(CompileError::invalid(format!(
                "No truffle artifacts found in {}",
                build_dir.display()
            )));
        }

        let mut compilation = Compilation::new(
            target,
            PlatformKind::Truffle,
            project.clone(),
            CompilerInfo::new("solc", "unknown"),
        );

        for path in artifacts {
            let content = fs::read_to_string(&path)?;
            let artifact: TruffleArtifact = serde_json::from_str(&content).map_err(|e| {
                CompileError::invalid(format!("Invalid truffle artifact {}: {e}", path.display()))
            })?;

            if let Some(compiler) = &artifact.compiler {
                compilation.compiler.name = compiler.name.clone();
                compilation.compiler.version =
                    parse_version(&compiler.version).unwrap_or_else(|| compiler.version.clone());
            }
            add_artifact(&mut compilation, &project, artifact);
        }

        Ok(compilation)
    }
}

fn run_truffle_compile(project: &Path, opts: &CompileOptions) -> Result<()> {
    let (program, mut args) = if opts.npx_disable {
        ("truffle", Vec::new())
    } else {
        let package = match &opts.truffle_version {
            Some(version) => format!("truffle@{version}"),
            None => "truffle".to_string(),
        };
        ("npx", vec![package])
    };
    args.extend(["compile".to_string(), "--all".to_string()]);

    tracing::info!("'{} {}' running", program, args.join(" "));
    let output =
        Command::new(program).args(&args).current_dir(project).output().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                CompileError::invalid(format!("{program} was not found. Is truffle installed?"))
            } else {
                CompileError::invalid(format!("Failed to execute {program}: {e}"))
            }
        })?;

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CompileError::invalid(format!(
            "truffle compile failed: {}{}",
            stdout.trim(),
            stderr.trim()
        )));
    }
    Ok(())
}

fn list_artifacts(build_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut artifacts = Vec::new();
    for entry in fs::read_dir(build_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            artifacts.push(path);
        }
    }
    artifacts.sort();
    Ok(artifacts)
}

fn add_artifact(compilation: &mut Compilation, project: &Path, artifact: TruffleArtifact) {
    let filename = convert_filename(&artifact.source_path, project);

    let mut unit = ContractUnit::new(artifact.contract_name, filename.clone());
    if !artifact.abi.is_null() {
        unit.abi = artifact.abi;
    }
    unit.bytecode_init = strip_hex_prefix(&artifact.bytecode);
    unit.bytecode_runtime = strip_hex_prefix(&artifact.deployed_bytecode);
    unit.srcmap_init = artifact.source_map;
    unit.srcmap_runtime = artifact.deployed_source_map;
    if let Some(userdoc) = artifact.userdoc {
        unit.userdoc = userdoc;
    }
    if let Some(devdoc) = artifact.devdoc {
        unit.devdoc = devdoc;
    }
    compilation.add_contract(unit);

    if let Some(ast) = artifact.ast {
        compilation.add_ast(filename, ast);
    }
}

fn strip_hex_prefix(code: &str) -> String {
    code.strip_prefix("0x").unwrap_or(code).to_string()
}
