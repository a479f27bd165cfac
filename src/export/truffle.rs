//! Truffle artifact export: one file per contract.

use anyhow::Result;
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use super::{claim_path, write_json};
use crate::domain::{Compilation, CompileOptions, ContractUnit};

pub fn export(
    compilation: &Compilation,
    opts: &CompileOptions,
    taken: &mut HashSet<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for contract in compilation.contracts() {
        let path = claim_path(&opts.export_dir, &contract.name, taken);
        write_json(&path, &artifact(compilation, contract, opts.export_src))?;
        written.push(path);
    }
    Ok(written)
}

fn artifact(compilation: &Compilation, contract: &ContractUnit, include_source: bool) -> Value {
    let mut output = Map::new();
    output.insert("contractName".to_string(), Value::String(contract.name.clone()));
    output.insert("abi".to_string(), contract.abi.clone());
    output.insert("bytecode".to_string(), Value::String(format!("0x{}", contract.bytecode_init)));
    output.insert(
        "deployedBytecode".to_string(),
        Value::String(format!("0x{}", contract.bytecode_runtime)),
    );
    output.insert("sourceMap".to_string(), Value::String(contract.srcmap_init.clone()));
    output
        .insert("deployedSourceMap".to_string(), Value::String(contract.srcmap_runtime.clone()));
    output.insert("sourcePath".to_string(), Value::String(contract.filename.absolute.clone()));
    output.insert(
        "ast".to_string(),
        compilation.ast_of(&contract.filename).cloned().unwrap_or(Value::Null),
    );
    output.insert("userdoc".to_string(), contract.userdoc.clone());
    output.insert("devdoc".to_string(), contract.devdoc.clone());
    output.insert(
        "compiler".to_string(),
        json!({ "name": compilation.compiler.name, "version": compilation.compiler.version }),
    );
    if include_source {
        match fs::read_to_string(&contract.filename.absolute) {
            Ok(source) => {
                output.insert("source".to_string(), Value::String(source));
            }
            Err(e) => {
                tracing::warn!("Unable to read source {}: {}", contract.filename.absolute, e);
            }
        }
    }
    Value::Object(output)
}
