//! Standard export layout: one JSON document per compilation.

use anyhow::Result;
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::{claim_path, write_json};
use crate::domain::{Compilation, CompileOptions};
use crate::utils::absolutize;

pub fn export(
    compilation: &Compilation,
    opts: &CompileOptions,
    taken: &mut HashSet<PathBuf>,
) -> Result<PathBuf> {
    let path = claim_path(&opts.export_dir, &export_stem(&compilation.target), taken);
    write_json(&path, &to_value(compilation, opts.export_src))?;
    Ok(path)
}

fn export_stem(target: &str) -> String {
    let target = absolutize(Path::new(target));
    target.file_name().and_then(|n| n.to_str()).unwrap_or("export").to_string()
}

pub fn to_value(compilation: &Compilation, include_sources: bool) -> Value {
    let mut contracts: Map<String, Value> = Map::new();
    for contract in compilation.contracts() {
        let by_file = contracts
            .entry(contract.filename.absolute.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(by_file) = by_file {
            by_file.insert(
                contract.name.clone(),
                json!({
                    "abi": contract.abi,
                    "bin": contract.bytecode_init,
                    "bin-runtime": contract.bytecode_runtime,
                    "srcmap": contract.srcmap_init,
                    "srcmap-runtime": contract.srcmap_runtime,
                    "filenames": contract.filename,
                    "userdoc": contract.userdoc,
                    "devdoc": contract.devdoc,
                    "hashes": contract.hashes,
                }),
            );
        }
    }

    let mut output = Map::new();
    output.insert("asts".to_string(), Value::Array(compilation.asts().values().cloned().collect()));
    output.insert("contracts".to_string(), Value::Object(contracts));
    output.insert(
        "compiler".to_string(),
        json!({
            "compiler": compilation.compiler.name,
            "version": compilation.compiler.version,
            "optimized": compilation.compiler.optimized,
        }),
    );
    output.insert(
        "working_dir".to_string(),
        Value::String(compilation.working_dir.to_string_lossy().to_string()),
    );
    output.insert("type".to_string(), Value::String(compilation.platform.to_string()));
    if include_sources {
        output.insert("sources".to_string(), Value::Object(read_sources(compilation)));
    }
    Value::Object(output)
}

fn read_sources(compilation: &Compilation) -> Map<String, Value> {
    let mut sources = Map::new();
    for filename in compilation.filenames() {
        match fs::read_to_string(&filename.absolute) {
            Ok(content) => {
                sources.insert(filename.absolute.clone(), json!({ "content": content }));
            }
            Err(e) => {
                tracing::warn!("Unable to read source {}: {}", filename.absolute, e);
            }
        }
    }
    sources
}
