//! solc `--combined-json` export layout.

use anyhow::Result;
use serde_json::{json, Map, Value};
use std::path::PathBuf;

use super::write_json;
use crate::domain::{Compilation, CompileOptions};

pub fn export(
    compilation: &Compilation,
    opts: &CompileOptions,
    suffix: Option<usize>,
) -> Result<PathBuf> {
    let name = match suffix {
        Some(index) => format!("combined_solc_{index}.json"),
        None => "combined_solc.json".to_string(),
    };
    let path = opts.export_dir.join(name);
    write_json(&path, &to_value(compilation)?)?;
    Ok(path)
}

pub fn to_value(compilation: &Compilation) -> Result<Value> {
    let mut contracts = Map::new();
    for contract in compilation.contracts() {
        contracts.insert(
            format!("{}:{}", contract.filename.used, contract.name),
            json!({
                "abi": serde_json::to_string(&contract.abi)?,
                "bin": contract.bytecode_init,
                "bin-runtime": contract.bytecode_runtime,
                "srcmap": contract.srcmap_init,
                "srcmap-runtime": contract.srcmap_runtime,
                "userdoc": serde_json::to_string(&contract.userdoc)?,
                "devdoc": serde_json::to_string(&contract.devdoc)?,
                "hashes": contract.hashes,
            }),
        );
    }

    let mut sources = Map::new();
    let mut source_list = Vec::new();
    for filename in compilation.filenames() {
        source_list.push(Value::String(filename.used.clone()));
        let ast = compilation.ast_of(filename).cloned().unwrap_or(Value::Null);
        sources.insert(filename.used.clone(), json!({ "AST": ast }));
    }

    Ok(json!({
        "contracts": contracts,
        "sourceList": source_list,
        "sources": sources,
        "version": compilation.compiler.version,
    }))
}
