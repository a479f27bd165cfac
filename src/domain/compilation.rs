//! Normalized compilation results

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use super::options::PlatformKind;

/// The four representations of a source file path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Filename {
    pub absolute: String,
    pub relative: String,
    pub short: String,
    pub used: String,
}

impl fmt::Display for Filename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Filename(absolute='{}', relative='{}', short='{}', used='{}')",
            self.absolute, self.relative, self.short, self.used
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompilerInfo {
    pub name: String,
    pub version: String,
    pub optimized: Option<bool>,
}

impl CompilerInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self { name: name.into(), version: version.into(), optimized: None }
    }
}

/// A single compiled contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractUnit {
    pub name: String,
    pub filename: Filename,
    pub abi: Value,
    /// Creation bytecode, hex without `0x`.
    pub bytecode_init: String,
    /// Deployed bytecode, hex without `0x`.
    pub bytecode_runtime: String,
    pub srcmap_init: String,
    pub srcmap_runtime: String,
    pub userdoc: Value,
    pub devdoc: Value,
    /// Function signature -> selector.
    pub hashes: BTreeMap<String, String>,
}

impl ContractUnit {
    pub fn new(name: impl Into<String>, filename: Filename) -> Self {
        Self {
            name: name.into(),
            filename,
            abi: Value::Array(Vec::new()),
            bytecode_init: String::new(),
            bytecode_runtime: String::new(),
            srcmap_init: String::new(),
            srcmap_runtime: String::new(),
            userdoc: Value::Object(Default::default()),
            devdoc: Value::Object(Default::default()),
            hashes: BTreeMap::new(),
        }
    }
}

/// One successfully compiled project.
///
/// Contract names form a set: when two sources declare the same name, the
/// last one reported by the toolchain wins.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub target: String,
    pub platform: PlatformKind,
    pub working_dir: PathBuf,
    pub compiler: CompilerInfo,
    contracts: BTreeMap<String, ContractUnit>,
    /// ASTs keyed by absolute filename.
    asts: BTreeMap<String, Value>,
    filenames: BTreeSet<Filename>,
}

impl Compilation {
    pub fn new(
        target: impl Into<String>,
        platform: PlatformKind,
        working_dir: PathBuf,
        compiler: CompilerInfo,
    ) -> Self {
        Self {
            target: target.into(),
            platform,
            working_dir,
            compiler,
            contracts: BTreeMap::new(),
            asts: BTreeMap::new(),
            filenames: BTreeSet::new(),
        }
    }

    pub fn add_contract(&mut self, contract: ContractUnit) {
        self.filenames.insert(contract.filename.clone());
        self.contracts.insert(contract.name.clone(), contract);
    }

    pub fn add_ast(&mut self, filename: Filename, ast: Value) {
        self.asts.insert(filename.absolute.clone(), ast);
        self.filenames.insert(filename);
    }

    pub fn contract_names(&self) -> impl Iterator<Item = &str> {
        self.contracts.keys().map(String::as_str)
    }

    pub fn contracts(&self) -> impl Iterator<Item = &ContractUnit> {
        self.contracts.values()
    }

    pub fn contract(&self, name: &str) -> Option<&ContractUnit> {
        self.contracts.get(name)
    }

    pub fn filename_of_contract(&self, name: &str) -> Option<&Filename> {
        self.contracts.get(name).map(|c| &c.filename)
    }

    pub fn asts(&self) -> &BTreeMap<String, Value> {
        &self.asts
    }

    pub fn ast_of(&self, filename: &Filename) -> Option<&Value> {
        self.asts.get(&filename.absolute)
    }

    pub fn filenames(&self) -> &BTreeSet<Filename> {
        &self.filenames
    }

    pub fn contracts_mut(&mut self) -> impl Iterator<Item = &mut ContractUnit> {
        self.contracts.values_mut()
    }
}
