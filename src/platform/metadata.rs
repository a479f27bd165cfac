//! Removal of the CBOR metadata trailer solc appends to bytecode.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::Compilation;

/// Known trailer layouts, oldest first.
static METADATA_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // bzzr0 (solc < 0.5.9)
        Regex::new(r"a165627a7a72305820[0-9a-f]{64}0029").unwrap(),
        // bzzr1 + solc version (0.5.9 - 0.5.x)
        Regex::new(r"a265627a7a72315820[0-9a-f]{64}64736f6c6343[0-9a-f]{6}0032").unwrap(),
        // ipfs + solc version (>= 0.6)
        Regex::new(r"a264697066735822[0-9a-f]{68}64736f6c6343[0-9a-f]{6}0033").unwrap(),
    ]
});

pub fn remove_metadata(bytecode: &str) -> String {
    METADATA_PATTERNS
        .iter()
        .fold(bytecode.to_string(), |code, pattern| pattern.replace_all(&code, "").into_owned())
}

pub fn strip_compilation(compilation: &mut Compilation) {
    for contract in compilation.contracts_mut() {
        contract.bytecode_init = remove_metadata(&contract.bytecode_init);
        contract.bytecode_runtime = remove_metadata(&contract.bytecode_runtime);
    }
}
