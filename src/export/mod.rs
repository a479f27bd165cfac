//! Artifact export (standard, solc combined-json, truffle)

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{Compilation, CompileOptions, ExportFormat};

pub mod solc;
pub mod standard;
pub mod truffle;

/// Write every compilation to `opts.export_dir` in the selected format.
///
/// Returns the paths written, in order.
pub fn export_all(compilations: &[Compilation], opts: &CompileOptions) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&opts.export_dir).with_context(|| {
        format!("Failed creating export directory: {}", opts.export_dir.display())
    })?;

    let mut written = Vec::new();
    let mut taken = HashSet::new();
    for (index, compilation) in compilations.iter().enumerate() {
        let paths = match opts.export_format {
            None => vec![standard::export(compilation, opts, &mut taken)?],
            Some(ExportFormat::Solc) => {
                let suffix = (compilations.len() > 1).then_some(index);
                vec![solc::export(compilation, opts, suffix)?]
            }
            Some(ExportFormat::Truffle) => truffle::export(compilation, opts, &mut taken)?,
        };
        for path in &paths {
            tracing::info!("Export {}", path.display());
        }
        written.extend(paths);
    }
    Ok(written)
}

/// Reserve `<dir>/<stem>.json` for this run.
///
/// A name already written earlier in the run gets a `_<n>` suffix so that
/// targets sharing a file name (`a/Token.sol`, `b/Token.sol`) both survive.
pub(crate) fn claim_path(dir: &Path, stem: &str, taken: &mut HashSet<PathBuf>) -> PathBuf {
    let mut path = dir.join(format!("{stem}.json"));
    let mut suffix = 1;
    while !taken.insert(path.clone()) {
        path = dir.join(format!("{stem}_{suffix}.json"));
        suffix += 1;
    }
    if suffix > 1 {
        tracing::warn!("{stem}.json is already exported, using {}", path.display());
    }
    path
}

/// Serialize `value` as pretty JSON at `path`.
pub(crate) fn write_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(value)?)
        .with_context(|| format!("Failed writing export file: {}", path.display()))
}
