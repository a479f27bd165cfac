//! Compilation platforms and target resolution
//!
//! Dispatches a target to the toolchain that understands it:
//! - `truffle` → directories holding a truffle config
//! - `solc` → existing `.sol` files
//!
//! Anything else is treated as a glob and every matching `.sol` file is
//! compiled on its own.

use std::path::{Path, PathBuf};

use crate::domain::{Compilation, CompileOptions, PlatformKind};
use crate::error::{CompileError, Result};
use crate::utils::expand_glob;

pub mod metadata;
pub mod solc;
pub mod truffle;

pub trait Platform {
    fn kind(&self) -> PlatformKind;

    /// Whether `target` looks like a project this platform can build.
    fn is_supported(&self, target: &Path) -> bool;

    fn compile(&self, target: &str, opts: &CompileOptions) -> Result<Compilation>;
}

/// Checked in order; the first platform that recognizes the target wins.
const DETECTION_ORDER: &[PlatformKind] = &[PlatformKind::Truffle, PlatformKind::Solc];

pub fn platform_for(kind: PlatformKind) -> &'static dyn Platform {
    match kind {
        PlatformKind::Solc => &solc::Solc,
        PlatformKind::Truffle => &truffle::Truffle,
    }
}

pub fn detect_platform(target: &Path) -> Option<PlatformKind> {
    DETECTION_ORDER.iter().copied().find(|kind| platform_for(*kind).is_supported(target))
}

/// Compile every project named by `opts.target`.
///
/// Returns one compilation per resolved project, in a stable order.
pub fn compile_all(opts: &CompileOptions) -> Result<Vec<Compilation>> {
    let target = opts.target.as_str();
    let target_path = Path::new(target);

    let platform = opts
        .compile_force_framework
        .or_else(|| detect_platform(target_path))
        .or_else(|| target_path.is_file().then_some(PlatformKind::Solc))
        .map(platform_for);

    let mut compilations = match platform {
        Some(platform) => {
            tracing::info!("Compiling {} with {}", target, platform.kind());
            vec![platform.compile(target, opts)?]
        }
        None => {
            let sources = resolve_sources(target)?;
            if sources.is_empty() {
                return Err(CompileError::invalid(format!("Unresolved target: {target}")));
            }
            let mut compilations = Vec::with_capacity(sources.len());
            for source in sources {
                let source = source.to_string_lossy();
                tracing::info!("Compiling {} with {}", source, PlatformKind::Solc);
                compilations.push(solc::Solc.compile(&source, opts)?);
            }
            compilations
        }
    };

    if opts.compile_remove_metadata {
        for compilation in &mut compilations {
            metadata::strip_compilation(compilation);
        }
    }

    Ok(compilations)
}

/// Expand a directory or glob target into the `.sol` files it names.
fn resolve_sources(target: &str) -> Result<Vec<PathBuf>> {
    let pattern = if Path::new(target).is_dir() {
        format!("{}/*.sol", target.trim_end_matches(['/', '\\']))
    } else {
        target.to_string()
    };
    let matches = expand_glob(&pattern)
        .map_err(|e| CompileError::invalid(format!("Invalid target pattern {target}: {e}")))?;
    Ok(matches
        .into_iter()
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "sol"))
        .collect())
}
