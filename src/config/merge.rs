//! Overlay config file values onto command-line options
//!
//! Precedence is CLI > config file > built-in defaults. An option counts as
//! set on the CLI when the user passed it explicitly, even with a value equal
//! to its default.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::Path;

use super::keys::ConfigKey;
use crate::domain::CompileOptions;

/// Options the user supplied on the command line.
pub type ExplicitOptions = BTreeSet<ConfigKey>;

pub fn apply_config(
    opts: &mut CompileOptions,
    explicit: &ExplicitOptions,
    config: &Map<String, Value>,
    source: &Path,
) {
    for (name, value) in config {
        let Some(key) = ConfigKey::parse(name) else {
            tracing::info!("{} has an unknown key: {} : {}", source.display(), name, value);
            continue;
        };
        if explicit.contains(&key) {
            tracing::debug!("{} set on the command line; ignoring {}", key, source.display());
            continue;
        }
        if let Err(e) = set_option(opts, key, value) {
            tracing::warn!("{} has an invalid value for {}: {} ({})", source.display(), key, value, e);
        }
    }
}

fn set_option(
    opts: &mut CompileOptions,
    key: ConfigKey,
    value: &Value,
) -> Result<(), serde_json::Error> {
    match key {
        ConfigKey::ExportFormat => opts.export_format = decode(value)?,
        ConfigKey::ExportDir => opts.export_dir = decode(value)?,
        ConfigKey::ExportSrc => opts.export_src = decode(value)?,
        ConfigKey::CompileForceFramework => opts.compile_force_framework = decode(value)?,
        ConfigKey::CompileRemoveMetadata => opts.compile_remove_metadata = decode(value)?,
        ConfigKey::IgnoreCompile => opts.ignore_compile = decode(value)?,
        ConfigKey::Solc => opts.solc = decode(value)?,
        ConfigKey::SolcArgs => opts.solc_args = decode(value)?,
        ConfigKey::SolcRemaps => opts.solc_remaps = decode(value)?,
        ConfigKey::SolcDisableWarnings => opts.solc_disable_warnings = decode(value)?,
        ConfigKey::SolcWorkingDir => opts.solc_working_dir = decode(value)?,
        ConfigKey::TruffleIgnoreCompile => opts.truffle_ignore_compile = decode(value)?,
        ConfigKey::TruffleBuildDirectory => opts.truffle_build_directory = decode(value)?,
        ConfigKey::TruffleVersion => opts.truffle_version = decode(value)?,
        ConfigKey::NpxDisable => opts.npx_disable = decode(value)?,
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(value.clone())
}
