//! Configuration loading and merging
//!
//! Command-line options are overlaid with values from a JSON config file
//! (`crytic.config.json` by default) with precedence CLI > File > Defaults.

use anyhow::Result;

use crate::domain::CompileOptions;

pub mod keys;
pub mod loader;
pub mod merge;

pub use keys::ConfigKey;
pub use loader::load_config_file;
pub use merge::{apply_config, ExplicitOptions};

/// Apply the config file named by `opts.config_file`, if any.
pub fn resolve_options(
    mut opts: CompileOptions,
    explicit: &ExplicitOptions,
) -> Result<CompileOptions> {
    if let Some(config) = load_config_file(&opts.config_file)? {
        let source = opts.config_file.clone();
        apply_config(&mut opts, explicit, &config, &source);
    }
    Ok(opts)
}
