//! Options that may be set from the config file

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigKey {
    ExportFormat,
    ExportDir,
    ExportSrc,
    CompileForceFramework,
    CompileRemoveMetadata,
    IgnoreCompile,
    Solc,
    SolcArgs,
    SolcRemaps,
    SolcDisableWarnings,
    SolcWorkingDir,
    TruffleIgnoreCompile,
    TruffleBuildDirectory,
    TruffleVersion,
    NpxDisable,
}

impl ConfigKey {
    pub const ALL: &'static [ConfigKey] = &[
        ConfigKey::ExportFormat,
        ConfigKey::ExportDir,
        ConfigKey::ExportSrc,
        ConfigKey::CompileForceFramework,
        ConfigKey::CompileRemoveMetadata,
        ConfigKey::IgnoreCompile,
        ConfigKey::Solc,
        ConfigKey::SolcArgs,
        ConfigKey::SolcRemaps,
        ConfigKey::SolcDisableWarnings,
        ConfigKey::SolcWorkingDir,
        ConfigKey::TruffleIgnoreCompile,
        ConfigKey::TruffleBuildDirectory,
        ConfigKey::TruffleVersion,
        ConfigKey::NpxDisable,
    ];

    /// The option name, shared by the config file key and the CLI argument id.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::ExportFormat => "export_format",
            ConfigKey::ExportDir => "export_dir",
            ConfigKey::ExportSrc => "export_src",
            ConfigKey::CompileForceFramework => "compile_force_framework",
            ConfigKey::CompileRemoveMetadata => "compile_remove_metadata",
            ConfigKey::IgnoreCompile => "ignore_compile",
            ConfigKey::Solc => "solc",
            ConfigKey::SolcArgs => "solc_args",
            ConfigKey::SolcRemaps => "solc_remaps",
            ConfigKey::SolcDisableWarnings => "solc_disable_warnings",
            ConfigKey::SolcWorkingDir => "solc_working_dir",
            ConfigKey::TruffleIgnoreCompile => "truffle_ignore_compile",
            ConfigKey::TruffleBuildDirectory => "truffle_build_directory",
            ConfigKey::TruffleVersion => "truffle_version",
            ConfigKey::NpxDisable => "npx_disable",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigKey;

    #[test]
    fn names_round_trip() {
        for key in ConfigKey::ALL {
            assert_eq!(ConfigKey::parse(key.as_str()), Some(*key));
        }
    }

    #[test]
    fn cli_only_options_are_not_config_keys() {
        for name in ["target", "config_file", "print_filenames", "verbose"] {
            assert!(ConfigKey::parse(name).is_none(), "{name} must stay CLI-only");
        }
    }
}
