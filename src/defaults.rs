//! Default values for kape2orc.
//!
//! This module centralizes the file-naming conventions of both formats and the
//! default locations used by the CLI, so commands and the library agree on them.

use std::path::PathBuf;

/// Suffix identifying a KAPE target definition file.
pub const DEFINITION_SUFFIX: &str = ".tkape";

/// Name suffix given to the selector half of a split definition.
pub const SELECTOR_NAME_SUFFIX: &str = "_getthis";

/// Suffix replacing [`DEFINITION_SUFFIX`] on every emitted configuration file.
pub const CONFIG_SUFFIX: &str = "_config.xml";

/// File name of the deployment manifest written at the output root.
pub const MANIFEST_FILENAME: &str = "DFIR-ORC_embed.xml";

/// Token standing for the configuration folder at packaging time.
pub const DEPLOY_PATH_TOKEN: &str = "%ORC_CONFIG_FOLDER%";

/// Default directory scanned for `.tkape` files.
pub const DEFAULT_SOURCE_DIR: &str = "./kape";

/// Default output directory for generated configuration files.
pub const DEFAULT_OUTPUT_DIR: &str = "./orc";

/// Default master definition.
pub const DEFAULT_MASTER: &str = "./kape/Compound/!SANS_Triage.tkape";

/// Returns the default source directory as a path.
pub fn default_source_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_DIR)
}

/// Returns the default output directory as a path.
pub fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

/// Returns the default master definition path.
pub fn default_master() -> PathBuf {
    PathBuf::from(DEFAULT_MASTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_master_is_under_default_source() {
        assert!(default_master().starts_with(default_source_dir()));
    }

    #[test]
    fn test_default_master_has_definition_suffix() {
        assert!(DEFAULT_MASTER.ends_with(DEFINITION_SUFFIX));
    }
}
