//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_definition("Windows/EventLogs.tkape", defs::EVENT_LOGS)
//!         .with_definition("Compound/Master.tkape", defs::COMPOUND_MASTER);
//!     fixture.command("convert", "Compound/Master.tkape").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::defs;
    pub use super::TestFixture;
}

/// `.tkape` snippets for testing.
#[allow(dead_code)]
pub mod defs {
    pub const EVENT_LOGS: &str = r#"
Description: Event logs
Author: Eric Zimmerman
Version: 1.0
Targets:
    -
        Name: Event logs Win7+
        Category: EventLogs
        Path: C:\Windows\System32\winevt\logs\
        FileMask: '*.evtx'
"#;

    pub const REGISTRY_HIVES: &str = r#"
Description: Registry hives
Version: 1.0
Targets:
    -
        Name: SAM
        Category: Registry
        Path: C:\Windows\System32\config\
        FileMask: SAM
    -
        Name: NTUSER
        Category: Registry
        Path: C:\Users\%user%\
        FileMask: NTUSER.DAT
"#;

    pub const BROWSERS: &str = r#"
Description: Browser history
Targets:
    -
        Name: Chrome
        Category: Communications
        Path: C:\Users\%user%\AppData\Local\Google\Chrome\User Data\Default\
        FileMask: History
"#;

    /// Pure orchestrator over event logs and registry hives.
    pub const COMPOUND_MASTER: &str = r#"
Description: Triage collection
Version: 1.0
Targets:
    -
        Name: Event logs
        Category: EventLogs
        Path: EventLogs.tkape
    -
        Name: Registry hives
        Category: Registry
        Path: RegistryHives.tkape
"#;

    /// One filesystem target and one definition reference.
    pub const MIXED_MASTER: &str = r#"
Description: Mixed collection
Targets:
    -
        Name: MFT
        Category: FileSystem
        Path: C:\
        FileMask: $MFT
    -
        Name: Event logs
        Category: EventLogs
        Path: EventLogs.tkape
"#;

    /// References a definition that does not exist.
    pub const MASTER_WITH_MISSING: &str = r#"
Description: Triage with a gap
Targets:
    -
        Name: Event logs
        Category: EventLogs
        Path: EventLogs.tkape
    -
        Name: Antivirus
        Category: Antivirus
        Path: Antivirus.tkape
"#;

    pub const INVALID_YAML: &str = "Targets: [unclosed";
}

/// A temporary workspace with a `kape/` source tree and an `orc/` output
/// directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("kape")
            .create_dir_all()
            .expect("Failed to create source directory");
        Self { temp_dir }
    }

    /// Add a definition under `kape/`.
    pub fn with_definition(self, relative: &str, content: &str) -> Self {
        self.temp_dir
            .child("kape")
            .child(relative)
            .write_str(content)
            .expect("Failed to write definition");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn kape(&self) -> PathBuf {
        self.path().join("kape")
    }

    pub fn orc(&self) -> PathBuf {
        self.path().join("orc")
    }

    /// Path of a definition under `kape/`.
    pub fn definition(&self, relative: &str) -> PathBuf {
        self.kape().join(relative)
    }

    /// Read a generated file under `orc/`.
    pub fn read_output(&self, relative: &str) -> String {
        std::fs::read_to_string(self.orc().join(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Create a `kape2orc <subcommand>` invocation with `--kape` and
    /// `--master` pointing into this fixture.
    pub fn command(&self, subcommand: &str, master: &str) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("kape2orc");
        cmd.current_dir(self.path())
            .env_remove("KAPE2ORC_SOURCE")
            .env_remove("KAPE2ORC_OUTPUT")
            .env_remove("KAPE2ORC_MASTER")
            .env_remove("RUST_LOG")
            .arg("--color=never")
            .arg(subcommand)
            .arg("--kape")
            .arg(self.kape())
            .arg("--master")
            .arg(self.definition(master));
        cmd
    }

    /// `kape2orc convert` writing into this fixture's `orc/`.
    pub fn convert(&self, master: &str) -> assert_cmd::Command {
        let mut cmd = self.command("convert", master);
        cmd.arg("--orc").arg(self.orc());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_source_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.kape().is_dir());
        assert!(!fixture.orc().exists());
    }

    #[test]
    fn test_fixture_with_definition() {
        let fixture = TestFixture::new().with_definition("Windows/EventLogs.tkape", defs::EVENT_LOGS);
        assert!(fixture.definition("Windows/EventLogs.tkape").exists());
    }

    #[test]
    fn test_defs_are_valid_yaml() {
        for def in [
            defs::EVENT_LOGS,
            defs::REGISTRY_HIVES,
            defs::BROWSERS,
            defs::COMPOUND_MASTER,
            defs::MIXED_MASTER,
            defs::MASTER_WITH_MISSING,
        ] {
            serde_yaml::from_str::<serde_yaml::Value>(def).expect("definition should be valid YAML");
        }
        assert!(serde_yaml::from_str::<serde_yaml::Value>(defs::INVALID_YAML).is_err());
    }
}
