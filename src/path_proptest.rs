//! Property-based tests for path re-addressing.
//!
//! These tests use proptest to generate definition paths and verify that
//! the output and deployment addresses keep their invariants.

#[cfg(test)]
mod proptest_tests {
    use crate::defaults::{CONFIG_SUFFIX, DEPLOY_PATH_TOKEN};
    use crate::path::{config_file_name, deploy_path, readdress, relative_output_path};
    use proptest::prelude::*;
    use std::path::{Path, PathBuf};

    /// A relative definition path such as `Compound/Sub/Name.tkape`.
    fn definition_path() -> impl Strategy<Value = (Vec<String>, String)> {
        (
            prop::collection::vec("[A-Za-z0-9_!]{1,12}", 0..4),
            "[A-Za-z0-9_!]{1,16}",
        )
    }

    proptest! {
        /// Property: config_file_name always yields the config suffix
        #[test]
        fn config_file_name_ends_with_suffix(name in "[A-Za-z0-9_.!]{0,24}") {
            prop_assert!(config_file_name(&name).ends_with(CONFIG_SUFFIX));
        }

        /// Property: substituting a .tkape name keeps the stem intact
        #[test]
        fn config_file_name_keeps_stem(stem in "[A-Za-z0-9_!]{1,24}") {
            let name = format!("{}.tkape", stem);
            prop_assert_eq!(config_file_name(&name), format!("{}{}", stem, CONFIG_SUFFIX));
        }

        /// Property: output paths preserve every intermediate directory
        #[test]
        fn output_path_preserves_directories((dirs, stem) in definition_path()) {
            let mut source = PathBuf::from("./kape");
            for dir in &dirs {
                source.push(dir);
            }
            source.push(format!("{}.tkape", stem));

            let out = relative_output_path(&source, Path::new("./kape"));

            let mut expected = PathBuf::new();
            for dir in &dirs {
                expected.push(dir);
            }
            expected.push(format!("{}{}", stem, CONFIG_SUFFIX));
            prop_assert_eq!(out, expected);
        }

        /// Property: deployment paths use backslashes only and carry the token once
        #[test]
        fn deploy_path_is_windows_style((dirs, stem) in definition_path()) {
            let mut source = PathBuf::from("./kape");
            for dir in &dirs {
                source.push(dir);
            }
            source.push(format!("{}.tkape", stem));

            let deployed = deploy_path(&source, Path::new("./kape"));
            prop_assert!(!deployed.contains('/'));
            prop_assert_eq!(deployed.matches(DEPLOY_PATH_TOKEN).count(), 1);
            let file_name = format!("{}{}", stem, CONFIG_SUFFIX);
            prop_assert!(deployed.ends_with(&file_name));
        }

        /// Property: readdress is deterministic and agrees with deploy_path under ./kape
        #[test]
        fn readdress_matches_deploy_path((dirs, stem) in definition_path()) {
            let mut parts = vec![".".to_string(), "kape".to_string()];
            parts.extend(dirs.iter().cloned());
            parts.push(format!("{}.tkape", stem));
            let raw = parts.join("/");

            prop_assert_eq!(readdress(&raw), readdress(&raw));
            prop_assert_eq!(readdress(&raw), deploy_path(Path::new(&raw), Path::new("./kape")));
        }
    }
}
