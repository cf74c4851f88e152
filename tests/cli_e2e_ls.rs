//! End-to-end tests for the `ls` command.

mod common;
use common::prelude::*;

fn fixture() -> TestFixture {
    TestFixture::new()
        .with_definition("Windows/EventLogs.tkape", defs::EVENT_LOGS)
        .with_definition("Windows/RegistryHives.tkape", defs::REGISTRY_HIVES)
        .with_definition("Apps/Browsers.tkape", defs::BROWSERS)
        .with_definition("Compound/Master.tkape", defs::COMPOUND_MASTER)
}

#[test]
fn test_ls_help() {
    let mut cmd = cargo_bin_cmd!("kape2orc");
    cmd.arg("ls")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("List scanned definitions"));
}

#[test]
fn test_ls_lists_definitions_and_usage() {
    fixture()
        .command("ls", "Compound/Master.tkape")
        .assert()
        .success()
        .stdout(predicate::str::contains("Windows/EventLogs.tkape"))
        .stdout(predicate::str::contains("Apps/Browsers.tkape"))
        .stdout(predicate::str::contains("selector"))
        .stdout(predicate::str::contains("3 definition(s), 2 used by Master"))
        .stdout(predicate::str::contains("Compound/Master.tkape").not());
}

#[test]
fn test_ls_pattern_filters() {
    fixture()
        .command("ls", "Compound/Master.tkape")
        .arg("--pattern")
        .arg("Windows/*")
        .assert()
        .success()
        .stdout(predicate::str::contains("EventLogs"))
        .stdout(predicate::str::contains("Browsers").not())
        .stdout(predicate::str::contains("2 definition(s)"));
}

#[test]
fn test_ls_pattern_matches_names() {
    fixture()
        .command("ls", "Compound/Master.tkape")
        .arg("-p")
        .arg("Brow*")
        .assert()
        .success()
        .stdout(predicate::str::contains("Apps/Browsers.tkape"))
        .stdout(predicate::str::contains("1 definition(s), 0 used by Master"));
}

#[test]
fn test_ls_json() {
    let output = fixture()
        .command("ls", "Compound/Master.tkape")
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 3);

    let browsers = entries
        .iter()
        .find(|e| e["name"] == "Browsers")
        .unwrap();
    assert_eq!(browsers["class"], "selector");
    assert_eq!(browsers["used"], false);
    assert_eq!(browsers["targets"], 1);

    let hives = entries
        .iter()
        .find(|e| e["name"] == "RegistryHives")
        .unwrap();
    assert_eq!(hives["used"], true);
    assert_eq!(hives["path"], "Windows/RegistryHives.tkape");
}

#[test]
fn test_ls_invalid_pattern() {
    fixture()
        .command("ls", "Compound/Master.tkape")
        .arg("--pattern")
        .arg("[")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid glob pattern"));
}

#[test]
fn test_ls_missing_source_dir() {
    let mut cmd = cargo_bin_cmd!("kape2orc");
    cmd.arg("ls")
        .arg("--kape")
        .arg("/nonexistent/kape")
        .assert()
        .failure()
        .stderr(predicate::str::contains("KAPE source directory not found"));
}
