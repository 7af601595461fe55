use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn export_csv_writes_one_file_per_list() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("csv");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xiq-migrate"));
    cmd.arg("export-csv")
        .arg(fixture("fixtures/xiq-campus.json"))
        .arg("--dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("ssids.csv"))
        .stdout(predicate::str::contains("vlans.csv"))
        .stdout(predicate::str::contains("radius_servers.csv"));

    let ssids = fs::read_to_string(out.join("ssids.csv")).expect("ssids.csv");
    assert_eq!(ssids.lines().count(), 5);
    assert!(ssids.contains("Corp,true,true,10,psk,true,optional,true,false"));
    assert!(!ssids.contains("hunter2"));

    let radius = fs::read_to_string(out.join("radius_servers.csv")).expect("radius csv");
    assert!(!radius.contains("r4dius"));
}

#[test]
fn export_csv_with_empty_source_writes_nothing() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("empty.json");
    fs::write(&input, "{}").expect("write input");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xiq-migrate"));
    cmd.arg("export-csv")
        .arg(&input)
        .arg("--dir")
        .arg(dir.path().join("csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to export"));
}
