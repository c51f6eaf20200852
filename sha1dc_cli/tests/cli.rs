//! End-to-end tests for the sha1dcsum binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const HASH_TEST: &str = "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3";

fn sha1dcsum() -> Command {
    let mut cmd = Command::cargo_bin("sha1dcsum").unwrap();
    // Keep host configuration out of the tests.
    cmd.env("SHA1DCSUM_CONFIG", "/nonexistent/sha1dcsum.toml");
    cmd
}

#[test]
fn test_hashes_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("input.txt");
    fs::write(&path, b"test").unwrap();

    sha1dcsum()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(HASH_TEST))
        .stdout(predicate::str::contains("input.txt"));
}

#[test]
fn test_hashes_stdin() {
    sha1dcsum()
        .write_stdin("test")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{HASH_TEST}  -")));
}

#[test]
fn test_json_format() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("input.txt");
    fs::write(&path, b"test").unwrap();

    let assert = sha1dcsum().arg("--format").arg("json").arg(&path).assert().success();

    let parsed: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(parsed[0]["digest"], HASH_TEST);
    assert_eq!(parsed[0]["collision"], false);
}

#[test]
fn test_copy_ingest_matches_stable() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("input.bin");
    fs::write(&path, vec![0x42u8; 200_000]).unwrap();

    let stable = sha1dcsum().arg(&path).assert().success();
    let copy = sha1dcsum()
        .arg("--ingest")
        .arg("copy")
        .arg(&path)
        .assert()
        .success();

    assert_eq!(stable.get_output().stdout, copy.get_output().stdout);
}

#[test]
fn test_no_detect_still_hashes() {
    sha1dcsum()
        .arg("--no-detect")
        .write_stdin("test")
        .assert()
        .success()
        .stdout(predicate::str::contains(HASH_TEST));
}

#[test]
fn test_missing_file_fails() {
    sha1dcsum()
        .arg("/definitely/not/here.bin")
        .assert()
        .failure()
        .stdout(predicate::str::contains("No such file").or(predicate::str::contains("not found")));
}

#[test]
fn test_multiple_files_one_line_each() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.txt");
    let b = temp_dir.path().join("b.txt");
    fs::write(&a, b"test").unwrap();
    fs::write(&b, b"test_hash").unwrap();

    sha1dcsum()
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::contains(HASH_TEST))
        .stdout(predicate::str::contains(
            "327d106bf608b1f63bf5cbc5d1b6ea2d6836b446",
        ));
}
