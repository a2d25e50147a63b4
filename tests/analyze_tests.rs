//! Integration tests for the analyze command

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{encode, mtags_cmd};

const DEFS: &str = "# benchmark ids\n\
                    0x0000, start:Direct\n\
                    0x0001, stop:Direct\n\
                    0x1000, data:Counts\n";

fn write_defs(temp: &TempDir) -> std::path::PathBuf {
    let path = temp.path().join("ids.defs");
    fs::write(&path, DEFS).unwrap();
    path
}

#[test]
fn test_analyze_reports_counts_and_matches() {
    let temp = TempDir::new().unwrap();
    let defs = write_defs(&temp);
    let log = temp.path().join("tags.log");
    fs::write(&log, "# header comment\nAAAABQAA\nAAAACgAB\n").unwrap();

    mtags_cmd()
        .arg("analyze")
        .arg(&log)
        .arg("--defs")
        .arg(&defs)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 3 definition(s)."))
        .stdout(predicate::str::contains("Imported 2 microtag(s)."))
        .stdout(predicate::str::contains("< Direct"))
        .stdout(predicate::str::contains("--->[ 1 ]"))
        .stdout(predicate::str::contains("5 ticks"));
}

#[test]
fn test_analyze_skips_non_code_lines() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("tags.log");
    fs::write(&log, "noise\nAAAABQAA\n!!!!!!!!\n# comment\n\n").unwrap();

    // "!!!!!!!!" passes the 8-character filter but fails decoding; only one
    // tag survives
    mtags_cmd()
        .arg("analyze")
        .arg(&log)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 microtag(s)."));
}

#[test]
fn test_analyze_without_definitions_prints_raw_ids() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("tags.log");
    fs::write(&log, "AAAABQAA\n").unwrap();

    mtags_cmd()
        .arg("analyze")
        .arg(&log)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("? [0x0000]"));
}

#[test]
fn test_analyze_missing_input_fails() {
    mtags_cmd()
        .arg("analyze")
        .arg("/nonexistent/tags.log")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Cannot open"));
}

#[test]
fn test_analyze_vardata_payload() {
    let temp = TempDir::new().unwrap();
    let defs = temp.path().join("ids.defs");
    fs::write(&defs, "0x0120, vardata:Msg\n").unwrap();

    let root = encode("0x0120", "0x05414243");
    let cont = encode("0x0120", "0x44450000");
    let log = temp.path().join("tags.log");
    fs::write(&log, format!("{}\n{}\n", root, cont)).unwrap();

    mtags_cmd()
        .arg("analyze")
        .arg(&log)
        .arg("--defs")
        .arg(&defs)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("V Msg"))
        .stdout(predicate::str::contains("==> \"ABCDE\" (5 bytes)"));
}

#[test]
fn test_analyze_with_tick_rate() {
    let temp = TempDir::new().unwrap();
    let defs = write_defs(&temp);
    let log = temp.path().join("tags.log");
    fs::write(&log, "AAAABQAA\nAAAACgAB\n").unwrap();

    mtags_cmd()
        .arg("analyze")
        .arg(&log)
        .arg("--defs")
        .arg(&defs)
        .arg("--ticks-per-second")
        .arg("1000")
        .arg("--unit")
        .arg("ms")
        .arg("--precision")
        .arg("3")
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.005 ms"));
}

#[test]
fn test_analyze_with_profile() {
    let temp = TempDir::new().unwrap();
    write_defs(&temp);
    let profile = temp.path().join("bench.toml");
    fs::write(
        &profile,
        "definitions = \"ids.defs\"\n\n[time]\nticks-per-second = 1000.0\nunit = \"ms\"\nprecision = 1\n",
    )
    .unwrap();
    let log = temp.path().join("tags.log");
    fs::write(&log, "AAAABQAA\nAAAACgAB\n").unwrap();

    mtags_cmd()
        .arg("analyze")
        .arg(&log)
        .arg("--profile")
        .arg(&profile)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 3 definition(s)."))
        .stdout(predicate::str::contains("0.0 ms"));
}

#[test]
fn test_analyze_flags_override_profile() {
    let temp = TempDir::new().unwrap();
    write_defs(&temp);
    let profile = temp.path().join("bench.toml");
    fs::write(
        &profile,
        "definitions = \"ids.defs\"\n\n[time]\nticks-per-second = 1.0\nunit = \"odd\"\n",
    )
    .unwrap();
    let log = temp.path().join("tags.log");
    fs::write(&log, "AAAABQAA\n").unwrap();

    mtags_cmd()
        .arg("analyze")
        .arg(&log)
        .arg("--profile")
        .arg(&profile)
        .arg("--ticks-per-second")
        .arg("1000")
        .arg("--unit")
        .arg("ms")
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("ms"))
        .stdout(predicate::str::contains("odd").not());
}

#[test]
fn test_analyze_bad_profile_fails() {
    let temp = TempDir::new().unwrap();
    let profile = temp.path().join("bench.toml");
    fs::write(&profile, "not toml [\n").unwrap();
    let log = temp.path().join("tags.log");
    fs::write(&log, "AAAABQAA\n").unwrap();

    mtags_cmd()
        .arg("analyze")
        .arg(&log)
        .arg("--profile")
        .arg(&profile)
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_analyze_unmatched_interval_ends() {
    let temp = TempDir::new().unwrap();
    let defs = write_defs(&temp);
    let log = temp.path().join("tags.log");
    // A lone stop, then a lone start
    fs::write(&log, "AAAACgAB\nAAAABQAA\n").unwrap();

    mtags_cmd()
        .arg("analyze")
        .arg(&log)
        .arg("--defs")
        .arg(&defs)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ? ]---"))
        .stdout(predicate::str::contains("--->[ ? ]"));
}
