mod common;

use assert_cmd::prelude::*;
use common::WideCsv;
use predicates::prelude::*;
use std::process::Command;
use wdi_agri::config;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("agri-report").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("agri-report"))
        .stdout(predicate::str::contains("--input"));
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("agri-report").unwrap();
    cmd.current_dir(dir.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("API_19_DS2_en_csv_v2_5998250.csv"));
}

#[test]
fn plain_run_writes_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let years: Vec<i32> = (2005..=2020).collect();
    WideCsv::new(&years)
        .grid(&config::COUNTRIES, &config::INDICATORS)
        .write_to(&dir.path().join(config::DEFAULT_INPUT));

    let mut cmd = Command::cargo_bin("agri-report").unwrap();
    cmd.current_dir(dir.path()).env_remove("WDI_AGRI_FONT");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Descriptive statistics for India"))
        .stderr(predicate::str::contains("6 files written"));
    for name in [config::CEREAL_FILE, config::STATISTICAL_FILE, "correlation Australia .png"] {
        assert!(dir.path().join(name).exists(), "{name} missing");
    }
}
