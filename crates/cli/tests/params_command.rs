use std::fs;

use predicates::prelude::*;
use tempfile::tempdir;

/// The params command should print the derived envelopes in human mode.
#[test]
fn params_prints_derived_envelopes() {
    assert_cmd::cargo::cargo_bin_cmd!("crtgen")
        .arg("params")
        .assert()
        .success()
        .stdout(predicate::str::contains("Module envelopes (cm):"))
        .stdout(predicate::str::contains("MINOS:"))
        .stdout(predicate::str::contains("shell-WV offset:"));
}

/// `--json` should dump the full parameter set.
#[test]
fn params_json_dumps_full_parameter_set() {
    let output = assert_cmd::cargo::cargo_bin_cmd!("crtgen")
        .arg("params")
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .clone();

    let params: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("JSON parameter set");
    assert_eq!(params["wv_width"], 1031.8);
    assert_eq!(params["n_strips_minos"], 20);
    assert_eq!(params["minos_cut_north"].as_array().map(Vec::len), Some(6));
}

/// Overrides should be visible in the dumped parameter set.
#[test]
fn params_json_reflects_overrides() {
    let dir = tempdir().expect("tempdir");
    let overrides = dir.path().join("overrides.json");
    fs::write(&overrides, r#"{ "n_top_z": 7, "layer_space": 10.0 }"#).expect("write overrides");

    let output = assert_cmd::cargo::cargo_bin_cmd!("crtgen")
        .arg("params")
        .arg("--params")
        .arg(&overrides)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .clone();

    let params: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("JSON parameter set");
    assert_eq!(params["n_top_z"], 7);
    assert_eq!(params["layer_space"], 10.0);
    // Untouched fields keep their as-built defaults.
    assert_eq!(params["n_top_x"], 6);
}

/// A missing parameter file should fail with a readable error.
#[test]
fn params_fails_for_missing_override_file() {
    assert_cmd::cargo::cargo_bin_cmd!("crtgen")
        .arg("params")
        .arg("--params")
        .arg("/no/such/file.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read parameter file"));
}
