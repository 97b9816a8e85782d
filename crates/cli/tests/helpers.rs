use std::fs;

use crtgen::{load_params, sha256_file};
use tempfile::tempdir;

#[test]
fn sha256_file_matches_known_digest() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("data.txt");
    fs::write(&path, "hello").expect("write");

    let digest = sha256_file(&path).expect("hash");
    assert_eq!(digest, "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824");
}

#[test]
fn sha256_file_fails_for_missing_file() {
    let dir = tempdir().expect("tempdir");
    assert!(sha256_file(&dir.path().join("missing")).is_err());
}

#[test]
fn load_params_merges_partial_overrides_over_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("overrides.json");
    fs::write(&path, r#"{ "wv_width": 1000.0 }"#).expect("write");

    let params = load_params(&path).expect("load");
    assert_eq!(params.wv_width, 1000.0);
    // Everything else stays at its as-built value.
    assert_eq!(params.wv_length, 2268.8);
    assert_eq!(params.n_mod_stack, 9);
}

#[test]
fn load_params_rejects_degenerate_overrides() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("overrides.json");

    fs::write(&path, r#"{ "n_mod_stack": 0 }"#).expect("write");
    assert!(load_params(&path).is_err());

    fs::write(&path, r#"{ "minos_cut_north": [] }"#).expect("write");
    assert!(load_params(&path).is_err());
}

#[test]
fn load_params_rejects_unparseable_json() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("overrides.json");
    fs::write(&path, "not json").expect("write");

    assert!(load_params(&path).is_err());
}
