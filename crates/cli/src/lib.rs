use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use tagger_core::params::GeometryParams;

/// Load geometry parameter overrides from a JSON file.
///
/// The file only needs to contain the fields being overridden; everything
/// else keeps its as-built default.
pub fn load_params(path: &Path) -> Result<GeometryParams> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read parameter file: {}", path.display()))?;
    let params: GeometryParams = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse parameter file: {}", path.display()))?;
    params
        .validate()
        .with_context(|| format!("Invalid parameter file: {}", path.display()))?;
    Ok(params)
}

/// Compute the SHA-256 hash of a file and return it as a hex string.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open file for hashing: {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader
            .read(&mut buf)
            .with_context(|| format!("Failed to read file for hashing: {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let digest = hasher.finalize();
    Ok(format!("{:x}", digest))
}
