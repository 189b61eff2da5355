use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::{fs, path::Path};

use crate::report::model::{SourceHash, SourceInfo};
use crate::source::manifest::Manifest;

/// A loaded manifest together with the identity of the bytes it came from.
#[derive(Debug, Clone)]
pub struct ManifestContext {
    /// Optional source path (informational only).
    pub path: Option<String>,

    pub manifest: Manifest,

    /// Size of the manifest file in bytes.
    pub size_bytes: u64,

    pub hash_alg: String,

    /// Hex-encoded hash of the manifest bytes.
    pub hash_hex: String,
}

impl ManifestContext {
    /// Report-facing description of where the scanned catalogue came from.
    pub fn source_info(&self) -> SourceInfo {
        SourceInfo {
            path: self.path.clone(),
            size_bytes: self.size_bytes,
            hash: SourceHash {
                algorithm: self.hash_alg.clone(),
                value: self.hash_hex.clone(),
            },
        }
    }
}

/// Read and parse a manifest, fingerprinting its raw bytes.
///
/// The fingerprint depends only on file content, so two runs over the same
/// export produce reports with the same source hash.
pub fn read_manifest(path: &Path) -> Result<ManifestContext> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read manifest: {}", path.display()))?;

    let manifest: Manifest = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse manifest: {}", path.display()))?;

    let digest = Sha256::digest(&bytes);

    Ok(ManifestContext {
        path: Some(path.display().to_string()),
        manifest,
        size_bytes: bytes.len() as u64,
        hash_alg: "sha256".to_string(),
        hash_hex: hex::encode(digest),
    })
}
