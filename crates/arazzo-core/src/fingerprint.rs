use crate::canonical::canonical_json_bytes;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// SHA-256 hex digest of the canonical serialization of `value`.
pub fn fingerprint_hex(value: &Value) -> serde_json::Result<String> {
    let bytes = canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{digest:x}"))
}

#[cfg(test)]
#[path = "fingerprint_test.rs"]
mod tests;
