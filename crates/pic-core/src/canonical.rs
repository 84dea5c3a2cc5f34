//! Canonical JSON encoding and stable content hashes.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::{ErrorInfo, PicError};

/// Encodes a value as compact JSON with object keys in sorted order.
///
/// Routing through `serde_json::Value` sorts map keys, so two equal values
/// always produce the same bytes regardless of struct field order.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, PicError> {
    let value = serde_json::to_value(value)
        .map_err(|err| PicError::Serde(ErrorInfo::new("json-encode", err.to_string())))?;
    serde_json::to_vec(&value)
        .map_err(|err| PicError::Serde(ErrorInfo::new("json-encode", err.to_string())))
}

/// Like [`to_canonical_json_bytes`] but indented for files meant to be read.
pub fn to_canonical_json_pretty<T: Serialize>(value: &T) -> Result<String, PicError> {
    let value = serde_json::to_value(value)
        .map_err(|err| PicError::Serde(ErrorInfo::new("json-encode", err.to_string())))?;
    serde_json::to_string_pretty(&value)
        .map_err(|err| PicError::Serde(ErrorInfo::new("json-encode", err.to_string())))
}

/// Decodes a JSON payload.
pub fn from_json_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, PicError> {
    serde_json::from_slice(bytes)
        .map_err(|err| PicError::Serde(ErrorInfo::new("json-decode", err.to_string())))
}

/// Computes a stable hexadecimal SHA-256 of the canonical JSON encoding.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, PicError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}
