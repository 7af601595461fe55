use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::bundle::TargetConfig;

/// Errors that can occur while writing a [`TargetConfig`] bundle.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to serialize the bundle.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Failed to write output file.
    #[error("failed to write JSON file: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize a bundle into pretty-printed JSON bytes.
pub fn write(config: &TargetConfig) -> Result<Vec<u8>, WriteError> {
    let mut bytes = serde_json::to_vec_pretty(config)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Serialize a bundle and write it to `path`.
pub fn write_file(config: &TargetConfig, path: &Path) -> Result<(), WriteError> {
    let bytes = write(config)?;
    fs::write(path, bytes)?;
    Ok(())
}
