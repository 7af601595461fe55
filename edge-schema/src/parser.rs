use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::bundle::TargetConfig;
use crate::topology::ExistingTopology;

/// Errors that can occur while reading controller JSON documents.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Input bytes were not valid JSON or did not match the record shape.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Failed to read input file.
    #[error("failed to read JSON file: {0}")]
    Io(#[from] std::io::Error),
    /// Valid JSON with the wrong top-level type.
    #[error("unexpected JSON document: {0}")]
    Shape(String),
}

/// Parse a topology listing (`GET /v1/topologies` body).
///
/// The listing must be a JSON array. Entries are kept even when they lack an
/// id or VLAN; use [`ExistingTopology::vlan_link`] to filter.
pub fn parse_topologies(json: &[u8]) -> Result<Vec<ExistingTopology>, ReadError> {
    let value: serde_json::Value = serde_json::from_slice(json)?;
    if !value.is_array() {
        return Err(ReadError::Shape(format!(
            "topology listing must be an array, found {}",
            json_type_name(&value)
        )));
    }
    Ok(serde_json::from_value(value)?)
}

/// Read a topology listing saved to `path`.
pub fn read_topologies(path: &Path) -> Result<Vec<ExistingTopology>, ReadError> {
    let bytes = fs::read(path)?;
    parse_topologies(&bytes)
}

/// Read a previously written [`TargetConfig`] bundle.
pub fn read_bundle(path: &Path) -> Result<TargetConfig, ReadError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Name of a JSON value's type, for error messages.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
