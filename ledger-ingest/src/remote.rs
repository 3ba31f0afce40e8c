//! Remote-store dumps: a JSON array of loosely shaped transaction objects,
//! exactly as the hosted table returns them.

use std::path::Path;

use ledger_core::RawInput;
use log::info;
use serde_json::Value;

use crate::error::ImportError;

/// Parse a dump. Every element must be a JSON object.
pub fn parse_remote_records(json: &str) -> Result<Vec<RawInput>, ImportError> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| RawInput::from_value(value).ok_or(ImportError::NotAnObject { index }))
        .collect()
}

pub fn load_remote_records(path: impl AsRef<Path>) -> Result<Vec<RawInput>, ImportError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let records = parse_remote_records(&text)?;
    info!("loaded {} remote record(s) from {}", records.len(), path.as_ref().display());
    Ok(records)
}
