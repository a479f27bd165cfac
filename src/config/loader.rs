//! Config file loading

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Read the JSON config at `path`.
///
/// A missing file yields `Ok(None)`. Malformed JSON, or a document that is
/// not an object, is logged and also yields `Ok(None)` so the run continues
/// with command-line values. Read failures on an existing file are errors.
pub fn load_config_file(path: &Path) -> Result<Option<Map<String, Value>>> {
    if !path.is_file() {
        tracing::debug!("No config file at {}", path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading config file: {}", path.display()))?;

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(other) => {
            tracing::error!(
                "Impossible to read {}, please check the file: expected a JSON object, found {}",
                path.display(),
                json_kind(&other)
            );
            Ok(None)
        }
        Err(e) => {
            tracing::error!("Impossible to read {}, please check the file {}", path.display(), e);
            Ok(None)
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
