use crate::domain::Task;
use anyhow::{Context, Result};
use serde_json::Value;
use thiserror::Error;

/// Why a stored task list could not be used at all
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("stored value is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("stored value is a JSON {0}, expected an array")]
    NotAnArray(&'static str),
}

/// Result of decoding a stored list
#[derive(Debug, Default)]
pub struct Decoded {
    pub tasks: Vec<Task>,
    /// Entries skipped because they were falsy, malformed or blank
    pub dropped: usize,
}

/// Serialize the whole task list as a JSON array
pub fn encode_tasks(tasks: &[Task]) -> Result<String> {
    serde_json::to_string_pretty(tasks).context("Failed to serialize task list")
}

/// Decode a stored task list.
///
/// Only a value that is not a JSON array is an error; individual entries
/// that are falsy, fail to deserialize, or have blank text are dropped.
pub fn decode_tasks(raw: &str) -> Result<Decoded, DecodeError> {
    let value: Value = serde_json::from_str(raw)?;
    let entries = match value {
        Value::Array(entries) => entries,
        other => return Err(DecodeError::NotAnArray(json_kind(&other))),
    };

    let mut decoded = Decoded::default();
    for entry in entries {
        if is_falsy(&entry) {
            decoded.dropped += 1;
            continue;
        }
        match serde_json::from_value::<Task>(entry) {
            Ok(task) if !task.text.trim().is_empty() => decoded.tasks.push(task),
            _ => decoded.dropped += 1,
        }
    }

    Ok(decoded)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
