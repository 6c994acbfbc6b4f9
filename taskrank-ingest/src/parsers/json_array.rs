//! JSON array input: `[{"id": .., "title": .., ...}, ...]`.

use serde_json::Value;
use taskrank_core::TaskRecord;

use crate::error::IngestError;
use crate::fields::record_from_object;

/// Parse a JSON document that must be an array of task objects.
pub fn parse_tasks_json(text: &str) -> Result<Vec<TaskRecord>, IngestError> {
    let value: Value = serde_json::from_str(text)?;
    tasks_from_value(&value)
}

/// Normalize an already-decoded JSON value.
pub fn tasks_from_value(value: &Value) -> Result<Vec<TaskRecord>, IngestError> {
    let items = value.as_array().ok_or(IngestError::NotAnArray)?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let obj = item
                .as_object()
                .ok_or(IngestError::NotAnObject { index })?;
            Ok(record_from_object(index, obj))
        })
        .collect()
}
