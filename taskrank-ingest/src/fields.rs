//! Field coercion from loosely-typed JSON values.
//!
//! Every rule here is silent: bad values fall back to documented defaults
//! and never produce warnings or errors.

use serde_json::{Map, Value};
use taskrank_core::task::{DEFAULT_IMPORTANCE, TaskRecord, clamp_importance, sanitize_hours};
use taskrank_core::time::parse_due_date;

const KNOWN_FIELDS: &[&str] = &[
    "id",
    "title",
    "due_date",
    "estimated_hours",
    "importance",
    "dependencies",
];

// Output-only keys; dropped from input so they cannot shadow computed values.
const RESERVED_FIELDS: &[&str] = &["score", "explanation", "reason"];

/// String form of an id-like value. `null` has none.
pub fn normalize_id(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

pub fn coerce_title(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Integer rating in `[1, 10]`; floats truncate toward zero.
pub fn coerce_importance(value: Option<&Value>) -> u8 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(Value::Bool(b)) => Some(i64::from(*b)),
        _ => None,
    };
    clamp_importance(raw.unwrap_or(i64::from(DEFAULT_IMPORTANCE)))
}

/// Non-negative finite hours; anything else is 0.0.
pub fn coerce_hours(value: Option<&Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    sanitize_hours(raw.unwrap_or(0.0))
}

pub fn coerce_due_date(value: Option<&Value>) -> Option<chrono::NaiveDate> {
    match value {
        Some(Value::String(s)) => parse_due_date(s).ok(),
        _ => None,
    }
}

pub fn coerce_dependencies(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(normalize_id).collect(),
        _ => Vec::new(),
    }
}

/// Normalize one input object. `index` is its position in the batch and
/// becomes the id when none is given.
pub fn record_from_object(index: usize, obj: &Map<String, Value>) -> TaskRecord {
    let id = obj
        .get("id")
        .and_then(normalize_id)
        .unwrap_or_else(|| index.to_string());

    let extra: Map<String, Value> = obj
        .iter()
        .filter(|(k, _)| !KNOWN_FIELDS.contains(&k.as_str()))
        .filter(|(k, _)| !RESERVED_FIELDS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    TaskRecord {
        id,
        title: coerce_title(obj.get("title")),
        due_date: coerce_due_date(obj.get("due_date")),
        estimated_hours: coerce_hours(obj.get("estimated_hours")),
        importance: coerce_importance(obj.get("importance")),
        dependencies: coerce_dependencies(obj.get("dependencies")),
        extra,
    }
}
