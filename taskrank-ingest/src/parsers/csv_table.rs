//! CSV input with a header row.
//!
//! Recognized columns (any order, case-insensitive):
//!   id,title,due_date,estimated_hours,importance,dependencies
//! Dependencies are separated by `;` or `|`. Other columns are kept as
//! string extras.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};
use taskrank_core::TaskRecord;

use crate::error::IngestError;
use crate::fields::record_from_object;

fn split_dependencies(cell: &str) -> Value {
    Value::Array(
        cell.split([';', '|'])
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| Value::String(d.to_string()))
            .collect(),
    )
}

/// Parse tasks from a CSV file.
pub fn parse_tasks_csv(path: impl AsRef<Path>) -> Result<Vec<TaskRecord>, IngestError> {
    let file = File::open(path.as_ref())?;
    parse_tasks_csv_reader(file)
}

pub fn parse_tasks_csv_reader<R: Read>(reader: R) -> Result<Vec<TaskRecord>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut tasks = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let record = result?;

        let mut obj = Map::new();
        for (name, cell) in headers.iter().zip(record.iter()) {
            // Blank cells behave like missing fields.
            if cell.is_empty() {
                continue;
            }
            let value = if name == "dependencies" {
                split_dependencies(cell)
            } else {
                Value::String(cell.to_string())
            };
            obj.insert(name.clone(), value);
        }

        tasks.push(record_from_object(index, &obj));
    }

    Ok(tasks)
}
