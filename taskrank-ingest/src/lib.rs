//! taskrank-ingest: boundary validation from loose task input (JSON, CSV)
//! into normalized `TaskRecord`s.

pub mod error;
pub mod fields;
pub mod parsers;

pub use error::IngestError;
pub use fields::record_from_object;
pub use parsers::csv_table::{parse_tasks_csv, parse_tasks_csv_reader};
pub use parsers::json_array::{parse_tasks_json, tasks_from_value};
