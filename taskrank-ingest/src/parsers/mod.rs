pub mod csv_table;
pub mod json_array;
