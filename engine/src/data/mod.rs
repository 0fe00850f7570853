// Batch input sources for form submissions
pub mod csv_parser;

pub use csv_parser::FormCsvParser;
