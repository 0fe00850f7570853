use csv::{ReaderBuilder, StringRecord, Trim};
use shared::models::{FieldValue, FormFields};
use std::fs::File;
use std::io::{BufReader, Read};

use crate::error::EngineError;

/// Reads batches of form submissions from `;`-delimited files.
///
/// Header: one column per form field, e.g. `initialInvestment;annualReturn;investmentPeriod`
/// Row:    `10.000,00;7,5;10`
pub struct FormCsvParser;

impl FormCsvParser {
    pub fn load_submissions(file_path: &str) -> Result<Vec<FormFields>, EngineError> {
        let file = File::open(file_path)?;
        let submissions = Self::read_submissions(BufReader::new(file))?;
        tracing::info!(path = %file_path, count = submissions.len(), "Loaded form submissions from CSV");
        Ok(submissions)
    }

    pub fn read_submissions<R: Read>(reader: R) -> Result<Vec<FormFields>, EngineError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true) // Row length is checked below to report the line
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if headers.iter().any(str::is_empty) {
            return Err(EngineError::CsvDataFormatError("Header row contains an empty field name".to_string()));
        }

        let mut submissions = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = idx + 2;
            if record.len() != headers.len() {
                return Err(EngineError::CsvDataFormatError(format!(
                    "Expected {} fields but found {} at line {}",
                    headers.len(),
                    record.len(),
                    line
                )));
            }
            submissions.push(Self::to_fields(&headers, &record));
        }
        Ok(submissions)
    }

    fn to_fields(headers: &StringRecord, record: &StringRecord) -> FormFields {
        headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| {
                let value = if cell.is_empty() { FieldValue::Empty } else { FieldValue::from(cell) };
                (name.to_string(), value)
            })
            .collect()
    }
}
