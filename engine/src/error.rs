use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration parse error: {source}")]
    ConfigParseError {
        #[from]
        source: serde_json::Error,
    },

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    // Raised by a locale formatter; the normalizer turns it into the fallback path.
    #[error("Locale '{0}' is not supported by the formatter")]
    UnsupportedLocale(String),

    #[error("Currency code '{0}' cannot be formatted")]
    InvalidCurrencyCode(String),
}
