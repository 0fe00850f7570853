// Engine library root: input validation and currency normalization for the ROI calculator.

pub mod config;
pub mod currency;
pub mod data;
pub mod error;
pub mod services;
pub mod validation;

pub use config::EngineSettings;
pub use currency::{CurrencyFormatOptions, CurrencyNormalizer, PercentageOptions};
pub use error::EngineError;
pub use services::{FormCheckService, SubmissionReport};
pub use validation::RuleValidator;
