pub mod models;
pub mod utils;

pub use models::{CrossFieldErrors, FieldValue, FormFields, FormValidationResult, ValidationResult, ValidationRule};
