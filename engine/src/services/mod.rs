// Services combining the validator and the currency normalizer for the form layer
pub mod form_check;

pub use form_check::{FormCheckService, SubmissionReport};
