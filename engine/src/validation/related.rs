// Dependency rules that span two fields
use shared::models::{CrossFieldErrors, FieldValue, FormFields};

use super::rules::{LOAN_AMOUNT, LOAN_RATE, LOAN_TERM, REINVESTMENT_PERCENTAGE, REINVESTMENT_THRESHOLD};

pub const LOAN_RATE_REQUIRED: &str = "Interest rate is required when a loan amount is entered";
pub const LOAN_TERM_REQUIRED: &str = "Loan term is required when a loan amount is entered";
pub const REINVESTMENT_THRESHOLD_REQUIRED: &str =
    "Reinvestment threshold is required when a reinvestment percentage is entered";

/// A trigger field implies that each dependent field is present and positive.
struct Dependency {
    trigger: &'static str,
    dependents: &'static [(&'static str, &'static str)],
}

const DEPENDENCIES: &[Dependency] = &[
    Dependency {
        trigger: LOAN_AMOUNT,
        dependents: &[(LOAN_RATE, LOAN_RATE_REQUIRED), (LOAN_TERM, LOAN_TERM_REQUIRED)],
    },
    Dependency {
        trigger: REINVESTMENT_PERCENTAGE,
        dependents: &[(REINVESTMENT_THRESHOLD, REINVESTMENT_THRESHOLD_REQUIRED)],
    },
];

fn is_positive(fields: &FormFields, name: &str) -> bool {
    fields
        .get(name)
        .and_then(FieldValue::as_number)
        .is_some_and(|value| value > 0.0)
}

pub fn validate_related_fields(fields: &FormFields) -> CrossFieldErrors {
    let mut errors = CrossFieldErrors::new();

    for dependency in DEPENDENCIES.iter().filter(|d| is_positive(fields, d.trigger)) {
        for (dependent, message) in dependency.dependents {
            if !is_positive(fields, dependent) {
                tracing::debug!(trigger = dependency.trigger, field = dependent, "Cross-field dependency not satisfied");
                errors.insert(dependent.to_string(), message.to_string());
            }
        }
    }

    errors
}
