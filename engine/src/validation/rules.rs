// Default rule set for the ROI calculator form
use shared::models::ValidationRule;
use std::collections::BTreeMap;

pub const INITIAL_INVESTMENT: &str = "initialInvestment";
pub const ANNUAL_RETURN: &str = "annualReturn";
pub const INVESTMENT_PERIOD: &str = "investmentPeriod";
pub const MONTHLY_CONTRIBUTION: &str = "monthlyContribution";
pub const LOAN_AMOUNT: &str = "loanAmount";
pub const LOAN_RATE: &str = "loanRate";
pub const LOAN_TERM: &str = "loanTerm";
pub const TAX_RATE: &str = "taxRate";
pub const INFLATION_RATE: &str = "inflationRate";
pub const REINVESTMENT_PERCENTAGE: &str = "reinvestmentPercentage";
pub const REINVESTMENT_THRESHOLD: &str = "reinvestmentThreshold";

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_NUMBER_MESSAGE: &str = "Please enter a valid number";

pub fn min_message(min: f64) -> String {
    format!("Value must be at least {}", min)
}

pub fn max_message(max: f64) -> String {
    format!("Value must be at most {}", max)
}

/// Rules keyed by field name.
pub type RuleSet = BTreeMap<String, ValidationRule>;

pub fn default_rules() -> RuleSet {
    [
        (INITIAL_INVESTMENT, ValidationRule::required().with_min(0.0).with_max(1_000_000_000.0)),
        (ANNUAL_RETURN, ValidationRule::required().with_min(-100.0).with_max(1000.0)),
        (INVESTMENT_PERIOD, ValidationRule::required().with_min(1.0).with_max(100.0)),
        (MONTHLY_CONTRIBUTION, ValidationRule::optional().with_min(0.0).with_max(10_000_000.0)),
        (LOAN_AMOUNT, ValidationRule::optional().with_min(0.0).with_max(1_000_000_000.0)),
        (LOAN_RATE, ValidationRule::optional().with_min(0.0).with_max(100.0)),
        (LOAN_TERM, ValidationRule::optional().with_min(0.0).with_max(50.0)),
        (TAX_RATE, ValidationRule::optional().with_min(0.0).with_max(100.0)),
        (INFLATION_RATE, ValidationRule::optional().with_min(-10.0).with_max(100.0)),
        (REINVESTMENT_PERCENTAGE, ValidationRule::optional().with_min(0.0).with_max(100.0)),
        (REINVESTMENT_THRESHOLD, ValidationRule::optional().with_min(0.0)),
    ]
    .into_iter()
    .map(|(name, rule)| (name.to_string(), rule))
    .collect()
}

/// Monetary fields of the default form, normalised as currency before validation.
pub fn default_currency_fields() -> Vec<String> {
    [INITIAL_INVESTMENT, MONTHLY_CONTRIBUTION, LOAN_AMOUNT, REINVESTMENT_THRESHOLD]
        .iter()
        .map(|name| name.to_string())
        .collect()
}
