// Checks whole form submissions: currency normalisation, per-field rules,
// cross-field dependencies and display formatting.
use serde::Serialize;
use shared::models::{FieldValue, FormFields};
use std::collections::BTreeMap;

use crate::config::settings::EngineSettings;
use crate::currency::{CurrencyFormatOptions, CurrencyNormalizer};
use crate::validation::RuleValidator;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReport {
    pub index: usize,
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
    /// Parsed values of the monetary fields.
    pub amounts: BTreeMap<String, f64>,
    /// Monetary fields rendered in the report currency.
    pub display: BTreeMap<String, String>,
}

#[derive(Debug)]
pub struct FormCheckService {
    validator: RuleValidator,
    normalizer: CurrencyNormalizer,
    currency: String,
    currency_fields: Vec<String>,
}

impl FormCheckService {
    pub fn new(validator: RuleValidator, normalizer: CurrencyNormalizer, currency: &str, currency_fields: Vec<String>) -> Self {
        if !normalizer.is_valid_currency_code(currency) {
            tracing::warn!(currency = %currency, "Report currency is not in the supported list; display falls back to the code");
        }
        FormCheckService {
            validator,
            normalizer,
            currency: currency.to_string(),
            currency_fields,
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(
            RuleValidator::from_settings(settings),
            CurrencyNormalizer::from_settings(settings),
            &settings.default_currency,
            settings.currency_fields.clone(),
        )
    }

    pub fn validator(&self) -> &RuleValidator {
        &self.validator
    }

    pub fn validator_mut(&mut self) -> &mut RuleValidator {
        &mut self.validator
    }

    pub fn normalizer(&self) -> &CurrencyNormalizer {
        &self.normalizer
    }

    fn is_currency_field(&self, name: &str) -> bool {
        self.currency_fields.iter().any(|field| field == name)
    }

    /// Replaces monetary text with its parsed amount. Text without any digit is
    /// left alone so the validator reports it instead of it silently becoming `0`.
    pub fn normalize(&self, fields: &FormFields) -> FormFields {
        fields
            .iter()
            .map(|(name, value)| {
                let normalized = match value {
                    FieldValue::Text(text) if self.is_currency_field(name) && text.chars().any(|c| c.is_ascii_digit()) => {
                        FieldValue::Number(self.normalizer.parse_currency_amount(value.clone()))
                    }
                    _ => value.clone(),
                };
                (name.clone(), normalized)
            })
            .collect()
    }

    pub fn check(&self, index: usize, fields: &FormFields) -> SubmissionReport {
        let normalized = self.normalize(fields);

        let mut result = self.validator.validate_form(&normalized);
        result.merge_cross_field(self.validator.validate_related_fields(&normalized));

        let options = CurrencyFormatOptions::default();
        let amounts: BTreeMap<String, f64> = normalized
            .iter()
            .filter(|(name, _)| self.is_currency_field(name))
            .filter_map(|(name, value)| value.as_number().map(|amount| (name.clone(), amount)))
            .collect();
        let display = amounts
            .iter()
            .map(|(name, amount)| (name.clone(), self.normalizer.format_currency(*amount, &self.currency, &options)))
            .collect();

        if result.is_valid {
            tracing::info!(index, fields = fields.len(), "Submission passed validation");
        } else {
            tracing::warn!(index, errors = ?result.errors, "Submission failed validation");
        }

        SubmissionReport {
            index,
            is_valid: result.is_valid,
            errors: result.errors,
            amounts,
            display,
        }
    }

    pub fn check_all(&self, submissions: &[FormFields]) -> Vec<SubmissionReport> {
        submissions
            .iter()
            .enumerate()
            .map(|(index, fields)| self.check(index, fields))
            .collect()
    }
}

impl Default for FormCheckService {
    fn default() -> Self {
        Self::from_settings(&EngineSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::related::LOAN_RATE_REQUIRED;
    use crate::validation::rules::*;
    use shared::models::ValidationRule;

    fn form(entries: &[(&str, &str)]) -> FormFields {
        entries.iter().map(|(k, v)| (k.to_string(), FieldValue::from(*v))).collect()
    }

    fn base_form() -> Vec<(&'static str, &'static str)> {
        vec![(INITIAL_INVESTMENT, "$10,000.00"), (ANNUAL_RETURN, "7.5"), (INVESTMENT_PERIOD, "10")]
    }

    #[test]
    fn test_check_valid_submission() {
        let service = FormCheckService::default();
        let report = service.check(0, &form(&base_form()));
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
        assert_eq!(report.amounts[INITIAL_INVESTMENT], 10000.0);
        assert_eq!(report.display[INITIAL_INVESTMENT], "$10,000.00");
        assert!(!report.amounts.contains_key(ANNUAL_RETURN));
    }

    #[test]
    fn test_check_merges_cross_field_errors() {
        let service = FormCheckService::default();
        let mut entries = base_form();
        entries.extend([(LOAN_AMOUNT, "1,000"), (LOAN_RATE, "0"), (LOAN_TERM, "5")]);
        let report = service.check(3, &form(&entries));
        assert_eq!(report.index, 3);
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[LOAN_RATE], LOAN_RATE_REQUIRED);
        assert_eq!(report.amounts[LOAN_AMOUNT], 1000.0);
    }

    #[test]
    fn test_rule_error_wins_over_cross_field_error() {
        let service = FormCheckService::default();
        let mut entries = base_form();
        entries.extend([(LOAN_AMOUNT, "5000"), (LOAN_RATE, "-1"), (LOAN_TERM, "5")]);
        let report = service.check(0, &form(&entries));
        assert_eq!(report.errors[LOAN_RATE], "Value must be at least 0");
    }

    #[test]
    fn test_non_numeric_money_is_reported() {
        let service = FormCheckService::default();
        let report = service.check(0, &form(&[(INITIAL_INVESTMENT, "lots"), (ANNUAL_RETURN, "5"), (INVESTMENT_PERIOD, "3")]));
        assert!(!report.is_valid);
        assert_eq!(report.errors[INITIAL_INVESTMENT], INVALID_NUMBER_MESSAGE);
        assert!(report.amounts.is_empty());
    }

    #[test]
    fn test_european_settings() {
        let settings = EngineSettings::from_json(r#"{ "locale": "de-DE", "default_currency": "EUR" }"#).unwrap();
        let service = FormCheckService::from_settings(&settings);
        let report = service.check(0, &form(&[(INITIAL_INVESTMENT, "1.234,56 €"), (ANNUAL_RETURN, "4"), (INVESTMENT_PERIOD, "2")]));
        assert!(report.is_valid);
        assert!((report.amounts[INITIAL_INVESTMENT] - 1234.56).abs() < 1e-9);
        assert_eq!(report.display[INITIAL_INVESTMENT], "1.234,56\u{a0}€");
    }

    #[test]
    fn test_normalize_leaves_other_fields() {
        let service = FormCheckService::default();
        let normalized = service.normalize(&form(&[(INITIAL_INVESTMENT, "1,5"), (TAX_RATE, "1,5"), (LOAN_AMOUNT, "")]));
        assert_eq!(normalized[INITIAL_INVESTMENT], FieldValue::Number(1.5));
        assert_eq!(normalized[TAX_RATE], FieldValue::from("1,5"));
        assert_eq!(normalized[LOAN_AMOUNT], FieldValue::from(""));
    }

    #[test]
    fn test_check_all_and_runtime_rules() {
        let mut service = FormCheckService::default();
        service.validator_mut().add_rule(ANNUAL_RETURN, ValidationRule::required().with_min(0.0).with_max(20.0));

        let submissions = vec![form(&base_form()), form(&[(INITIAL_INVESTMENT, "100"), (ANNUAL_RETURN, "25"), (INVESTMENT_PERIOD, "1")])];
        let reports = service.check_all(&submissions);
        assert_eq!(reports.len(), 2);
        assert!(reports[0].is_valid);
        assert_eq!(reports[1].index, 1);
        assert_eq!(reports[1].errors[ANNUAL_RETURN], "Value must be at most 20");
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let service = FormCheckService::default();
        let report = service.check(0, &form(&base_form()));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["isValid"], serde_json::Value::Bool(true));
        assert_eq!(json["amounts"][INITIAL_INVESTMENT], 10000.0);
    }
}
