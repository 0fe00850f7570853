// Field validation against per-field numeric rules
pub mod related;
pub mod rules;

use shared::models::{CrossFieldErrors, FieldValue, FormFields, FormValidationResult, ValidationResult, ValidationRule};

use crate::config::settings::EngineSettings;
use rules::RuleSet;

/// Validates form values against a mapping of field name to rule.
///
/// Fields without a rule are always valid. Mutation goes through `&mut self`,
/// so concurrent callers have to share the validator behind their own lock.
#[derive(Debug, Clone)]
pub struct RuleValidator {
    rules: RuleSet,
}

impl RuleValidator {
    /// Validator carrying the default ROI form rules.
    pub fn new() -> Self {
        Self { rules: rules::default_rules() }
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Default rules with the configured overrides merged on top.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        let mut validator = Self::new();
        for (name, rule) in &settings.rules {
            validator.add_rule(name, *rule);
        }
        validator
    }

    pub fn validate_field(&self, name: &str, raw_value: impl Into<FieldValue>) -> ValidationResult {
        let Some(rule) = self.rules.get(name) else {
            return ValidationResult::ok();
        };
        let value = raw_value.into();

        if value.is_empty() {
            return if rule.required {
                ValidationResult::invalid(rules::REQUIRED_MESSAGE)
            } else {
                ValidationResult::ok()
            };
        }

        let Some(number) = value.as_number() else {
            return ValidationResult::invalid(rules::INVALID_NUMBER_MESSAGE);
        };

        if let Some(min) = rule.min {
            if number < min {
                return ValidationResult::invalid(rules::min_message(min));
            }
        }
        if let Some(max) = rule.max {
            if number > max {
                return ValidationResult::invalid(rules::max_message(max));
            }
        }

        ValidationResult::ok()
    }

    /// Validates every field present in `fields` independently. Cross-field
    /// dependencies are not part of this result; see [`Self::validate_related_fields`].
    pub fn validate_form(&self, fields: &FormFields) -> FormValidationResult {
        let errors: std::collections::BTreeMap<String, String> = fields
            .iter()
            .filter_map(|(name, value)| {
                let result = self.validate_field(name, value.clone());
                result.error_message.map(|message| (name.clone(), message))
            })
            .collect();

        FormValidationResult { is_valid: errors.is_empty(), errors }
    }

    pub fn validate_related_fields(&self, fields: &FormFields) -> CrossFieldErrors {
        related::validate_related_fields(fields)
    }

    pub fn get_field_rules(&self, name: &str) -> Option<&ValidationRule> {
        self.rules.get(name)
    }

    /// Inserts or replaces the rule for `name`. The rule's own bounds are not checked.
    pub fn add_rule(&mut self, name: &str, rule: ValidationRule) {
        tracing::debug!(field = %name, ?rule, "Adding validation rule");
        self.rules.insert(name.to_string(), rule);
    }

    pub fn remove_rule(&mut self, name: &str) -> Option<ValidationRule> {
        tracing::debug!(field = %name, "Removing validation rule");
        self.rules.remove(name)
    }

    /// Consuming variant of [`Self::add_rule`] for building validators up front.
    pub fn with_rule(mut self, name: &str, rule: ValidationRule) -> Self {
        self.rules.insert(name.to_string(), rule);
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl Default for RuleValidator {
    fn default() -> Self {
        Self::new()
    }
}
