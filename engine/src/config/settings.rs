// Engine settings, loaded from a JSON file or taken from defaults
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::EngineError;
use crate::validation::rules::default_currency_fields;
use shared::models::ValidationRule;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    pub locale: String,
    pub default_currency: String,
    // Monetary fields go through currency parsing before validation
    pub currency_fields: Vec<String>,
    // Merged over the default rule set
    pub rules: BTreeMap<String, ValidationRule>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            locale: "en-US".to_string(),
            default_currency: "USD".to_string(),
            currency_fields: default_currency_fields(),
            rules: BTreeMap::new(),
        }
    }
}

impl EngineSettings {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let settings = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            locale = %settings.locale,
            currency = %settings.default_currency,
            rule_overrides = settings.rules.len(),
            "Loaded engine settings"
        );
        Ok(settings)
    }

    pub fn from_json(content: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings = serde_json::from_str(content)?;
        settings.check_rules()?;
        Ok(settings)
    }

    fn check_rules(&self) -> Result<(), EngineError> {
        match self.rules.iter().find(|(_, rule)| !rule.is_consistent()) {
            Some((name, rule)) => Err(EngineError::ConfigError(format!(
                "rule for '{}' has min {:?} greater than max {:?}",
                name, rule.min, rule.max
            ))),
            None => Ok(()),
        }
    }
}
