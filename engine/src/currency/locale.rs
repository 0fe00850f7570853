// Locale-aware number formatting primitive used by the normalizer.
//
// The normalizer only depends on the `LocaleFormatter` trait; any refusal from
// a formatter sends it down the symbol-table fallback path.
use shared::utils::format_grouped;

use super::symbols::currency_symbol;
use crate::error::EngineError;

const NBSP: &str = "\u{a0}";
const NARROW_NBSP: &str = "\u{202f}";

/// Minimum and maximum number of fraction digits to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractionDigits {
    pub min: usize,
    pub max: usize,
}

impl FractionDigits {
    pub const fn fixed(digits: usize) -> Self {
        Self { min: digits, max: digits }
    }
}

impl Default for FractionDigits {
    fn default() -> Self {
        Self::fixed(2)
    }
}

pub trait LocaleFormatter: Send + Sync {
    /// Amount with currency symbol, e.g. `$1,234.56` or `1.234,56 €`.
    fn format_currency(&self, locale: &str, amount: f64, code: &str, digits: FractionDigits) -> Result<String, EngineError>;

    /// Grouped decimal number without any currency marker.
    fn format_decimal(&self, locale: &str, amount: f64, digits: FractionDigits) -> Result<String, EngineError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPosition {
    Prefix,
    Suffix,
}

#[derive(Debug, Clone, Copy)]
struct LocaleConventions {
    tag: &'static str,
    group: &'static str,
    decimal: &'static str,
    position: SymbolPosition,
    spacing: &'static str,
}

const LOCALES: &[LocaleConventions] = &[
    LocaleConventions { tag: "en-US", group: ",", decimal: ".", position: SymbolPosition::Prefix, spacing: "" },
    LocaleConventions { tag: "en-GB", group: ",", decimal: ".", position: SymbolPosition::Prefix, spacing: "" },
    LocaleConventions { tag: "ja-JP", group: ",", decimal: ".", position: SymbolPosition::Prefix, spacing: "" },
    LocaleConventions { tag: "de-DE", group: ".", decimal: ",", position: SymbolPosition::Suffix, spacing: NBSP },
    LocaleConventions { tag: "es-ES", group: ".", decimal: ",", position: SymbolPosition::Suffix, spacing: NBSP },
    LocaleConventions { tag: "fr-FR", group: NARROW_NBSP, decimal: ",", position: SymbolPosition::Suffix, spacing: NBSP },
    LocaleConventions { tag: "pt-BR", group: ".", decimal: ",", position: SymbolPosition::Prefix, spacing: NBSP },
];

/// Formatter backed by a small built-in table of locale conventions.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLocaleFormatter;

impl BuiltinLocaleFormatter {
    fn conventions(locale: &str) -> Result<&'static LocaleConventions, EngineError> {
        let normalized = locale.trim().replace('_', "-");
        LOCALES
            .iter()
            .find(|c| c.tag.eq_ignore_ascii_case(&normalized))
            .or_else(|| {
                // A bare language tag picks the first region listed for it
                LOCALES.iter().find(|c| {
                    c.tag
                        .split('-')
                        .next()
                        .is_some_and(|language| language.eq_ignore_ascii_case(&normalized))
                })
            })
            .ok_or_else(|| EngineError::UnsupportedLocale(locale.to_string()))
    }
}

impl LocaleFormatter for BuiltinLocaleFormatter {
    fn format_currency(&self, locale: &str, amount: f64, code: &str, digits: FractionDigits) -> Result<String, EngineError> {
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(EngineError::InvalidCurrencyCode(code.to_string()));
        }
        let conventions = Self::conventions(locale)?;
        let code = code.to_ascii_uppercase();
        let symbol = currency_symbol(&code);

        // Letter symbols (codes, "kr", "CHF") never touch the digits
        let spacing = if conventions.spacing.is_empty() && symbol.chars().last().is_some_and(char::is_alphabetic) {
            NBSP
        } else {
            conventions.spacing
        };

        let number = format_grouped(amount.abs(), digits.min, digits.max, conventions.group, conventions.decimal);
        let sign = if amount < 0.0 { "-" } else { "" };

        Ok(match conventions.position {
            SymbolPosition::Prefix => format!("{}{}{}{}", sign, symbol, spacing, number),
            SymbolPosition::Suffix => format!("{}{}{}{}", sign, number, conventions.spacing, symbol),
        })
    }

    fn format_decimal(&self, locale: &str, amount: f64, digits: FractionDigits) -> Result<String, EngineError> {
        let conventions = Self::conventions(locale)?;
        Ok(format_grouped(amount, digits.min, digits.max, conventions.group, conventions.decimal))
    }
}
