// Currency normalization: parsing, formatting and precision-safe comparison
pub mod format;
pub mod locale;
pub mod parse;
pub mod symbols;

use shared::models::FieldValue;
use shared::utils::round_to_precision;
use std::cmp::Ordering;

use crate::config::settings::EngineSettings;
pub use format::PercentageOptions;
pub use locale::{BuiltinLocaleFormatter, FractionDigits, LocaleFormatter};

pub const DEFAULT_LOCALE: &str = "en-US";
pub const DEFAULT_COMPARISON_PRECISION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatOptions {
    /// Overrides the normalizer's locale for one call.
    pub locale: Option<String>,
    pub min_fraction_digits: usize,
    pub max_fraction_digits: usize,
}

impl CurrencyFormatOptions {
    pub fn digits(&self) -> FractionDigits {
        FractionDigits { min: self.min_fraction_digits, max: self.max_fraction_digits }
    }
}

impl Default for CurrencyFormatOptions {
    fn default() -> Self {
        Self { locale: None, min_fraction_digits: 2, max_fraction_digits: 2 }
    }
}

/// Converts between amounts and locale-formatted currency text.
///
/// Every operation is total: formatter refusals degrade to the symbol-table
/// fallback and unparseable input parses as `0`.
pub struct CurrencyNormalizer {
    locale: String,
    formatter: Box<dyn LocaleFormatter>,
}

impl CurrencyNormalizer {
    pub fn new() -> Self {
        Self::with_locale(DEFAULT_LOCALE)
    }

    pub fn with_locale(locale: &str) -> Self {
        Self::with_formatter(locale, Box::new(BuiltinLocaleFormatter))
    }

    pub fn with_formatter(locale: &str, formatter: Box<dyn LocaleFormatter>) -> Self {
        Self { locale: locale.to_string(), formatter }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::with_locale(&settings.locale)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn format_currency(&self, amount: f64, code: &str, options: &CurrencyFormatOptions) -> String {
        let locale = options.locale.as_deref().unwrap_or(&self.locale);
        match self.formatter.format_currency(locale, amount, code, options.digits()) {
            Ok(formatted) => formatted,
            Err(e) => {
                tracing::debug!(currency = %code, locale = %locale, error = %e, "Locale formatter refused currency, using fallback");
                format::fallback_currency(amount, code, options.max_fraction_digits)
            }
        }
    }

    /// Grouped two-decimal number without the currency symbol.
    pub fn format_currency_amount(&self, amount: f64, code: &str) -> String {
        let digits = FractionDigits::default();
        match self.formatter.format_decimal(&self.locale, amount, digits) {
            Ok(formatted) => formatted,
            Err(e) => {
                tracing::debug!(currency = %code, locale = %self.locale, error = %e, "Locale formatter refused amount, using fallback");
                format::fallback_amount(amount, digits.max)
            }
        }
    }

    pub fn get_currency_symbol<'a>(&self, code: &'a str) -> &'a str {
        symbols::currency_symbol(code)
    }

    pub fn format_exchange_rate(&self, rate: f64, from_code: &str, to_code: &str) -> String {
        format::exchange_rate(rate, from_code, to_code)
    }

    pub fn format_currency_percentage(&self, value: f64, options: &PercentageOptions) -> String {
        format::percentage(value, options)
    }

    pub fn parse_currency_amount(&self, raw: impl Into<FieldValue>) -> f64 {
        parse::parse_currency_amount(&raw.into())
    }

    /// `€1.5M`-style abbreviation from a thousand upwards, full currency text below.
    pub fn format_large_currency(&self, amount: f64, code: &str) -> String {
        format::abbreviated(amount, code)
            .unwrap_or_else(|| self.format_currency(amount, code, &CurrencyFormatOptions::default()))
    }

    /// Compares two amounts after rounding both to `precision` decimal digits.
    pub fn compare_currency_amounts(&self, a: f64, b: f64, precision: u32) -> Ordering {
        let a = round_to_precision(a, precision);
        let b = round_to_precision(b, precision);
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    }

    pub fn is_valid_currency_code(&self, code: &str) -> bool {
        symbols::is_valid_currency_code(code)
    }
}

impl Default for CurrencyNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CurrencyNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyNormalizer").field("locale", &self.locale).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    /// Formatter standing in for a host engine that rejects everything.
    struct RefusingFormatter;

    impl LocaleFormatter for RefusingFormatter {
        fn format_currency(&self, locale: &str, _: f64, _: &str, _: FractionDigits) -> Result<String, EngineError> {
            Err(EngineError::UnsupportedLocale(locale.to_string()))
        }

        fn format_decimal(&self, locale: &str, _: f64, _: FractionDigits) -> Result<String, EngineError> {
            Err(EngineError::UnsupportedLocale(locale.to_string()))
        }
    }

    #[test]
    fn test_format_currency_default_locale() {
        let normalizer = CurrencyNormalizer::new();
        let options = CurrencyFormatOptions::default();
        assert_eq!(normalizer.format_currency(1234.5, "USD", &options), "$1,234.50");
        assert_eq!(normalizer.format_currency(0.0, "EUR", &options), "€0.00");
    }

    #[test]
    fn test_format_currency_locale_override() {
        let normalizer = CurrencyNormalizer::new();
        let options = CurrencyFormatOptions { locale: Some("de-DE".to_string()), ..Default::default() };
        assert_eq!(normalizer.format_currency(1234.5, "EUR", &options), "1.234,50\u{a0}€");
    }

    #[test]
    fn test_format_currency_fraction_digits() {
        let normalizer = CurrencyNormalizer::new();
        let options = CurrencyFormatOptions { locale: None, min_fraction_digits: 0, max_fraction_digits: 0 };
        assert_eq!(normalizer.format_currency(1234.56, "JPY", &options), "¥1,235");
    }

    #[test]
    fn test_format_currency_falls_back_on_unknown_locale() {
        let normalizer = CurrencyNormalizer::with_locale("tlh-001");
        let options = CurrencyFormatOptions::default();
        assert_eq!(normalizer.format_currency(1234.5, "EUR", &options), "€1,234.50");
        assert_eq!(normalizer.format_currency(1234.5, "ABC", &options), "ABC1,234.50");
    }

    #[test]
    fn test_format_currency_falls_back_on_malformed_code() {
        let normalizer = CurrencyNormalizer::new();
        let options = CurrencyFormatOptions::default();
        assert_eq!(normalizer.format_currency(10.0, "DOLLAR", &options), "DOLLAR10.00");
    }

    #[test]
    fn test_injected_formatter_refusal_uses_fallback() {
        let normalizer = CurrencyNormalizer::with_formatter("en-US", Box::new(RefusingFormatter));
        assert_eq!(normalizer.format_currency(-42.0, "GBP", &CurrencyFormatOptions::default()), "£-42.00");
        assert_eq!(normalizer.format_currency_amount(1234567.891, "GBP"), "1,234,567.89");
    }

    #[test]
    fn test_format_currency_amount() {
        assert_eq!(CurrencyNormalizer::new().format_currency_amount(1234.5, "USD"), "1,234.50");
        assert_eq!(CurrencyNormalizer::with_locale("de-DE").format_currency_amount(1234.5, "EUR"), "1.234,50");
    }

    #[test]
    fn test_get_currency_symbol() {
        let normalizer = CurrencyNormalizer::new();
        assert_eq!(normalizer.get_currency_symbol("JPY"), "¥");
        assert_eq!(normalizer.get_currency_symbol("NOPE"), "NOPE");
    }

    #[test]
    fn test_format_exchange_rate() {
        let normalizer = CurrencyNormalizer::new();
        assert_eq!(normalizer.format_exchange_rate(1.08, "EUR", "USD"), "1 EUR = 1.0800 USD");
    }

    #[test]
    fn test_format_currency_percentage() {
        let normalizer = CurrencyNormalizer::new();
        let signed = PercentageOptions { show_sign: true, ..Default::default() };
        assert_eq!(normalizer.format_currency_percentage(5.5, &signed), "+5.50%");
        assert_eq!(normalizer.format_currency_percentage(0.0, &signed), "0.00%");
        assert_eq!(normalizer.format_currency_percentage(5.5, &PercentageOptions::default()), "5.50%");
        assert_eq!(normalizer.format_currency_percentage(-3.0, &PercentageOptions::default()), "3.00%");
        assert_eq!(normalizer.format_currency_percentage(-3.0, &signed), "-3.00%");
    }

    #[test]
    fn test_parse_currency_amount_formats() {
        let normalizer = CurrencyNormalizer::new();
        assert!((normalizer.parse_currency_amount("1.234,56") - 1234.56).abs() < 1e-9);
        assert!((normalizer.parse_currency_amount("1,234.56") - 1234.56).abs() < 1e-9);
        assert!((normalizer.parse_currency_amount("12,5") - 12.5).abs() < 1e-9);
        assert_eq!(normalizer.parse_currency_amount("1,234"), 1234.0);
        assert_eq!(normalizer.parse_currency_amount(99.5), 99.5);
        assert_eq!(normalizer.parse_currency_amount(None::<f64>), 0.0);
        assert_eq!(normalizer.parse_currency_amount("garbage"), 0.0);
    }

    #[test]
    fn test_format_large_currency() {
        let normalizer = CurrencyNormalizer::new();
        let millions = normalizer.format_large_currency(1_500_000.0, "EUR");
        assert!(millions.ends_with("1.5M"));
        assert!(millions.contains('€'));

        let negative = normalizer.format_large_currency(-2500.0, "USD");
        assert!(negative.ends_with('K'));
        assert!(negative.contains("-2.5"));

        assert_eq!(normalizer.format_large_currency(3_200_000_000.0, "USD"), "$3.2B");
        assert_eq!(normalizer.format_large_currency(999.0, "USD"), "$999.00");
        assert_eq!(normalizer.format_large_currency(999_950.0, "USD"), "$1.0M");
    }

    #[test]
    fn test_compare_currency_amounts() {
        let normalizer = CurrencyNormalizer::new();
        assert_eq!(normalizer.compare_currency_amounts(10.001, 10.004, 2), Ordering::Equal);
        assert_eq!(normalizer.compare_currency_amounts(10.004, 10.006, 2), Ordering::Less);
        assert_eq!(normalizer.compare_currency_amounts(10.004, 10.006, 3), Ordering::Less);
        assert_eq!(normalizer.compare_currency_amounts(10.006, 10.004, 3), Ordering::Greater);
        assert_eq!(normalizer.compare_currency_amounts(0.1 + 0.2, 0.3, DEFAULT_COMPARISON_PRECISION), Ordering::Equal);
    }

    #[test]
    fn test_compare_currency_amounts_beyond_f64_scale() {
        let normalizer = CurrencyNormalizer::new();
        assert_eq!(normalizer.compare_currency_amounts(1.0, 2.0, 400), Ordering::Less);
        assert_eq!(normalizer.compare_currency_amounts(1e300, 2e300, 10), Ordering::Less);
        assert_eq!(normalizer.compare_currency_amounts(5.0, 5.0, u32::MAX), Ordering::Equal);
    }

    #[test]
    fn test_is_valid_currency_code() {
        let normalizer = CurrencyNormalizer::new();
        assert!(!normalizer.is_valid_currency_code("eur"));
        assert!(normalizer.is_valid_currency_code("EUR"));
        assert!(!normalizer.is_valid_currency_code("XYZ"));
    }

    #[test]
    fn test_amount_round_trip() {
        let amounts = [0.0, 1.0, 12.5, 999.99, 1234.56, 1_000_000.0, -9_876_543.21];
        let cases = [("en-US", "USD"), ("de-DE", "EUR"), ("fr-FR", "EUR"), ("pt-BR", "BRL"), ("en-GB", "GBP")];
        for (locale, code) in cases {
            let normalizer = CurrencyNormalizer::with_locale(locale);
            for amount in amounts {
                let formatted = normalizer.format_currency_amount(amount, code);
                let parsed = normalizer.parse_currency_amount(formatted.as_str());
                assert_eq!(
                    normalizer.compare_currency_amounts(parsed, amount, 2),
                    Ordering::Equal,
                    "{} {} -> {} -> {}",
                    locale,
                    amount,
                    formatted,
                    parsed
                );
            }
        }
    }

    #[test]
    fn test_currency_text_round_trip() {
        let cases = [("en-US", "USD"), ("de-DE", "EUR"), ("pt-BR", "BRL"), ("en-US", "CHF"), ("en-US", "HKD")];
        for (locale, code) in cases {
            let normalizer = CurrencyNormalizer::with_locale(locale);
            let formatted = normalizer.format_currency(-4321.09, code, &CurrencyFormatOptions::default());
            assert!((normalizer.parse_currency_amount(formatted.as_str()) + 4321.09).abs() < 1e-9, "{}", formatted);
        }
    }
}
