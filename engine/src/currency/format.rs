// Locale-independent renderings: fallback currency text, percentages,
// exchange rates and abbreviated magnitudes.
use shared::utils::format_grouped;

use super::symbols::currency_symbol;

/// Symbol-table rendering used when the locale formatter refuses a request:
/// symbol (or the code itself) followed by a `,`-grouped fixed-decimal number.
pub fn fallback_currency(amount: f64, code: &str, decimals: usize) -> String {
    format!("{}{}", currency_symbol(code), fallback_amount(amount, decimals))
}

pub fn fallback_amount(amount: f64, decimals: usize) -> String {
    format_grouped(amount, decimals, decimals, ",", ".")
}

pub fn exchange_rate(rate: f64, from: &str, to: &str) -> String {
    format!("1 {} = {:.4} {}", from, rate, to)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentageOptions {
    pub decimals: usize,
    pub show_sign: bool,
}

impl Default for PercentageOptions {
    fn default() -> Self {
        Self { decimals: 2, show_sign: false }
    }
}

/// Renders the absolute value: `12.35%`. With `show_sign` non-zero values get
/// `+` or `-` in front (`+12.35%`, `-3.00%`); zero is never signed.
pub fn percentage(value: f64, options: &PercentageOptions) -> String {
    let sign = match (options.show_sign, value) {
        (true, v) if v > 0.0 => "+",
        (true, v) if v < 0.0 => "-",
        _ => "",
    };
    format!("{}{:.*}%", sign, options.decimals, value.abs())
}

const MAGNITUDES: &[(f64, &str)] = &[(1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Abbreviates amounts of at least a thousand to one decimal with a `K`, `M`
/// or `B` suffix. Returns `None` below a thousand.
pub fn abbreviated(amount: f64, code: &str) -> Option<String> {
    let magnitude = amount.abs();
    let mut tier = MAGNITUDES.iter().position(|(threshold, _)| magnitude >= *threshold)?;
    // 999,950 rounds to 1000.0K, which reads as 1.0M
    if tier > 0 && (magnitude / MAGNITUDES[tier].0 * 10.0).round() >= 10_000.0 {
        tier -= 1;
    }
    let (threshold, suffix) = MAGNITUDES[tier];
    Some(format!("{}{:.1}{}", currency_symbol(code), amount / threshold, suffix))
}
