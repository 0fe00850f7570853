// Currency string parsing with ambiguous-separator resolution
use shared::models::FieldValue;
use shared::utils::parse_leading_number;

use super::symbols::strip_currency_tokens;

/// Parses a raw amount into a number. Total: anything unparseable is `0`.
pub fn parse_currency_amount(raw: &FieldValue) -> f64 {
    match raw {
        FieldValue::Number(n) if n.is_nan() => 0.0,
        FieldValue::Number(n) => *n,
        FieldValue::Text(s) if s.is_empty() => 0.0,
        FieldValue::Text(s) => parse_currency_str(s),
        FieldValue::Empty => 0.0,
    }
}

pub fn parse_currency_str(raw: &str) -> f64 {
    let cleaned = strip_currency_tokens(raw);
    let normalized = resolve_separators(&cleaned);
    parse_leading_number(&normalized).unwrap_or(0.0)
}

/// Rewrites `,`/`.` so that only `.` remains, as the decimal point.
///
/// - Both present: whichever occurs last is the decimal point, the other one
///   is a thousands separator.
/// - Only commas: a single comma followed by at most two digits is a decimal
///   point; otherwise every comma is a thousands separator.
pub fn resolve_separators(cleaned: &str) -> String {
    let last_comma = cleaned.rfind(',');
    let last_dot = cleaned.rfind('.');

    match (last_comma, last_dot) {
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(comma), None) => {
            let single = cleaned.matches(',').count() == 1;
            if single && cleaned.len() - comma - 1 <= 2 {
                cleaned.replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
        (None, _) => cleaned.to_string(),
    }
}
