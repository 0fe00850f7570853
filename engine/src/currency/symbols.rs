// Currency symbol table and code allow-list

/// Common ISO codes and their display symbols. Membership here is what makes a
/// code "valid"; this is not full ISO-4217 coverage.
pub const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CNY", "¥"),
    ("INR", "₹"),
    ("AUD", "A$"),
    ("CAD", "C$"),
    ("CHF", "CHF"),
    ("SEK", "kr"),
    ("NOK", "kr"),
    ("DKK", "kr"),
    ("PLN", "zł"),
    ("BRL", "R$"),
    ("MXN", "MX$"),
    ("ZAR", "R"),
    ("KRW", "₩"),
    ("RUB", "₽"),
    ("TRY", "₺"),
    ("HKD", "HK$"),
    ("SGD", "S$"),
    ("NZD", "NZ$"),
    ("ILS", "₪"),
    ("THB", "฿"),
    ("CZK", "Kč"),
    ("HUF", "Ft"),
];

/// Single-character currency signs stripped while parsing, beyond the table above.
const EXTRA_SIGNS: &[char] = &['¢', '₫', '₱', '₦', '₴', '₼', '₾'];

/// Symbol for `code`, or the code itself when it is not in the table.
pub fn currency_symbol(code: &str) -> &str {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(code, |(_, symbol)| symbol)
}

/// Exactly three uppercase ASCII letters and present in the allow-list.
pub fn is_valid_currency_code(code: &str) -> bool {
    code.len() == 3
        && code.bytes().all(|b| b.is_ascii_uppercase())
        && CURRENCY_SYMBOLS.iter().any(|(known, _)| *known == code)
}

/// Removes currency codes, symbols (longest first, so `HK$` goes before `$`)
/// and whitespace from a raw amount string.
pub fn strip_currency_tokens(raw: &str) -> String {
    let mut tokens: Vec<&str> = CURRENCY_SYMBOLS
        .iter()
        .flat_map(|(code, symbol)| [*code, *symbol])
        .collect();
    tokens.sort_by_key(|token| std::cmp::Reverse(token.chars().count()));
    tokens.dedup();

    let mut cleaned = raw.to_string();
    for token in tokens {
        if cleaned.contains(token) {
            cleaned = cleaned.replace(token, "");
        }
    }

    cleaned
        .chars()
        .filter(|c| !c.is_whitespace() && !EXTRA_SIGNS.contains(c))
        .collect()
}
