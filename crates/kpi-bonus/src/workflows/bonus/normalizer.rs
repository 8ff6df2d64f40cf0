//! Turns operator-typed realisasi strings into numbers.
//!
//! Parsing never fails: empty or unparseable input reads as zero so partially filled
//! submissions still score.

/// Parses a currency-formatted value such as `"Rp 1.250.000,50"`.
///
/// Everything except digits, `.`, `,` and `-` is dropped. Dots are thousand separators
/// and commas are decimal separators, except when a dot follows the last comma
/// (`"1,234.56"`): then the dot is the decimal point and the commas group thousands.
pub fn parse_rupiah(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let kept: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();

    let dot_is_decimal = match (kept.rfind('.'), kept.rfind(',')) {
        (Some(dot), Some(comma)) => dot > comma,
        _ => false,
    };

    let normalized: String = if dot_is_decimal {
        kept.chars().filter(|c| *c != ',').collect()
    } else {
        kept.chars()
            .filter(|c| *c != '.')
            .map(|c| if c == ',' { '.' } else { c })
            .collect()
    };

    parse_finite(&normalized)
}

/// Parses a plain number or ratio, accepting `,` as the decimal point (`"2,5"`).
pub fn parse_plain(raw: &str) -> f64 {
    parse_finite(&raw.trim().replace(',', "."))
}

/// Picks the parsing rule for a KPI based on its currency flag.
pub fn normalize_realisasi(raw: &str, is_currency: bool) -> f64 {
    if is_currency {
        parse_rupiah(raw)
    } else {
        parse_plain(raw)
    }
}

fn parse_finite(value: &str) -> f64 {
    value
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .unwrap_or(0.0)
}
