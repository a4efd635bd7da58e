//! Failure-tolerant numeric casting for locale-formatted cells

use crate::constants::MISSING_TOKENS;

/// Parse a cell written with either decimal separator
///
/// `"3,14"` and `"3.14"` both give `3.14`. Missing-value spellings (`"-"`,
/// blank, a lone space) and anything unparseable give `None`.
pub fn parse_locale_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if MISSING_TOKENS.contains(&trimmed) {
        return None;
    }

    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Canonical text for identifiers that may be written as numbers ("1", "1,0", "1.0")
pub fn canonical_identifier(raw: &str) -> String {
    let trimmed = raw.trim();
    match parse_locale_number(trimmed) {
        Some(value) if value.fract() == 0.0 && value.abs() < 1e15 => format!("{}", value as i64),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_comma() {
        assert_eq!(parse_locale_number("3,14"), Some(3.14));
        assert_eq!(parse_locale_number(" 7,00 "), Some(7.0));
    }

    #[test]
    fn test_decimal_point() {
        assert_eq!(parse_locale_number("6.80"), Some(6.8));
        assert_eq!(parse_locale_number("-0.5"), Some(-0.5));
    }

    #[test]
    fn test_missing_tokens() {
        assert_eq!(parse_locale_number("-"), None);
        assert_eq!(parse_locale_number(" "), None);
        assert_eq!(parse_locale_number(""), None);
        assert_eq!(parse_locale_number("NaN"), None);
    }

    #[test]
    fn test_unparseable_is_missing() {
        assert_eq!(parse_locale_number("ca. 7"), None);
        assert_eq!(parse_locale_number("1.234,5"), None);
        assert_eq!(parse_locale_number("inf"), None);
    }

    #[test]
    fn test_canonical_identifier() {
        assert_eq!(canonical_identifier("1"), "1");
        assert_eq!(canonical_identifier("1,0"), "1");
        assert_eq!(canonical_identifier(" 2.0 "), "2");
        assert_eq!(canonical_identifier("A3"), "A3");
        assert_eq!(canonical_identifier("1,5"), "1,5");
    }
}
