//! Date parsing for the German-formatted exports

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static DOTTED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{2}|\d{4})$").expect("static date pattern")
});

/// Parse `dd.mm.yyyy`, `dd.mm.yy` or ISO `yyyy-mm-dd`; anything else is `None`
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(captures) = DOTTED_DATE.captures(trimmed) {
        let day: u32 = captures[1].parse().ok()?;
        let month: u32 = captures[2].parse().ok()?;
        let year_text = &captures[3];
        let mut year: i32 = year_text.parse().ok()?;
        if year_text.len() == 2 {
            year += 2000;
        }
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Join-key text for a date cell: ISO when parseable, trimmed raw otherwise
pub fn date_key(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_dates() {
        assert_eq!(parse_date("01.01.2024"), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(parse_date("3.5.24"), NaiveDate::from_ymd_opt(2024, 5, 3));
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(parse_date("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_malformed_dates_are_missing() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("31.02.2024"), None);
        assert_eq!(parse_date("Montag"), None);
    }

    #[test]
    fn test_date_key() {
        assert_eq!(date_key("01.01.2024"), "2024-01-01");
        assert_eq!(date_key("1.1.24"), "2024-01-01");
        assert_eq!(date_key(" Woche 3 "), "Woche 3");
    }
}
