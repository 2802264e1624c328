// workbench-core/src/domain/formats.rs

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// Literal patterns: compilation cannot fail.
#[allow(clippy::expect_used)]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

#[allow(clippy::expect_used)]
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is a valid regex"));

pub fn is_blank(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v.eq_ignore_ascii_case("null")
}

pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

/// `YYYY-MM-DD` that is also a real calendar date (rejects 2024-02-30).
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let v = value.trim();
    if !ISO_DATE.is_match(v) {
        return None;
    }
    NaiveDate::parse_from_str(v, ISO_DATE_FORMAT).ok()
}

pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(is_email("a@x.com"));
        assert!(is_email(" jane.doe@corp.co.uk "));
        assert!(!is_email("bad-email"));
        assert!(!is_email("a@b"));
        assert!(!is_email(""));
    }

    #[test]
    fn test_iso_date() {
        assert!(parse_iso_date("2024-02-29").is_some());
        assert!(parse_iso_date("2023-02-29").is_none());
        assert!(parse_iso_date("2024/01/01").is_none());
        assert!(parse_iso_date("2024-1-1").is_none());
    }

    #[test]
    fn test_number_and_blank() {
        assert_eq!(parse_number(" 42 "), Some(42.0));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("abc"), None);
        assert!(is_blank("  "));
        assert!(is_blank("NULL"));
        assert!(!is_blank("0"));
    }
}
