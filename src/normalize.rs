//! Cell normalization: month resolution and amount parsing.
//!
//! Both operations are pure and return `None` for anything they do not
//! recognize. Nothing is coerced into a month or an amount by guesswork.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::cell::Cell;

const MONTH_NAMES: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

// (abbreviation, 0-based month)
const MONTH_ABBREVIATIONS: &[(&str, u32)] = &[
    ("jan", 0),
    ("feb", 1),
    ("mar", 2),
    ("apr", 3),
    ("may", 4),
    ("jun", 5),
    ("jul", 6),
    ("aug", 7),
    ("sep", 8),
    ("sept", 8),
    ("oct", 9),
    ("nov", 10),
    ("dec", 11),
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

fn month_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{1,2}$").expect("valid month code pattern"))
}

fn year_month_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{1,2}$").expect("valid year-month pattern"))
}

fn trailing_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s[0-9]{4}$").expect("valid trailing year pattern"))
}

/// Numeric month codes: 1..=12 is 1-based, otherwise 0..=11 is taken as an
/// already 0-based index. A literal 0 therefore means January.
fn month_from_number(n: f64) -> Option<u32> {
    if !n.is_finite() || n.fract() != 0.0 {
        return None;
    }
    if (1.0..=12.0).contains(&n) {
        Some(n as u32 - 1)
    } else if (0.0..=11.0).contains(&n) {
        Some(n as u32)
    } else {
        None
    }
}

/// Parse a free-text calendar date. Every accepted shape carries a year, so a
/// bare month name or number is never read as a date here.
pub fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    // Month-and-year only: "July 2023", "Jul 2023", "2023-07". The year must
    // have four digits; chrono alone would read "7-4" as year 7, April.
    if trailing_year_re().is_match(s) {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("1 {s}"), "%d %B %Y") {
            return Some(d);
        }
    }
    if year_month_re().is_match(s) {
        return NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok();
    }
    None
}

/// Resolve a cell to a 0-based month index (0 = January).
pub fn resolve_month(cell: &Cell) -> Option<u32> {
    let trimmed = match cell {
        Cell::Date(dt) => return Some(dt.month0()),
        Cell::Number(n) => return month_from_number(*n),
        Cell::Empty => return None,
        Cell::Text(s) => s.trim(),
    };
    if trimmed.is_empty() {
        return None;
    }

    if let Some(date) = parse_date_text(trimmed) {
        return Some(date.month0());
    }

    let text = trimmed.to_lowercase();

    let stripped: String = text.chars().filter(|c| *c != '.' && *c != ',').collect();
    if month_code_re().is_match(&stripped) {
        return stripped.parse::<f64>().ok().and_then(month_from_number);
    }

    if let Some(idx) = MONTH_NAMES.iter().position(|name| *name == stripped) {
        return Some(idx as u32);
    }
    MONTH_ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == stripped)
        .map(|(_, month)| *month)
}

/// Keep digits, decimal points, and a minus sign only when it leads.
fn amount_chars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_digit() || c == '.' {
            out.push(c);
        } else if c == '-' && out.is_empty() {
            out.push(c);
        }
    }
    out
}

/// Longest leading decimal number in `s`, e.g. "1.2.3" reads as 1.2.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let mut seen_dot = false;
    let mut seen_digit = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

/// Parse a cell as a finite amount. Currency symbols, thousands separators,
/// and whitespace are discarded.
pub fn parse_amount(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Number(n) => Some(*n),
        Cell::Empty | Cell::Date(_) => None,
        Cell::Text(s) => {
            let filtered = amount_chars(s.trim());
            match filtered.as_str() {
                "" | "-" | "." | "-." => None,
                digits => leading_number(digits),
            }
        }
    };
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(s: &str) -> Option<u32> {
        resolve_month(&Cell::text(s))
    }

    fn amount(s: &str) -> Option<f64> {
        parse_amount(&Cell::text(s))
    }

    #[test]
    fn test_resolve_month_names_and_abbreviations() {
        assert_eq!(month("January"), Some(0));
        assert_eq!(month("jan"), Some(0));
        assert_eq!(month("  DECEMBER "), Some(11));
        assert_eq!(month("Sept"), Some(8));
        assert_eq!(month("Sep."), Some(8));
        assert_eq!(month("may"), Some(4));
    }

    #[test]
    fn test_resolve_month_numeric_text() {
        assert_eq!(month("3"), Some(2));
        assert_eq!(month("12"), Some(11));
        assert_eq!(month("0"), Some(0));
        assert_eq!(month("13"), None);
        assert_eq!(month("3."), Some(2));
        assert_eq!(month("123"), None);
    }

    #[test]
    fn test_resolve_month_numeric_cells() {
        assert_eq!(resolve_month(&Cell::Number(1.0)), Some(0));
        assert_eq!(resolve_month(&Cell::Number(12.0)), Some(11));
        assert_eq!(resolve_month(&Cell::Number(0.0)), Some(0));
        assert_eq!(resolve_month(&Cell::Number(13.0)), None);
        assert_eq!(resolve_month(&Cell::Number(-1.0)), None);
        assert_eq!(resolve_month(&Cell::Number(2.5)), None);
        assert_eq!(resolve_month(&Cell::Number(f64::NAN)), None);
    }

    #[test]
    fn test_resolve_month_date_cell() {
        let dt = NaiveDate::from_ymd_opt(2023, 7, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(resolve_month(&Cell::Date(dt)), Some(6));
    }

    #[test]
    fn test_resolve_month_date_strings() {
        assert_eq!(month("2023-07-04"), Some(6));
        assert_eq!(month("2023/02/28"), Some(1));
        assert_eq!(month("07/04/2023"), Some(6));
        assert_eq!(month("04.07.2023"), Some(6));
        assert_eq!(month("July 4, 2023"), Some(6));
        assert_eq!(month("4 Jul 2023"), Some(6));
        assert_eq!(month("Mar 2024"), Some(2));
        assert_eq!(month("2024-11"), Some(10));
        assert_eq!(month("2023-07-04T10:30:00"), Some(6));
    }

    #[test]
    fn test_resolve_month_rejects_unknown() {
        assert_eq!(month("garbage"), None);
        assert_eq!(month("janu"), None);
        assert_eq!(month("7-4"), None);
        assert_eq!(month("11-5"), None);
        assert_eq!(month("2-3"), None);
        assert_eq!(month("0-12"), None);
        assert_eq!(month("jan 5"), None);
        assert_eq!(month(""), None);
        assert_eq!(month("   "), None);
        assert_eq!(resolve_month(&Cell::Empty), None);
    }

    #[test]
    fn test_parse_amount_text() {
        assert_eq!(amount("$1,234.50"), Some(1234.50));
        assert_eq!(amount("  42 "), Some(42.0));
        assert_eq!(amount("-$50.00"), Some(-50.0));
        assert_eq!(amount("€ 1 000"), Some(1000.0));
        assert_eq!(amount("1.2.3"), Some(1.2));
    }

    #[test]
    fn test_parse_amount_unresolved() {
        assert_eq!(amount("-"), None);
        assert_eq!(amount("."), None);
        assert_eq!(amount("-."), None);
        assert_eq!(amount("N/A"), None);
        assert_eq!(amount(""), None);
        assert_eq!(parse_amount(&Cell::Empty), None);
    }

    #[test]
    fn test_parse_amount_numeric_passthrough() {
        assert_eq!(parse_amount(&Cell::Number(7.5)), Some(7.5));
        assert_eq!(parse_amount(&Cell::Number(-3.0)), Some(-3.0));
        assert_eq!(parse_amount(&Cell::Number(f64::INFINITY)), None);
    }

    #[test]
    fn test_parse_date_text_requires_year() {
        assert!(parse_date_text("jan").is_none());
        assert!(parse_date_text("3").is_none());
        assert!(parse_date_text("7-4").is_none());
        assert!(parse_date_text("12-2024").is_none());
        assert_eq!(
            parse_date_text("2025-01-15"),
            NaiveDate::from_ymd_opt(2025, 1, 15)
        );
    }
}
