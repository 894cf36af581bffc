const MONTH_LABELS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Calendar name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_LABELS[month as usize - 1],
        _ => "?",
    }
}

/// Two decimals with thousands separators: 1234.5 -> "1,234.50"
pub fn amount(val: f64) -> String {
    let fixed = format!("{:.2}", val.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let digits: Vec<char> = int_part.chars().collect();
    let grouped: Vec<String> = digits
        .rchunks(3)
        .rev()
        .map(|chunk| chunk.iter().collect())
        .collect();
    let sign = if val < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{}.{dec_part}", grouped.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_formatting() {
        assert_eq!(amount(1234.5), "1,234.50");
        assert_eq!(amount(-500.0), "-500.00");
        assert_eq!(amount(0.0), "0.00");
        assert_eq!(amount(1000000.99), "1,000,000.99");
        assert_eq!(amount(42.1), "42.10");
        assert_eq!(amount(-0.001), "0.00");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "?");
    }
}
