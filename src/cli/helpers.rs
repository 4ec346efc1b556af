//! Shared helper functions for CLI commands
//!
//! Number formatting used across the command tables, plus the warning
//! printer used when input data is outside its documented range.

use console::style;

use crate::core::validate::ValidationError;

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Insert thousands separators into the integer part of a formatted number
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Format a currency amount, e.g. `3.89 EUR`
pub fn format_money(value: f64, decimals: usize, currency: &str) -> String {
    format!("{} {}", format_thousands(value, decimals), currency)
}

/// Format a fraction as a percentage with one decimal, e.g. `95.0%`
pub fn format_pct(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Format a signed difference, e.g. `+0.1200`
pub fn format_signed(value: f64, decimals: usize) -> String {
    let sign = if value >= 0.0 { "+" } else { "-" };
    format!("{}{}", sign, format_thousands(value.abs(), decimals))
}

/// Print validation issues to stderr as warnings
pub fn print_validation_warnings(issues: &[ValidationError], quiet: bool) {
    if quiet {
        return;
    }
    for issue in issues {
        eprintln!("{} {}", style("⚠").yellow(), issue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("Étape numéro un", 8), "Étape...");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_thousands(999.0, 0), "999");
        assert_eq!(format_thousands(1000.0, 0), "1,000");
        assert_eq!(format_thousands(-4321.5, 1), "-4,321.5");
        assert_eq!(format_thousands(-0.0001, 2), "0.00");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(3.8931, 2, "EUR"), "3.89 EUR");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(0.95), "95.0%");
        assert_eq!(format_pct(0.857375), "85.7%");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(0.12, 4), "+0.1200");
        assert_eq!(format_signed(-1500.0, 2), "-1,500.00");
        assert_eq!(format_signed(0.0, 2), "+0.00");
    }
}
