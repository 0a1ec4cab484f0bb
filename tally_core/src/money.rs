//! # Currency Formatting
//!
//! Display formatting for monetary amounts. Rounding goes through
//! `rust_decimal` so that values like `19.995` land on `"$20.00"` instead of
//! the `"$19.99"` a naive float round would produce. Parsing is deliberately
//! forgiving: anything that is not a finite number is treated as zero, so a
//! bad value degrades the display instead of aborting a render.

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;

/// Default currency symbol when the context does not provide one
pub const DEFAULT_SYMBOL: &str = "$";

/// Default number of decimal places for currency display
pub const DEFAULT_DECIMALS: u32 = 2;

/// Format an amount as `symbol` followed by the value fixed to `decimals`
/// places, rounding midpoints away from zero.
///
/// Non-finite input (NaN, infinities) formats as zero. The symbol precedes the
/// sign, so `-5.0` formats as `"$-5.00"`. Finite amounts too large for
/// `Decimal` keep their magnitude but round with plain float formatting.
pub fn format_currency(amount: f64, symbol: &str, decimals: u32) -> String {
    let sanitized = if amount.is_finite() { amount } else { 0.0 };
    // from_f64 produces the shortest decimal representation, so 19.995 is the
    // decimal 19.995 rather than its slightly-under binary expansion
    let Some(value) = Decimal::from_f64(sanitized) else {
        // Decimal caps out near 7.9e28
        return format!("{}{:.prec$}", symbol, sanitized, prec = decimals as usize);
    };
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{:.prec$}", symbol, rounded, prec = decimals as usize)
}

/// Parse free-form text as an amount, coercing anything unparseable (or
/// non-finite) to `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Abbreviate a value for axis labels: `1.2k`, `3.4M`, `5.6B`.
///
/// Values under a thousand render with no decimals. A trailing `.0` is
/// dropped so round thousands read as `2k`, not `2.0k`.
pub fn compact(value: f64) -> String {
    let sanitized = if value.is_finite() { value } else { 0.0 };
    let magnitude = sanitized.abs();
    let (scaled, suffix) = if magnitude >= 1_000_000_000.0 {
        (sanitized / 1_000_000_000.0, "B")
    } else if magnitude >= 1_000_000.0 {
        (sanitized / 1_000_000.0, "M")
    } else if magnitude >= 1_000.0 {
        (sanitized / 1_000.0, "k")
    } else {
        return format!("{:.0}", sanitized);
    };
    let text = format!("{:.1}", scaled);
    let trimmed = text.strip_suffix(".0").unwrap_or(&text);
    format!("{}{}", trimmed, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_basic() {
        assert_eq!(format_currency(5.0, "$", 2), "$5.00");
        assert_eq!(format_currency(1234.5, "$", 2), "$1234.50");
        assert_eq!(format_currency(0.0, "€", 2), "€0.00");
    }

    #[test]
    fn test_format_rounds_midpoint_away_from_zero() {
        assert_eq!(format_currency(19.995, "$", 2), "$20.00");
        assert_eq!(format_currency(2.675, "$", 2), "$2.68");
        assert_eq!(format_currency(-19.995, "$", 2), "$-20.00");
    }

    #[test]
    fn test_format_decimals_parameter() {
        assert_eq!(format_currency(3.14159, "$", 0), "$3");
        assert_eq!(format_currency(3.14159, "$", 4), "$3.1416");
    }

    #[test]
    fn test_format_non_finite_is_zero() {
        assert_eq!(format_currency(f64::NAN, "$", 2), "$0.00");
        assert_eq!(format_currency(f64::INFINITY, "$", 2), "$0.00");
    }

    #[test]
    fn test_format_beyond_decimal_range_keeps_magnitude() {
        let text = format_currency(1e30, "$", 2);
        assert!(text.starts_with("$1"), "got {text}");
        assert!(text.ends_with(".00"), "got {text}");
        assert!(format_currency(-1e30, "$", 2).starts_with("$-1"));
    }

    #[test]
    fn test_parse_amount_coercion() {
        assert!((parse_amount("12.5") - 12.5).abs() < 1e-9);
        assert!((parse_amount("  42 ") - 42.0).abs() < 1e-9);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(format_currency(parse_amount("abc"), "$", 2), "$0.00");
    }

    #[test]
    fn test_compact_labels() {
        assert_eq!(compact(950.0), "950");
        assert_eq!(compact(1234.0), "1.2k");
        assert_eq!(compact(2000.0), "2k");
        assert_eq!(compact(3_400_000.0), "3.4M");
        assert_eq!(compact(5_600_000_000.0), "5.6B");
        assert_eq!(compact(-1500.0), "-1.5k");
    }
}
