//! # Numeric Parsing
//!
//! Turns operator-typed and price-list strings into numbers.
//!
//! ## Two Policies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rate parameters (margin, installation, IVA, IIBB)                      │
//! │    "50"  → 50.0        ""  → 0.0        "abc" → 0.0   (never an error)  │
//! │                                                                         │
//! │  Catalog cost prices (es-AR formatted)                                  │
//! │    "$ 15.000,50" → 15000.50                                             │
//! │    "consultar"   → CoreError::InvalidCostPrice  (or NaN, lossy path)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dimensions use the leading-number rules ([`parse_float_prefix`],
//! [`parse_int_prefix`]): `"1.20m"` reads as `1.2`, `"2.7"` as quantity `2`.

use crate::error::{CoreError, CoreResult};

/// Parses a whole string as a number, for rate parameters.
///
/// Blank input counts as zero. Returns `None` for anything that is not a
/// finite decimal number.
///
/// ## Example
/// ```rust
/// use glazier_core::numeric::coerce_number;
///
/// assert_eq!(coerce_number(" 21 "), Some(21.0));
/// assert_eq!(coerce_number(""), Some(0.0));
/// assert_eq!(coerce_number("21%"), None);
/// ```
pub fn coerce_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses the longest leading decimal number in `input`.
///
/// Leading whitespace is skipped and trailing garbage is ignored. Returns
/// `None` when no digit is found before the garbage starts.
///
/// ## Example
/// ```rust
/// use glazier_core::numeric::parse_float_prefix;
///
/// assert_eq!(parse_float_prefix("1.20m"), Some(1.2));
/// assert_eq!(parse_float_prefix("  .5"), Some(0.5));
/// assert_eq!(parse_float_prefix("m1"), None);
/// ```
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    end = skip_digits(bytes, end);
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let frac_end = skip_digits(bytes, frac_start);
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when it carries digits: "2e" reads as 2.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_end = skip_digits(bytes, exp_end);
        if exp_digits_end > exp_end {
            end = exp_digits_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Parses the longest leading integer in `input`.
///
/// ## Example
/// ```rust
/// use glazier_core::numeric::parse_int_prefix;
///
/// assert_eq!(parse_int_prefix("3"), Some(3));
/// assert_eq!(parse_int_prefix("2.7"), Some(2));
/// assert_eq!(parse_int_prefix("x2"), None);
/// ```
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let end = skip_digits(bytes, sign_len);

    if end == sign_len {
        return None;
    }

    s[..end].parse::<i64>().ok()
}

/// Parses a price-list cost into a number.
///
/// ## Cleaning Steps
/// 1. Drop `$`, `.` (thousands separator) and whitespace
/// 2. Replace the first `,` (decimal separator) with `.`
/// 3. Read the leading decimal number
///
/// ## Example
/// ```rust
/// use glazier_core::numeric::parse_cost_price;
///
/// assert_eq!(parse_cost_price("$ 15.000,50").unwrap(), 15000.5);
/// assert_eq!(parse_cost_price("15000").unwrap(), 15000.0);
/// assert!(parse_cost_price("consultar").is_err());
/// ```
pub fn parse_cost_price(raw: &str) -> CoreResult<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | '.') && !c.is_whitespace())
        .collect();
    let normalized = cleaned.replacen(',', ".", 1);

    parse_float_prefix(&normalized).ok_or_else(|| CoreError::InvalidCostPrice {
        raw: raw.to_string(),
    })
}

/// Lossy variant of [`parse_cost_price`]: an unparseable price becomes `NaN`.
pub fn cost_price_or_nan(raw: &str) -> f64 {
    parse_cost_price(raw).unwrap_or(f64::NAN)
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    pos
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("50"), Some(50.0));
        assert_eq!(coerce_number("10.5"), Some(10.5));
        assert_eq!(coerce_number("-3"), Some(-3.0));
        assert_eq!(coerce_number("   "), Some(0.0));
        assert_eq!(coerce_number("1e2"), Some(100.0));

        assert_eq!(coerce_number("abc"), None);
        assert_eq!(coerce_number("12abc"), None);
        assert_eq!(coerce_number("NaN"), None);
        assert_eq!(coerce_number("inf"), None);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("1.5"), Some(1.5));
        assert_eq!(parse_float_prefix("-0.25"), Some(-0.25));
        assert_eq!(parse_float_prefix("3."), Some(3.0));
        assert_eq!(parse_float_prefix("2e3x"), Some(2000.0));
        assert_eq!(parse_float_prefix("2e"), Some(2.0));
        assert_eq!(parse_float_prefix("1.2.3"), Some(1.2));

        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("-"), None);
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix(" 12 "), Some(12));
        assert_eq!(parse_int_prefix("-4"), Some(-4));
        assert_eq!(parse_int_prefix("+"), None);
        assert_eq!(parse_int_prefix(""), None);
    }

    #[test]
    fn test_parse_cost_price_locale_formats() {
        assert_eq!(parse_cost_price("$ 15.000,50").unwrap(), 15000.5);
        assert_eq!(parse_cost_price("$15.000").unwrap(), 15000.0);
        assert_eq!(parse_cost_price("1.234.567,89").unwrap(), 1234567.89);
        assert_eq!(parse_cost_price("  9800 ").unwrap(), 9800.0);
        // Output of the currency formatter reads back in.
        assert_eq!(parse_cost_price("$\u{a0}22.500,00").unwrap(), 22500.0);
    }

    #[test]
    fn test_parse_cost_price_failures() {
        for raw in ["", "$", "consultar", ",", "$ ."] {
            let err = parse_cost_price(raw).unwrap_err();
            assert!(matches!(err, CoreError::InvalidCostPrice { .. }), "{raw}");
        }
        assert!(cost_price_or_nan("consultar").is_nan());
    }
}
