//! # Money Module
//!
//! Display-side money for Argentine pesos.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pricing / totals          f64, unrounded        22500.004999...        │
//! │        │                                                                │
//! │        ▼  Money::from_amount  (shortest decimal, half away from zero)   │
//! │  Money                     i64 cents             2250000                │
//! │        │                                                                │
//! │        ▼  Display                                                       │
//! │  "$ 22.500,00"             es-AR: '.' groups, ',' decimals              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Calculations stay in `f64` so that totals are computed from unrounded
//! line subtotals. `Money` only exists at the edge, when an amount is shown.
//!
//! Rounding works on the shortest decimal that reads back as the same
//! `f64` (`622.545`, not the binary `622.5449999...`), so a half cent the
//! operator can see always rounds up.
//!
//! ## Usage
//! ```rust
//! use glazier_core::money::{format_currency, Money};
//!
//! assert_eq!(format_currency(15000.5), "$\u{a0}15.000,50");
//! assert_eq!(Money::from_cents(99).to_string(), "$\u{a0}0,99");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Currency symbol for Argentine pesos.
pub const CURRENCY_SYMBOL: &str = "$";

/// Space between symbol and amount (no-break space).
const SYMBOL_SEPARATOR: char = '\u{a0}';

// =============================================================================
// Money Type
// =============================================================================

/// An amount of pesos in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds an amount to whole cents, half away from zero, on its
    /// shortest decimal form.
    ///
    /// Returns `None` for `NaN`, infinities and amounts beyond the `i64`
    /// cent range.
    ///
    /// ## Example
    /// ```rust
    /// use glazier_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(1.005).map(|m| m.cents()), Some(101));
    /// assert_eq!(Money::from_amount(-0.125).map(|m| m.cents()), Some(-13));
    /// assert_eq!(Money::from_amount(f64::NAN), None);
    /// ```
    pub fn from_amount(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        // `Display` for f64 never uses exponents and prints the shortest
        // round-trip digits.
        let decimal = Decimal::from_str(&amount.to_string()).ok()?;

        decimal
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()
            .map(Money)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Centavos part, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// es-AR currency display: `$ 1.234,56` with a no-break space.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let pesos = self.0.unsigned_abs() / 100;

        write!(
            f,
            "{}{}{}{},{:02}",
            sign,
            CURRENCY_SYMBOL,
            SYMBOL_SEPARATOR,
            group_thousands(&pesos.to_string()),
            self.cents_part()
        )
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats an amount as es-AR pesos with exactly two decimals.
///
/// Non-finite amounts render as `$ NaN` or `$ ∞`; they show up when a
/// catalog price failed to parse.
///
/// ## Example
/// ```rust
/// use glazier_core::money::format_currency;
///
/// assert_eq!(format_currency(0.0), "$\u{a0}0,00");
/// assert_eq!(format_currency(1234567.891), "$\u{a0}1.234.567,89");
/// assert_eq!(format_currency(-1500.0), "-$\u{a0}1.500,00");
/// assert_eq!(format_currency(f64::NAN), "$\u{a0}NaN");
/// ```
pub fn format_currency(amount: f64) -> String {
    if let Some(money) = Money::from_amount(amount) {
        return money.to_string();
    }

    let sign = if amount.is_sign_negative() && !amount.is_nan() {
        "-"
    } else {
        ""
    };

    let body = if amount.is_nan() {
        "NaN".to_string()
    } else if amount.is_infinite() {
        "∞".to_string()
    } else {
        // Beyond the cent range there is no fractional part left to show.
        format!("{},00", group_thousands(&format!("{:.0}", amount.abs())))
    };

    format!("{sign}{CURRENCY_SYMBOL}{SYMBOL_SEPARATOR}{body}")
}

/// Inserts `.` every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================
