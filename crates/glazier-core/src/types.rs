//! # Domain Types
//!
//! Core domain types used throughout Glazier.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogEntry   │   │   Dimensions    │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  kind           │   │  width_m        │   │  id (ms stamp)  │       │
//! │  │  thickness      │   │  height_m       │   │  description    │       │
//! │  │  unit_cost_price│   │  quantity       │   │  subtotal       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Percent      │   │  OrderTotals    │   │  ShopSettings   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  50.0 = 50%     │   │  net, IVA, IIBB │   │  name, logo     │       │
//! │  │  bad input → 0  │   │  total          │   │  4 rate strings │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::numeric::{coerce_number, parse_float_prefix, parse_int_prefix};
use crate::pricing::ItemPricer;
use crate::totals::OrderAggregator;

// =============================================================================
// Percent
// =============================================================================

/// A rate parameter expressed in percent (`21.0` = 21%).
///
/// ## Parse-or-Default
/// Rates come from settings stored as strings. Anything that does not parse
/// as a finite number becomes `0%`, so a misconfigured rate degrades to "no
/// effect" instead of blocking a quote.
///
/// ## Example
/// ```rust
/// use glazier_core::types::Percent;
///
/// assert_eq!(Percent::parse("21").value(), 21.0);
/// assert_eq!(Percent::parse("").value(), 0.0);
/// assert_eq!(Percent::parse("veintiuno").value(), 0.0);
/// assert_eq!(Percent::from(50.0).factor(), 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percent(f64);

impl Percent {
    /// Creates a rate from a percentage. Non-finite values become zero.
    pub fn new(percent: f64) -> Self {
        if percent.is_finite() {
            Percent(percent)
        } else {
            Percent(0.0)
        }
    }

    /// Parses a stored rate string, defaulting to zero.
    pub fn parse(input: &str) -> Self {
        Percent(coerce_number(input).unwrap_or(0.0))
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0.0)
    }

    /// Returns the rate in percent.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Multiplier that applies this rate on top of an amount: `1 + p/100`.
    #[inline]
    pub fn factor(&self) -> f64 {
        1.0 + self.0 / 100.0
    }

    /// The portion of `amount` this rate represents: `amount * p/100`.
    #[inline]
    pub fn of(&self, amount: f64) -> f64 {
        amount * (self.0 / 100.0)
    }
}

impl From<f64> for Percent {
    fn from(percent: f64) -> Self {
        Percent::new(percent)
    }
}

impl From<&str> for Percent {
    fn from(input: &str) -> Self {
        Percent::parse(input)
    }
}

impl From<&String> for Percent {
    fn from(input: &String) -> Self {
        Percent::parse(input)
    }
}

impl From<String> for Percent {
    fn from(input: String) -> Self {
        Percent::parse(&input)
    }
}

// =============================================================================
// Catalog Entry
// =============================================================================

/// One row of the shop's price list.
///
/// ## Wire Names
/// Serialized with the price list column names (`tipo`, `espesor`,
/// `precio_m2`) so imported rows deserialize straight into this type.
///
/// `unit_cost_price` stays a string: it is locale-formatted
/// (`"$ 15.000,50"`) and only parsed when a quote is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogEntry {
    /// Glass kind, e.g. "Float Incoloro".
    #[serde(rename = "tipo")]
    pub kind: String,

    /// Thickness label, e.g. "4mm".
    #[serde(rename = "espesor")]
    pub thickness: String,

    /// Cost per square meter, as written in the price list.
    #[serde(rename = "precio_m2")]
    pub unit_cost_price: String,
}

impl CatalogEntry {
    /// Creates a catalog entry.
    pub fn new(
        kind: impl Into<String>,
        thickness: impl Into<String>,
        unit_cost_price: impl Into<String>,
    ) -> Self {
        CatalogEntry {
            kind: kind.into(),
            thickness: thickness.into(),
            unit_cost_price: unit_cost_price.into(),
        }
    }
}

// =============================================================================
// Dimensions
// =============================================================================

/// Size and count of one cut-to-size piece.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Dimensions {
    /// Width in meters.
    pub width_m: f64,
    /// Height in meters.
    pub height_m: f64,
    /// Number of identical pieces.
    pub quantity: i64,
}

impl Dimensions {
    /// Creates dimensions. No bounds checks: zero or negative values flow
    /// through the arithmetic unchanged.
    pub const fn new(width_m: f64, height_m: f64, quantity: i64) -> Self {
        Dimensions {
            width_m,
            height_m,
            quantity,
        }
    }

    /// Parses form input: decimals for width and height, an integer for
    /// quantity, each read from the leading number of its field.
    ///
    /// ## Example
    /// ```rust
    /// use glazier_core::types::Dimensions;
    ///
    /// let dims = Dimensions::parse("1.20", "0.8m", "2").unwrap();
    /// assert_eq!(dims, Dimensions::new(1.2, 0.8, 2));
    /// assert!(Dimensions::parse("", "1", "1").is_err());
    /// ```
    pub fn parse(width: &str, height: &str, quantity: &str) -> CoreResult<Self> {
        let invalid = |field: &str, raw: &str| CoreError::InvalidDimension {
            field: field.to_string(),
            raw: raw.to_string(),
        };

        let width_m = parse_float_prefix(width).ok_or_else(|| invalid("width", width))?;
        let height_m = parse_float_prefix(height).ok_or_else(|| invalid("height", height))?;
        let quantity = parse_int_prefix(quantity).ok_or_else(|| invalid("quantity", quantity))?;

        Ok(Dimensions::new(width_m, height_m, quantity))
    }

    /// Total glass area in square meters: `width × height × quantity`.
    #[inline]
    pub fn total_area(&self) -> f64 {
        self.width_m * self.height_m * self.quantity as f64
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One priced entry of an order.
///
/// Immutable once created. The `id` is the creation timestamp in
/// milliseconds and doubles as the removal key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub id: i64,
    /// Human-readable summary, e.g.
    /// `"2 un. de 1.2m x 0.8m - Float Incoloro (4mm) [Con Colocación]"`.
    pub description: String,
    /// Sell price of the whole line, unrounded.
    pub subtotal: f64,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(id: i64, description: impl Into<String>, subtotal: f64) -> Self {
        LineItem {
            id,
            description: description.into(),
            subtotal,
        }
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Derived totals of an order. Never stored; recomputed on every render.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderTotals {
    /// Sum of line subtotals.
    pub net_subtotal: f64,
    /// IVA on the net subtotal.
    pub tax_amount: f64,
    /// IIBB on the IVA-inclusive amount.
    pub gross_receipts_amount: f64,
    /// Grand total.
    pub total: f64,
}

impl OrderTotals {
    /// Net subtotal plus IVA: the base IIBB is levied on.
    #[inline]
    pub fn net_plus_tax(&self) -> f64 {
        self.net_subtotal + self.tax_amount
    }

    /// `false` when an invalid price leaked `NaN` or infinity into the totals.
    pub fn is_finite(&self) -> bool {
        [
            self.net_subtotal,
            self.tax_amount,
            self.gross_receipts_amount,
            self.total,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

// =============================================================================
// Shop Settings
// =============================================================================

/// Default shop name shown until the operator sets one.
pub const DEFAULT_SHOP_NAME: &str = "Vidriería Misiones";

/// Operator-configurable shop parameters.
///
/// ## Why Strings?
/// The four rates are stored exactly as typed and re-parsed on every
/// calculation with [`Percent::parse`]. An operator who types "21,5" gets a
/// zero rate rather than a rejected setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShopSettings {
    /// Shop name printed on quotations.
    pub shop_name: String,
    /// Logo as a `data:image/...;base64,` URI.
    pub logo: Option<String>,
    /// Background color for front ends (`#rrggbb`).
    pub background_color: String,
    /// Markup over cost, percent.
    pub margin: String,
    /// Installation surcharge, percent.
    pub installation: String,
    /// IVA rate, percent.
    pub vat: String,
    /// IIBB rate, percent.
    pub gross_receipts: String,
}

impl Default for ShopSettings {
    fn default() -> Self {
        ShopSettings {
            shop_name: DEFAULT_SHOP_NAME.to_string(),
            logo: None,
            background_color: "#f1f5f9".to_string(),
            margin: "50".to_string(),
            installation: "30".to_string(),
            vat: "21".to_string(),
            gross_receipts: "5".to_string(),
        }
    }
}

impl ShopSettings {
    /// Pricer configured with this shop's margin and installation rates.
    pub fn pricer(&self) -> ItemPricer {
        ItemPricer::new(Percent::parse(&self.margin), Percent::parse(&self.installation))
    }

    /// Aggregator configured with this shop's IVA and IIBB rates.
    pub fn aggregator(&self) -> OrderAggregator {
        OrderAggregator::new(Percent::parse(&self.vat), Percent::parse(&self.gross_receipts))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_parse_or_default() {
        assert_eq!(Percent::parse("30").value(), 30.0);
        assert_eq!(Percent::parse(" 10.5 ").value(), 10.5);
        assert_eq!(Percent::parse("").value(), 0.0);
        assert_eq!(Percent::parse("21,5").value(), 0.0);
        assert_eq!(Percent::from(f64::NAN), Percent::zero());
        assert_eq!(Percent::from(f64::INFINITY), Percent::zero());
    }

    #[test]
    fn test_percent_arithmetic() {
        let rate = Percent::from(21.0);
        assert!((rate.factor() - 1.21).abs() < 1e-12);
        assert!((rate.of(1000.0) - 210.0).abs() < 1e-9);
        assert_eq!(Percent::zero().factor(), 1.0);
    }

    #[test]
    fn test_catalog_entry_wire_names() {
        let entry = CatalogEntry::new("Float Incoloro", "4mm", "$ 15.000");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["tipo"], "Float Incoloro");
        assert_eq!(json["espesor"], "4mm");
        assert_eq!(json["precio_m2"], "$ 15.000");
    }

    #[test]
    fn test_dimensions_parse() {
        let dims = Dimensions::parse("1.5", "2", "3.9").unwrap();
        assert_eq!(dims, Dimensions::new(1.5, 2.0, 3));
        assert!((dims.total_area() - 9.0).abs() < 1e-12);

        let err = Dimensions::parse("1", "alto", "1").unwrap_err();
        assert!(matches!(err, CoreError::InvalidDimension { ref field, .. } if field == "height"));
    }

    #[test]
    fn test_order_totals_finiteness() {
        assert!(OrderTotals::default().is_finite());
        let broken = OrderTotals {
            net_subtotal: f64::NAN,
            ..OrderTotals::default()
        };
        assert!(!broken.is_finite());
    }

    #[test]
    fn test_shop_settings_defaults() {
        let settings = ShopSettings::default();
        assert_eq!(settings.shop_name, DEFAULT_SHOP_NAME);
        assert_eq!(settings.aggregator(), OrderAggregator::default());
        assert_eq!(
            settings.pricer(),
            ItemPricer::new(Percent::from(50.0), Percent::from(30.0))
        );
    }
}
