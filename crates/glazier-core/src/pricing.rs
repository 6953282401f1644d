//! # Item Pricing
//!
//! Turns a catalog cost price into the sell price of one line item.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "$ 15.000,50" ──parse──► cost per m²                                   │
//! │                               │                                         │
//! │                               ▼  × (1 + margin/100)                     │
//! │                         sell price per m²                               │
//! │                               │                                         │
//! │                               ▼  × (1 + installation/100)  [optional]   │
//! │                         final price per m²                              │
//! │                               │                                         │
//! │                               ▼  × width × height × quantity            │
//! │                         line subtotal (unrounded)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rounding happens only when an amount is formatted for display.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::numeric::{cost_price_or_nan, parse_cost_price};
use crate::types::{CatalogEntry, Dimensions, LineItem, Percent};

/// Label appended to descriptions of items that include installation.
pub const INSTALLATION_LABEL: &str = " [Con Colocación]";

// =============================================================================
// Item Pricer
// =============================================================================

/// Prices line items with a fixed margin and installation surcharge.
///
/// ## Example
/// ```rust
/// use glazier_core::pricing::ItemPricer;
/// use glazier_core::types::{Dimensions, Percent};
///
/// let pricer = ItemPricer::new(Percent::from(50.0), Percent::from(30.0));
/// let dims = Dimensions::new(1.0, 1.0, 1);
///
/// assert_eq!(pricer.price("15000", &dims, false), 22500.0);
/// assert_eq!(pricer.price("15000", &dims, true), 29250.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPricer {
    margin: Percent,
    installation: Percent,
}

impl ItemPricer {
    /// Creates a pricer.
    pub fn new(margin: Percent, installation: Percent) -> Self {
        ItemPricer {
            margin,
            installation,
        }
    }

    /// Markup over cost.
    pub fn margin(&self) -> Percent {
        self.margin
    }

    /// Installation surcharge.
    pub fn installation(&self) -> Percent {
        self.installation
    }

    /// Final price per square meter for a numeric cost.
    pub fn price_per_area(&self, cost: f64, include_installation: bool) -> f64 {
        let sell_price = cost * self.margin.factor();

        if include_installation {
            sell_price * self.installation.factor()
        } else {
            sell_price
        }
    }

    /// Prices a line from a numeric cost per square meter.
    pub fn price_cost(&self, cost: f64, dimensions: &Dimensions, include_installation: bool) -> f64 {
        dimensions.total_area() * self.price_per_area(cost, include_installation)
    }

    /// Prices a line from a price-list cost string.
    ///
    /// An unparseable cost yields `NaN`, which propagates into every amount
    /// computed from it. Use [`ItemPricer::try_price`] to get an error instead.
    pub fn price(&self, cost_price: &str, dimensions: &Dimensions, include_installation: bool) -> f64 {
        self.price_cost(cost_price_or_nan(cost_price), dimensions, include_installation)
    }

    /// Prices a line, failing with [`crate::CoreError::InvalidCostPrice`]
    /// when the cost string does not parse.
    pub fn try_price(
        &self,
        cost_price: &str,
        dimensions: &Dimensions,
        include_installation: bool,
    ) -> CoreResult<f64> {
        let cost = parse_cost_price(cost_price)?;
        Ok(self.price_cost(cost, dimensions, include_installation))
    }
}

/// Prices one line item in a single call.
///
/// Rates accept numbers or strings; strings that do not parse count as zero.
/// An unparseable `cost_price` makes the result `NaN`.
///
/// ## Example
/// ```rust
/// use glazier_core::pricing::price_item;
///
/// let subtotal = price_item("$ 15.000", 50.0, "30", 2.0, 1.0, 3, true);
/// assert_eq!(subtotal, 175500.0);
///
/// // Bad margin counts as zero
/// assert_eq!(price_item("15000", "n/a", 30.0, 1.0, 1.0, 1, false), 15000.0);
/// ```
pub fn price_item(
    cost_price: &str,
    margin: impl Into<Percent>,
    installation: impl Into<Percent>,
    width_m: f64,
    height_m: f64,
    quantity: i64,
    include_installation: bool,
) -> f64 {
    ItemPricer::new(margin.into(), installation.into()).price(
        cost_price,
        &Dimensions::new(width_m, height_m, quantity),
        include_installation,
    )
}

// =============================================================================
// Quote Request
// =============================================================================

/// Everything needed to quote one cut: the catalog row, the piece size,
/// whether installation is included and the rates in force. Built per
/// calculation, not retained.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub entry: CatalogEntry,
    pub dimensions: Dimensions,
    pub include_installation: bool,
    pub margin: Percent,
    pub installation: Percent,
    /// Width and height as typed, shown in the description instead of the
    /// parsed numbers (`1.20m` stays `1.20m`).
    pub typed_size: Option<(String, String)>,
}

impl QuoteRequest {
    /// Creates a quote request using the rates of `pricer`.
    pub fn new(
        entry: CatalogEntry,
        dimensions: Dimensions,
        include_installation: bool,
        pricer: &ItemPricer,
    ) -> Self {
        QuoteRequest {
            entry,
            dimensions,
            include_installation,
            margin: pricer.margin(),
            installation: pricer.installation(),
            typed_size: None,
        }
    }

    /// Keeps the width and height text the operator entered.
    pub fn with_typed_size(mut self, width: &str, height: &str) -> Self {
        self.typed_size = Some((width.trim().to_string(), height.trim().to_string()));
        self
    }

    /// Pricer carrying this request's rates.
    pub fn pricer(&self) -> ItemPricer {
        ItemPricer::new(self.margin, self.installation)
    }

    /// Prices the request, rejecting an unparseable cost price.
    pub fn price(&self) -> CoreResult<f64> {
        self.pricer().try_price(
            &self.entry.unit_cost_price,
            &self.dimensions,
            self.include_installation,
        )
    }

    /// Line description embedding size, count, glass and installation flag.
    ///
    /// The size is the typed text when there is one, otherwise the parsed
    /// meters.
    ///
    /// ## Example
    /// ```rust
    /// use glazier_core::pricing::{ItemPricer, QuoteRequest};
    /// use glazier_core::types::{CatalogEntry, Dimensions};
    ///
    /// let request = QuoteRequest::new(
    ///     CatalogEntry::new("Float Incoloro", "4mm", "15000"),
    ///     Dimensions::new(1.2, 0.8, 2),
    ///     true,
    ///     &ItemPricer::default(),
    /// );
    /// assert_eq!(
    ///     request.describe(),
    ///     "2 un. de 1.2m x 0.8m - Float Incoloro (4mm) [Con Colocación]"
    /// );
    ///
    /// let typed = request.with_typed_size("1.20", "0.80");
    /// assert!(typed.describe().starts_with("2 un. de 1.20m x 0.80m"));
    /// ```
    pub fn describe(&self) -> String {
        let installation = if self.include_installation {
            INSTALLATION_LABEL
        } else {
            ""
        };

        let (width, height) = match &self.typed_size {
            Some((width, height)) => (width.clone(), height.clone()),
            None => (
                self.dimensions.width_m.to_string(),
                self.dimensions.height_m.to_string(),
            ),
        };

        format!(
            "{} un. de {}m x {}m - {} ({}){}",
            self.dimensions.quantity,
            width,
            height,
            self.entry.kind,
            self.entry.thickness,
            installation
        )
    }

    /// Prices the request and wraps the result as a line item.
    pub fn into_line_item(self, id: i64) -> CoreResult<LineItem> {
        let subtotal = self.price()?;
        Ok(LineItem::new(id, self.describe(), subtotal))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn pricer() -> ItemPricer {
        ItemPricer::new(Percent::from(50.0), Percent::from(30.0))
    }

    #[test]
    fn test_sell_price_without_installation() {
        let dims = Dimensions::new(1.0, 1.0, 1);
        assert!(close(pricer().price("15000", &dims, false), 22500.0));
    }

    #[test]
    fn test_sell_price_with_installation() {
        let dims = Dimensions::new(1.0, 1.0, 1);
        assert!(close(pricer().price("15000", &dims, true), 29250.0));
    }

    #[test]
    fn test_price_scales_with_quantity() {
        let one = pricer().price("$ 9.870,25", &Dimensions::new(1.3, 0.7, 1), true);
        let four = pricer().price("$ 9.870,25", &Dimensions::new(1.3, 0.7, 4), true);
        assert!(close(four, one * 4.0));
    }

    #[test]
    fn test_zero_rates_make_installation_irrelevant() {
        let flat = ItemPricer::new(Percent::zero(), Percent::zero());
        let dims = Dimensions::new(2.5, 1.1, 3);
        assert_eq!(
            flat.price("12.345,60", &dims, true),
            flat.price("12.345,60", &dims, false)
        );
    }

    #[test]
    fn test_zero_and_negative_dimensions_propagate() {
        assert_eq!(pricer().price("15000", &Dimensions::new(0.0, 1.0, 1), false), 0.0);
        assert!(close(
            pricer().price("15000", &Dimensions::new(-1.0, 1.0, 1), false),
            -22500.0
        ));
    }

    #[test]
    fn test_invalid_cost_price_is_nan_or_error() {
        let dims = Dimensions::new(1.0, 1.0, 1);
        assert!(pricer().price("consultar", &dims, false).is_nan());

        let err = pricer().try_price("consultar", &dims, false).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCostPrice { .. }));
    }

    #[test]
    fn test_describe_keeps_typed_size() {
        let request = QuoteRequest::new(
            CatalogEntry::new("Espejo", "4mm", "19000"),
            Dimensions::parse("1.20", "0.50", "1").unwrap(),
            false,
            &pricer(),
        );
        assert_eq!(request.describe(), "1 un. de 1.2m x 0.5m - Espejo (4mm)");

        let typed = request.with_typed_size(" 1.20", "0.50 ");
        assert_eq!(typed.describe(), "1 un. de 1.20m x 0.50m - Espejo (4mm)");
        assert!(close(typed.price().unwrap(), 1.2 * 0.5 * 19000.0 * 1.5));
    }

    #[test]
    fn test_price_item_coerces_rates() {
        assert!(close(price_item("15000", "50", "30", 1.0, 1.0, 1, true), 29250.0));
        assert!(close(price_item("15000", "", "", 1.0, 1.0, 1, true), 15000.0));
        assert!(close(price_item("15000", 50.0, "abc", 1.0, 1.0, 1, true), 22500.0));
    }

    #[test]
    fn test_quote_request_into_line_item() {
        let request = QuoteRequest::new(
            CatalogEntry::new("Laminado 3+3", "6mm", "$ 40.000"),
            Dimensions::new(0.5, 2.0, 1),
            false,
            &pricer(),
        );
        assert_eq!(request.margin, Percent::from(50.0));

        let item = request.into_line_item(1_700_000_000_000).unwrap();

        assert_eq!(item.id, 1_700_000_000_000);
        assert_eq!(item.description, "1 un. de 0.5m x 2m - Laminado 3+3 (6mm)");
        assert!(close(item.subtotal, 60000.0));
    }
}
