//! # Order Totals
//!
//! Aggregates line subtotals into cascading tax totals.
//!
//! ## Cascade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  net subtotal  = Σ line.subtotal                                        │
//! │  IVA           = net × vat/100                                          │
//! │  IIBB          = (net + IVA) × gross_receipts/100   ◄── levied on IVA   │
//! │  total         = net + IVA + IIBB                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are derived, never stored: callers recompute them whenever the
//! order or a rate changes.

use serde::{Deserialize, Serialize};

use crate::types::{LineItem, OrderTotals, Percent};

/// Default IVA rate, percent.
pub const DEFAULT_VAT: f64 = 21.0;

/// Default IIBB rate, percent.
pub const DEFAULT_GROSS_RECEIPTS: f64 = 5.0;

// =============================================================================
// Priced
// =============================================================================

/// Anything that contributes a subtotal to an order.
pub trait Priced {
    fn subtotal(&self) -> f64;
}

impl Priced for LineItem {
    fn subtotal(&self) -> f64 {
        self.subtotal
    }
}

impl Priced for f64 {
    fn subtotal(&self) -> f64 {
        *self
    }
}

impl<T: Priced + ?Sized> Priced for &T {
    fn subtotal(&self) -> f64 {
        (**self).subtotal()
    }
}

// =============================================================================
// Order Aggregator
// =============================================================================

/// Computes [`OrderTotals`] for a fixed pair of tax rates.
///
/// ## Example
/// ```rust
/// use glazier_core::totals::OrderAggregator;
///
/// let totals = OrderAggregator::default().aggregate(&[10000.0, 5000.0]);
///
/// assert_eq!(totals.net_subtotal, 15000.0);
/// assert!((totals.tax_amount - 3150.0).abs() < 1e-9);
/// assert!((totals.gross_receipts_amount - 907.5).abs() < 1e-9);
/// assert!((totals.total - 19057.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAggregator {
    vat: Percent,
    gross_receipts: Percent,
}

impl Default for OrderAggregator {
    fn default() -> Self {
        OrderAggregator::new(
            Percent::from(DEFAULT_VAT),
            Percent::from(DEFAULT_GROSS_RECEIPTS),
        )
    }
}

impl OrderAggregator {
    /// Creates an aggregator.
    pub fn new(vat: Percent, gross_receipts: Percent) -> Self {
        OrderAggregator {
            vat,
            gross_receipts,
        }
    }

    /// IVA rate.
    pub fn vat(&self) -> Percent {
        self.vat
    }

    /// IIBB rate.
    pub fn gross_receipts(&self) -> Percent {
        self.gross_receipts
    }

    /// Totals for a net subtotal that is already summed.
    pub fn totals_for(&self, net_subtotal: f64) -> OrderTotals {
        let tax_amount = self.vat.of(net_subtotal);
        let gross_receipts_amount = self.gross_receipts.of(net_subtotal + tax_amount);

        OrderTotals {
            net_subtotal,
            tax_amount,
            gross_receipts_amount,
            total: net_subtotal + tax_amount + gross_receipts_amount,
        }
    }

    /// Sums the items and applies the tax cascade.
    ///
    /// An empty slice yields all-zero totals. Any `NaN` subtotal makes every
    /// amount `NaN`.
    pub fn aggregate<T: Priced>(&self, items: &[T]) -> OrderTotals {
        let net_subtotal: f64 = items.iter().map(Priced::subtotal).sum();

        self.totals_for(net_subtotal)
    }
}

/// Aggregates an order in a single call.
///
/// Rates accept numbers or strings; strings that do not parse count as zero.
///
/// ## Example
/// ```rust
/// use glazier_core::totals::aggregate_order;
///
/// let totals = aggregate_order(&[1000.0], "", "");
/// assert_eq!(totals.total, 1000.0);
/// ```
pub fn aggregate_order<T: Priced>(
    items: &[T],
    vat: impl Into<Percent>,
    gross_receipts: impl Into<Percent>,
) -> OrderTotals {
    OrderAggregator::new(vat.into(), gross_receipts.into()).aggregate(items)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_cascading_totals() {
        let items = vec![
            LineItem::new(1, "A", 10000.0),
            LineItem::new(2, "B", 5000.0),
        ];
        let totals = OrderAggregator::default().aggregate(&items);

        assert!(close(totals.net_subtotal, 15000.0));
        assert!(close(totals.tax_amount, 3150.0));
        assert!(close(totals.gross_receipts_amount, 907.5));
        assert!(close(totals.total, 19057.5));
    }

    #[test]
    fn test_gross_receipts_levied_on_tax_inclusive_amount() {
        let totals = aggregate_order(&[100.0], 10.0, 10.0);
        assert!(close(totals.tax_amount, 10.0));
        assert!(close(totals.gross_receipts_amount, 11.0));
        assert!(close(totals.gross_receipts_amount, totals.net_plus_tax() * 0.10));
        assert!(close(totals.total, 121.0));
    }

    #[test]
    fn test_empty_order_is_all_zero() {
        let totals = OrderAggregator::default().aggregate::<LineItem>(&[]);
        assert_eq!(totals, OrderTotals::default());
    }

    #[test]
    fn test_order_of_items_does_not_matter() {
        let aggregator = OrderAggregator::default();
        let forward = aggregator.aggregate(&[1234.5, 99.25, 87000.0]);
        let backward = aggregator.aggregate(&[87000.0, 99.25, 1234.5]);
        assert!(close(forward.total, backward.total));
    }

    #[test]
    fn test_repeated_aggregation_is_stable() {
        let aggregator = OrderAggregator::new(Percent::from(10.5), Percent::from(3.5));
        let items = [LineItem::new(1, "A", 4321.0)];
        assert_eq!(aggregator.aggregate(&items), aggregator.aggregate(&items));
    }

    #[test]
    fn test_unparseable_rates_count_as_zero() {
        let totals = aggregate_order(&[500.0], "IVA", "n/a");
        assert_eq!(totals.tax_amount, 0.0);
        assert_eq!(totals.gross_receipts_amount, 0.0);
        assert_eq!(totals.total, 500.0);
    }

    #[test]
    fn test_nan_subtotal_propagates() {
        let totals = OrderAggregator::default().aggregate(&[100.0, f64::NAN]);
        assert!(totals.net_subtotal.is_nan());
        assert!(totals.total.is_nan());
        assert!(!totals.is_finite());
    }
}
