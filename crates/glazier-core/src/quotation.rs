//! # Quotation Rendering
//!
//! Renders an order as the plain-text quotation handed to the customer.
//!
//! ## Layout
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ Vidriería Misiones                                               │
//! │ Presupuesto Oficial                                              │
//! │ Fecha: 16/10/2026                                                │
//! │ ──────────────────────────────────────────────────────────────── │
//! │ Detalle del Vidrio                                      Subtotal │
//! │ 1 un. de 1m x 1m - Float Incoloro (4mm)              $ 22.500,00 │
//! │ ──────────────────────────────────────────────────────────────── │
//! │ Subtotal Neto / IVA (21%) / IIBB (5%)                            │
//! │ TOTAL PRESUPUESTO                                    $ 27.224,50 │
//! │ ──────────────────────────────────────────────────────────────── │
//! │ validity footer                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The date is passed in; this module never reads the clock.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::money::format_currency;
use crate::totals::OrderAggregator;
use crate::types::{LineItem, OrderTotals, ShopSettings};

/// Default number of days a quotation is honored.
pub const DEFAULT_VALIDITY_DAYS: u32 = 7;

/// Printable width of a quotation, in characters.
const LINE_WIDTH: usize = 64;

// =============================================================================
// Quotation
// =============================================================================

/// A rendered-on-demand quotation for one order.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use glazier_core::quotation::Quotation;
/// use glazier_core::types::{LineItem, ShopSettings};
///
/// let settings = ShopSettings::default();
/// let items = vec![LineItem::new(1, "1 un. de 1m x 1m - Float Incoloro (4mm)", 22500.0)];
/// let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
///
/// let text = Quotation::new(&settings, &items, date).to_string();
/// assert!(text.contains("Fecha: 5/3/2026"));
/// assert!(text.contains("TOTAL PRESUPUESTO"));
/// ```
#[derive(Debug, Clone)]
pub struct Quotation<'a> {
    shop_name: &'a str,
    items: &'a [LineItem],
    aggregator: OrderAggregator,
    date: NaiveDate,
    validity_days: u32,
}

impl<'a> Quotation<'a> {
    /// Builds a quotation using the shop's name and tax rates.
    pub fn new(settings: &'a ShopSettings, items: &'a [LineItem], date: NaiveDate) -> Self {
        Quotation {
            shop_name: &settings.shop_name,
            items,
            aggregator: settings.aggregator(),
            date,
            validity_days: DEFAULT_VALIDITY_DAYS,
        }
    }

    /// Overrides the validity period printed in the footer.
    pub fn with_validity_days(mut self, days: u32) -> Self {
        self.validity_days = days;
        self
    }

    /// Totals shown at the bottom of the quotation.
    pub fn totals(&self) -> OrderTotals {
        self.aggregator.aggregate(self.items)
    }

    /// Date in `d/m/yyyy`, without zero padding.
    pub fn formatted_date(&self) -> String {
        format_date(self.date)
    }
}

impl fmt::Display for Quotation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(LINE_WIDTH);
        let totals = self.totals();

        writeln!(f, "{}", self.shop_name)?;
        writeln!(f, "Presupuesto Oficial")?;
        writeln!(f, "Fecha: {}", self.formatted_date())?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", row("Detalle del Vidrio", "Subtotal"))?;
        writeln!(f, "{rule}")?;

        for item in self.items {
            writeln!(f, "{}", row(&item.description, &format_currency(item.subtotal)))?;
        }

        writeln!(f, "{rule}")?;
        writeln!(f, "{}", row("Subtotal Neto", &format_currency(totals.net_subtotal)))?;
        writeln!(
            f,
            "{}",
            row(
                &format!("IVA ({}%)", self.aggregator.vat().value()),
                &format_currency(totals.tax_amount)
            )
        )?;
        writeln!(
            f,
            "{}",
            row(
                &format!("IIBB ({}%)", self.aggregator.gross_receipts().value()),
                &format_currency(totals.gross_receipts_amount)
            )
        )?;
        writeln!(f, "{}", "=".repeat(LINE_WIDTH))?;
        writeln!(f, "{}", row("TOTAL PRESUPUESTO", &format_currency(totals.total)))?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "Los precios aquí detallados están sujetos a modificaciones sin previo aviso. \
             Presupuesto válido por {} días.",
            self.validity_days
        )
    }
}

/// Formats a date as `d/m/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Left label, right-aligned amount, padded to the line width.
fn row(label: &str, amount: &str) -> String {
    let used = label.chars().count() + amount.chars().count();
    let padding = LINE_WIDTH.saturating_sub(used).max(1);

    format!("{label}{}{amount}", " ".repeat(padding))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn items() -> Vec<LineItem> {
        vec![
            LineItem::new(1, "1 un. de 1m x 1m - Float Incoloro (4mm)", 22500.0),
            LineItem::new(
                2,
                "1 un. de 1m x 1m - Float Incoloro (4mm) [Con Colocación]",
                29250.0,
            ),
        ]
    }

    #[test]
    fn test_format_date_has_no_padding() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2026, 1, 9).unwrap()), "9/1/2026");
        assert_eq!(format_date(date()), "16/10/2026");
    }

    #[test]
    fn test_row_right_aligns_amount() {
        let line = row("Subtotal Neto", "$\u{a0}1,00");
        assert_eq!(line.chars().count(), LINE_WIDTH);
        assert!(line.ends_with("$\u{a0}1,00"));

        let long = row(&"x".repeat(80), "$\u{a0}1,00");
        assert!(long.contains("x $"));
    }

    #[test]
    fn test_quotation_sections() {
        let settings = ShopSettings::default();
        let items = items();
        let text = Quotation::new(&settings, &items, date()).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Vidriería Misiones");
        assert_eq!(lines[1], "Presupuesto Oficial");
        assert_eq!(lines[2], "Fecha: 16/10/2026");
        assert!(text.contains("[Con Colocación]"));
        assert!(text.contains("$\u{a0}29.250,00"));
        assert!(text.contains("IVA (21%)"));
        assert!(text.contains("IIBB (5%)"));
        assert!(text.contains("$\u{a0}51.750,00"));
        assert!(text.contains("$\u{a0}65.748,38"));
        assert!(text.ends_with("Presupuesto válido por 7 días.\n"));
    }

    #[test]
    fn test_quotation_custom_rates_and_validity() {
        let settings = ShopSettings {
            shop_name: "Cristalería Sur".to_string(),
            vat: "10.5".to_string(),
            gross_receipts: "0".to_string(),
            ..ShopSettings::default()
        };
        let items = items();
        let quotation = Quotation::new(&settings, &items, date()).with_validity_days(15);
        let text = quotation.to_string();

        assert!(text.starts_with("Cristalería Sur\n"));
        assert!(text.contains("IVA (10.5%)"));
        assert!(text.contains("IIBB (0%)"));
        assert!(text.contains("válido por 15 días."));
        assert!((quotation.totals().gross_receipts_amount).abs() < 1e-9);
    }

    #[test]
    fn test_empty_order_renders_zero_totals() {
        let settings = ShopSettings::default();
        let text = Quotation::new(&settings, &[], date()).to_string();
        assert!(text.contains(&row("TOTAL PRESUPUESTO", "$\u{a0}0,00")));
    }
}
