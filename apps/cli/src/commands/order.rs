//! # Order Commands
//!
//! Lines of the current order and its cascading totals.

use std::fmt::Write as _;

use serde::Serialize;
use tracing::debug;

use super::Output;
use crate::error::AppResult;
use crate::state::Session;
use glazier_core::{format_currency, LineItem, OrderTotals};

/// Order lines with their totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView<'a> {
    pub items: &'a [LineItem],
    pub totals: OrderTotals,
}

/// Lists the order with totals.
pub fn list(session: &Session, output: Output) -> AppResult<String> {
    let view = OrderView {
        items: session.order.items(),
        totals: session.totals(),
    };

    output.render(&view, || {
        if view.items.is_empty() {
            return "The order is empty. Add lines with `glazier quote --add`.".to_string();
        }

        let aggregator = session.settings.aggregator();
        let mut text = String::new();
        for item in view.items {
            let _ = writeln!(
                text,
                "{:>13}  {:<48} {:>16}",
                item.id,
                item.description,
                format_currency(item.subtotal)
            );
        }
        let _ = writeln!(text);
        let totals = &view.totals;
        for (label, amount) in [
            ("Subtotal Neto".to_string(), totals.net_subtotal),
            (format!("IVA ({}%)", aggregator.vat().value()), totals.tax_amount),
            (
                format!("IIBB ({}%)", aggregator.gross_receipts().value()),
                totals.gross_receipts_amount,
            ),
            ("TOTAL".to_string(), totals.total),
        ] {
            let _ = writeln!(text, "{:<64} {:>16}", label, format_currency(amount));
        }
        text.trim_end().to_string()
    })
}

/// Removes a line by id.
pub async fn remove(session: &mut Session, id: i64) -> AppResult<String> {
    debug!(id, "order remove command");

    let item = session.remove_line(id).await?;
    Ok(format!("Removed: {}", item.description))
}

/// Removes every line.
pub async fn clear(session: &mut Session) -> AppResult<String> {
    let removed = session.clear_order().await?;
    Ok(format!("Order cleared ({} lines removed)", removed))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::session;
    use crate::error::ErrorCode;
    use glazier_core::Dimensions;

    async fn add(session: &mut Session, install: bool) -> LineItem {
        let (request, _) = session
            .quote("Float Incoloro", "4mm", Dimensions::new(1.0, 1.0, 1), install)
            .unwrap();
        session.add_line(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_list_shows_cascading_totals() {
        let mut session = session().await;
        add(&mut session, false).await;
        add(&mut session, true).await;

        let text = list(&session, Output::Text).unwrap();
        assert!(text.contains("$\u{a0}51.750,00"));
        assert!(text.contains("IVA (21%)"));
        assert!(text.contains("$\u{a0}10.867,50"));
        assert!(text.contains("$\u{a0}3.130,88"));
        assert!(text.contains("$\u{a0}65.748,38"));

        let json: serde_json::Value =
            serde_json::from_str(&list(&session, Output::Json).unwrap()).unwrap();
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
        assert_eq!(json["totals"]["netSubtotal"], 51750.0);
    }

    #[tokio::test]
    async fn test_empty_order() {
        let session = session().await;
        assert!(list(&session, Output::Text).unwrap().contains("empty"));
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let mut session = session().await;
        let first = add(&mut session, false).await;
        add(&mut session, true).await;

        let text = remove(&mut session, first.id).await.unwrap();
        assert_eq!(text, format!("Removed: {}", first.description));

        let err = remove(&mut session, first.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        assert_eq!(clear(&mut session).await.unwrap(), "Order cleared (1 lines removed)");
        assert!(session.order.is_empty());
    }
}
