//! # Quote Command
//!
//! Prices one piece of glass against the loaded catalog and the shop's
//! margin and installation rates.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  glazier quote -k "Float Incoloro" -t 4mm -w 1 -H 1 --install --add     │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  1. Parse width / height / quantity (leading number)           │    │
//! │  │  2. Check dimensions > 0 and quantity >= 1                     │    │
//! │  │  3. Look up (kind, thickness) in the catalog                   │    │
//! │  │  4. Price with ItemPricer (cost price must parse)              │    │
//! │  │  5. --add: append to the order with a fresh line id            │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  1 un. de 1m x 1m - Float Incoloro (4mm) [Con Colocación]               │
//! │  $ 29.250,00                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use super::Output;
use crate::cli::QuoteArgs;
use crate::error::AppResult;
use crate::state::Session;
use glazier_core::{format_currency, Dimensions};

/// Result of a quote.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteView {
    description: String,
    subtotal: f64,
    formatted: String,
    /// Line id when the quote was added to the order.
    #[serde(skip_serializing_if = "Option::is_none")]
    line_id: Option<i64>,
}

/// Prices the requested piece and, with `--add`, appends it to the order.
pub async fn quote(session: &mut Session, args: &QuoteArgs, output: Output) -> AppResult<String> {
    debug!(
        kind = %args.kind,
        thickness = %args.thickness,
        add = args.add,
        "quote command"
    );

    let dimensions = Dimensions::parse(&args.width, &args.height, &args.quantity)?;
    let (request, subtotal) =
        session.quote(&args.kind, &args.thickness, dimensions, args.install)?;
    let request = request.with_typed_size(&args.width, &args.height);
    let description = request.describe();

    let line_id = if args.add {
        Some(session.add_line(request).await?.id)
    } else {
        None
    };

    let view = QuoteView {
        description,
        subtotal,
        formatted: format_currency(subtotal),
        line_id,
    };

    output.render(&view, || {
        let mut text = format!("{}\n{}", view.description, view.formatted);
        if let Some(id) = view.line_id {
            text.push_str(&format!("\nAdded to order as line {}", id));
        }
        text
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::session;
    use crate::error::ErrorCode;

    fn args(width: &str, height: &str, quantity: &str, install: bool, add: bool) -> QuoteArgs {
        QuoteArgs {
            kind: "Float Incoloro".to_string(),
            thickness: "4mm".to_string(),
            width: width.to_string(),
            height: height.to_string(),
            quantity: quantity.to_string(),
            install,
            add,
        }
    }

    #[tokio::test]
    async fn test_quote_without_adding() {
        let mut session = session().await;

        let text = quote(&mut session, &args("1", "1", "1", false, false), Output::Text)
            .await
            .unwrap();
        assert_eq!(
            text,
            "1 un. de 1m x 1m - Float Incoloro (4mm)\n$\u{a0}22.500,00"
        );
        assert!(session.order.is_empty());
    }

    #[tokio::test]
    async fn test_quote_and_add() {
        let mut session = session().await;

        let json = quote(&mut session, &args("1", "1", "1", true, true), Output::Json)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(json["subtotal"], 29250.0);
        assert_eq!(json["formatted"], "$\u{a0}29.250,00");
        assert!(json["lineId"].is_i64());

        assert_eq!(session.order.len(), 1);
        assert_eq!(session.db().order().list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_quantity_scales_linearly() {
        let mut session = session().await;

        let json = quote(&mut session, &args("1.2", "0.8", "3", false, false), Output::Json)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&json).unwrap();
        let subtotal = json["subtotal"].as_f64().unwrap();
        assert!((subtotal - 22500.0 * 1.2 * 0.8 * 3.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_description_uses_typed_size() {
        let mut session = session().await;

        let text = quote(&mut session, &args("1.20", "0.50", "2", false, true), Output::Text)
            .await
            .unwrap();
        assert!(text.starts_with("2 un. de 1.20m x 0.50m - Float Incoloro (4mm)\n"));
        assert_eq!(
            session.order.items()[0].description,
            "2 un. de 1.20m x 0.50m - Float Incoloro (4mm)"
        );
    }

    #[tokio::test]
    async fn test_bad_dimensions_rejected() {
        let mut session = session().await;

        let err = quote(&mut session, &args("-1", "1", "1", false, true), Output::Text)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = quote(&mut session, &args("ancho", "1", "1", false, true), Output::Text)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(session.order.is_empty());
    }
}
