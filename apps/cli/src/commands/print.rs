//! # Print Command
//!
//! Renders the quotation for the current order as text. Turning it into a
//! PDF is left to the host (`glazier print --out q.txt && lp q.txt`).

use std::path::Path;

use chrono::Local;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::state::{AppConfig, Session};
use glazier_core::Quotation;

/// Renders the quotation dated today, to stdout or to `out`.
pub fn print(session: &Session, config: &AppConfig, out: Option<&Path>) -> AppResult<String> {
    if session.order.is_empty() {
        return Err(AppError::validation("The order is empty; nothing to print"));
    }

    let totals = session.totals();
    if !totals.is_finite() {
        return Err(AppError::internal("Order totals are not finite"));
    }

    let quotation = Quotation::new(
        &session.settings,
        session.order.items(),
        Local::now().date_naive(),
    )
    .with_validity_days(config.quotation_validity_days);
    let text = quotation.to_string();

    match out {
        Some(path) => {
            std::fs::write(path, &text)?;
            info!(path = %path.display(), lines = session.order.len(), "Quotation written");
            Ok(format!("Quotation written to {}", path.display()))
        }
        None => Ok(text.trim_end().to_string()),
    }
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

    #[tokio::test]
    async fn test_print_renders_quotation() {
        let mut session = session().await;
        let (request, _) = session
            .quote("Float Incoloro", "4mm", Dimensions::new(1.0, 1.0, 1), true)
            .unwrap();
        session.add_line(request).await.unwrap();

        let config = AppConfig {
            quotation_validity_days: 15,
            ..AppConfig::default()
        };
        let text = print(&session, &config, None).unwrap();

        assert!(text.starts_with("Vidriería Misiones\nPresupuesto Oficial\nFecha: "));
        assert!(text.contains("[Con Colocación]"));
        assert!(text.contains("TOTAL PRESUPUESTO"));
        assert!(text.ends_with("Presupuesto válido por 15 días."));
    }

    #[tokio::test]
    async fn test_print_empty_order_rejected() {
        let session = session().await;
        let err = print(&session, &AppConfig::default(), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
