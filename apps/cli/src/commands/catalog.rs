//! # Catalog Commands
//!
//! The price list every quote is priced from.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalog template  ──► plantilla_precios.csv (BOM + header + 1 row)    │
//! │        │                                                                │
//! │        ▼  (operator fills it in a spreadsheet)                          │
//! │  catalog import    ──► .csv only, headers checked, list replaced       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  catalog list      ──► kind / thickness / cost price as written        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;
use std::path::Path;

use tracing::debug;

use super::Output;
use crate::error::AppResult;
use crate::import::{load_price_list_file, TEMPLATE_CSV, TEMPLATE_FILE_NAME};
use crate::state::Session;

/// Replaces the catalog with the contents of `file`.
///
/// The current catalog is kept when the file is rejected.
pub async fn import(session: &mut Session, file: &Path, output: Output) -> AppResult<String> {
    debug!(file = %file.display(), "catalog import command");

    let entries = load_price_list_file(file)?;
    session.replace_catalog(entries).await?;

    let count = session.catalog.len();
    output.render(&serde_json::json!({ "imported": count }), || {
        format!("Price list updated: {} entries", count)
    })
}

/// Writes the example price list to `out` (or `./plantilla_precios.csv`).
pub fn template(out: Option<&Path>) -> AppResult<String> {
    let path = out.unwrap_or_else(|| Path::new(TEMPLATE_FILE_NAME));
    std::fs::write(path, TEMPLATE_CSV)?;

    Ok(format!("Template written to {}", path.display()))
}

/// Shows the catalog.
pub fn list(session: &Session, output: Output) -> AppResult<String> {
    output.render(&session.catalog, || {
        if session.catalog.is_empty() {
            return "No price list loaded. Run `glazier catalog import <file>`.".to_string();
        }

        let mut text = format!("{:<28} {:<10} {}\n", "Tipo", "Espesor", "Precio m²");
        for entry in session.catalog.iter() {
            let _ = writeln!(
                text,
                "{:<28} {:<10} {}",
                entry.kind, entry.thickness, entry.unit_cost_price
            );
        }
        text.trim_end().to_string()
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

    fn temp_path(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("glazier-catalog-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[tokio::test]
    async fn test_template_then_import() {
        let mut session = session().await;
        let path = temp_path("plantilla_precios.csv");

        template(Some(&path)).unwrap();
        let text = import(&mut session, &path, Output::Text).await.unwrap();
        assert_eq!(text, "Price list updated: 1 entries");
        assert_eq!(session.catalog.len(), 1);
        assert_eq!(session.db().catalog().count().await.unwrap(), 1);

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_rejected_import_keeps_catalog() {
        let mut session = session().await;
        let path = temp_path("incompleta.csv");
        std::fs::write(&path, "tipo;precio\nFloat;100\n").unwrap();

        let err = import(&mut session, &path, Output::Text).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ImportError);
        assert!(err.message.contains("espesor, precio_m2"));
        assert_eq!(session.catalog.len(), 3);

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_list_text_and_json() {
        let session = session().await;

        let text = list(&session, Output::Text).unwrap();
        assert!(text.contains("Float Incoloro"));
        assert!(text.contains("$ 15.000,50"));

        let json: serde_json::Value =
            serde_json::from_str(&list(&session, Output::Json).unwrap()).unwrap();
        assert_eq!(json[0]["tipo"], "Float Incoloro");
        assert_eq!(json[0]["precio_m2"], "15000");
    }
}
