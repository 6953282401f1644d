//! # Quoting Session
//!
//! Everything a command works with: shop settings, the price list and the
//! current order, loaded from the database when the command starts and
//! written back as it changes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │   Session::load(db)                                                     │
//! │     ├── settings ◄── SettingsRepository::load   (defaults if missing)   │
//! │     ├── catalog  ◄── CatalogRepository::list    (import order)          │
//! │     └── order    ◄── OrderRepository::list      (id order)              │
//! │                                                                         │
//! │   command mutates the session                                           │
//! │     └── every mutation is written through to the database               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core never sees the session; it only receives the values the session
//! hands it (a pricer, an aggregator, a catalog entry).

use tracing::{debug, info};

use crate::error::AppResult;
use crate::state::Order;
use glazier_core::validation::validate_dimensions;
use glazier_core::{Catalog, CatalogEntry, Dimensions, LineItem, OrderTotals, QuoteRequest, ShopSettings};
use glazier_db::Database;

/// Loaded quoting state plus the database it came from.
#[derive(Debug, Clone)]
pub struct Session {
    db: Database,
    pub settings: ShopSettings,
    pub catalog: Catalog,
    pub order: Order,
}

impl Session {
    /// Loads settings, catalog and order from `db`.
    pub async fn load(db: Database) -> AppResult<Self> {
        let settings = db.settings().load().await?;
        let catalog = db.catalog().list().await?;
        let order = Order::from_items(db.order().list().await?);

        debug!(
            catalog_entries = catalog.len(),
            order_lines = order.len(),
            "Session loaded"
        );

        Ok(Session {
            db,
            settings,
            catalog,
            order,
        })
    }

    /// Database handle backing this session.
    pub fn db(&self) -> &Database {
        &self.db
    }

    // =========================================================================
    // Quoting
    // =========================================================================

    /// Builds a priced quote request for the selected glass.
    ///
    /// ## Gates
    /// 1. Dimensions must be positive and quantity at least 1
    /// 2. The `(kind, thickness)` selection must exist in the catalog
    /// 3. The entry's cost price must parse
    ///
    /// Returns the request with its computed price.
    pub fn quote(
        &self,
        kind: &str,
        thickness: &str,
        dimensions: Dimensions,
        include_installation: bool,
    ) -> AppResult<(QuoteRequest, f64)> {
        validate_dimensions(&dimensions)?;
        let entry = self.catalog.find(kind, thickness)?.clone();

        let request = QuoteRequest::new(
            entry,
            dimensions,
            include_installation,
            &self.settings.pricer(),
        );
        let price = request.price()?;

        Ok((request, price))
    }

    /// Appends a quote to the order and stores it.
    pub async fn add_line(&mut self, request: QuoteRequest) -> AppResult<LineItem> {
        let item = self.order.add(request)?.clone();
        if let Err(e) = self.db.order().insert(&item).await {
            // Keep memory and storage in step
            let _ = self.order.remove(item.id);
            return Err(e.into());
        }

        info!(id = item.id, subtotal = item.subtotal, "Line added");
        Ok(item)
    }

    /// Removes a line by id.
    pub async fn remove_line(&mut self, id: i64) -> AppResult<LineItem> {
        let item = self.order.remove(id)?;
        self.db.order().remove(id).await?;

        info!(id, "Line removed");
        Ok(item)
    }

    /// Empties the order.
    pub async fn clear_order(&mut self) -> AppResult<u64> {
        self.order.clear();
        let removed = self.db.order().clear().await?;

        info!(removed, "Order cleared");
        Ok(removed)
    }

    /// Totals for the current order under the current rates.
    pub fn totals(&self) -> OrderTotals {
        self.order.totals(&self.settings.aggregator())
    }

    // =========================================================================
    // Catalog & Settings
    // =========================================================================

    /// Replaces the price list.
    pub async fn replace_catalog(&mut self, entries: Vec<CatalogEntry>) -> AppResult<()> {
        self.db.catalog().replace_all(&entries).await?;
        self.catalog = Catalog::new(entries);

        info!(entries = self.catalog.len(), "Catalog replaced");
        Ok(())
    }

    /// Writes the in-memory settings to the database.
    pub async fn save_settings(&self) -> AppResult<()> {
        self.db.settings().save(&self.settings).await?;
        debug!("Settings saved");
        Ok(())
    }

    /// Restores default shop settings.
    pub async fn reset_settings(&mut self) -> AppResult<()> {
        self.db.settings().reset().await?;
        self.settings = ShopSettings::default();

        info!("Settings reset to defaults");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::commands::test_support::session;

    #[tokio::test]
    async fn test_quote_uses_settings_rates() {
        let session = session().await;

        let (_, price) = session
            .quote("Float Incoloro", "4mm", Dimensions::new(1.0, 1.0, 1), false)
            .unwrap();
        assert!((price - 22500.0).abs() < 1e-9);

        let (request, price) = session
            .quote("Float Incoloro", "4mm", Dimensions::new(1.0, 1.0, 1), true)
            .unwrap();
        assert!((price - 29250.0).abs() < 1e-9);
        assert!(request.describe().ends_with("[Con Colocación]"));
    }

    #[tokio::test]
    async fn test_quote_gates() {
        let session = session().await;

        let err = session
            .quote("Float Incoloro", "4mm", Dimensions::new(0.0, 1.0, 1), false)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = session
            .quote("Float Incoloro", "4mm", Dimensions::new(1.0, 1.0, 0), false)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = session
            .quote("Float Gris", "4mm", Dimensions::new(1.0, 1.0, 1), false)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = session
            .quote("Espejo", "4mm", Dimensions::new(1.0, 1.0, 1), false)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PricingError);
    }

    #[tokio::test]
    async fn test_order_survives_reload() {
        let mut session = session().await;

        let (request, _) = session
            .quote("Float Incoloro", "4mm", Dimensions::new(1.0, 1.0, 1), false)
            .unwrap();
        let first = session.add_line(request).await.unwrap();
        let (request, _) = session
            .quote("Float Incoloro", "4mm", Dimensions::new(1.0, 1.0, 1), true)
            .unwrap();
        session.add_line(request).await.unwrap();

        let reloaded = Session::load(session.db().clone()).await.unwrap();
        assert_eq!(reloaded.order.len(), 2);
        assert_eq!(reloaded.order.items()[0], first);
        assert!((reloaded.totals().total - 65748.375).abs() < 1e-6);
        assert_eq!(reloaded.catalog.len(), 3);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let mut session = session().await;

        let (request, _) = session
            .quote("Float Incoloro", "4mm", Dimensions::new(2.0, 1.0, 1), false)
            .unwrap();
        let item = session.add_line(request).await.unwrap();

        session.remove_line(item.id).await.unwrap();
        assert!(session.order.is_empty());
        assert!(session.db().order().list().await.unwrap().is_empty());

        let err = session.remove_line(item.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let (request, _) = session
            .quote("Float Incoloro", "4mm", Dimensions::new(2.0, 1.0, 1), false)
            .unwrap();
        session.add_line(request).await.unwrap();
        assert_eq!(session.clear_order().await.unwrap(), 1);
        assert_eq!(session.totals().total, 0.0);
    }

    #[tokio::test]
    async fn test_settings_round_trip_and_reset() {
        let mut session = session().await;

        session.settings.margin = "60".to_string();
        session.settings.shop_name = "Cristalería Sur".to_string();
        session.save_settings().await.unwrap();

        let reloaded = Session::load(session.db().clone()).await.unwrap();
        assert_eq!(reloaded.settings.margin, "60");
        assert_eq!(reloaded.settings.shop_name, "Cristalería Sur");

        session.reset_settings().await.unwrap();
        let reloaded = Session::load(session.db().clone()).await.unwrap();
        assert_eq!(reloaded.settings, ShopSettings::default());
    }
}
