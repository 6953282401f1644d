//! # Settings Repository
//!
//! Shop settings stored as key/value rows.
//!
//! ## Layout
//! ```text
//! ┌───────────────────┬──────────────────────────┐
//! │ key               │ value                    │
//! ├───────────────────┼──────────────────────────┤
//! │ shop_name         │ Vidriería Misiones       │
//! │ margin            │ 50                       │  ← stored as typed,
//! │ installation      │ 30                       │    parsed on every quote
//! │ vat               │ 21                       │
//! │ gross_receipts    │ 5                        │
//! │ background_color  │ #f1f5f9                  │
//! │ logo              │ data:image/png;base64,…  │  ← absent when unset
//! │ session.account_id│ 6f1c…                    │  ← raw key, login marker
//! └───────────────────┴──────────────────────────┘
//! ```
//!
//! Missing keys load as their defaults, so a fresh database behaves like a
//! freshly installed shop.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use glazier_core::ShopSettings;

const SHOP_NAME: &str = "shop_name";
const LOGO: &str = "logo";
const BACKGROUND_COLOR: &str = "background_color";
const MARGIN: &str = "margin";
const INSTALLATION: &str = "installation";
const VAT: &str = "vat";
const GROSS_RECEIPTS: &str = "gross_receipts";

/// Every key that belongs to [`ShopSettings`].
pub const SHOP_SETTING_KEYS: [&str; 7] = [
    SHOP_NAME,
    LOGO,
    BACKGROUND_COLOR,
    MARGIN,
    INSTALLATION,
    VAT,
    GROSS_RECEIPTS,
];

/// Repository for settings operations.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Loads the shop settings, filling missing keys with defaults.
    pub async fn load(&self) -> DbResult<ShopSettings> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM settings")
            .fetch_all(&self.pool)
            .await?;

        let mut settings = ShopSettings::default();
        for (key, value) in rows {
            match key.as_str() {
                SHOP_NAME => settings.shop_name = value,
                LOGO => settings.logo = Some(value),
                BACKGROUND_COLOR => settings.background_color = value,
                MARGIN => settings.margin = value,
                INSTALLATION => settings.installation = value,
                VAT => settings.vat = value,
                GROSS_RECEIPTS => settings.gross_receipts = value,
                _ => {}
            }
        }

        Ok(settings)
    }

    /// Writes every shop setting in one transaction.
    ///
    /// A `None` logo removes the stored logo.
    pub async fn save(&self, settings: &ShopSettings) -> DbResult<()> {
        debug!(shop_name = %settings.shop_name, "Saving shop settings");

        let pairs = [
            (SHOP_NAME, settings.shop_name.as_str()),
            (BACKGROUND_COLOR, settings.background_color.as_str()),
            (MARGIN, settings.margin.as_str()),
            (INSTALLATION, settings.installation.as_str()),
            (VAT, settings.vat.as_str()),
            (GROSS_RECEIPTS, settings.gross_receipts.as_str()),
        ];

        let mut tx = self.pool.begin().await?;

        for (key, value) in pairs {
            upsert(&mut tx, key, value).await?;
        }

        match &settings.logo {
            Some(logo) => upsert(&mut tx, LOGO, logo).await?,
            None => {
                sqlx::query("DELETE FROM settings WHERE key = ?1")
                    .bind(LOGO)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Deletes every shop setting, restoring defaults. Raw keys survive.
    pub async fn reset(&self) -> DbResult<()> {
        debug!("Resetting shop settings");

        let mut tx = self.pool.begin().await?;
        for key in SHOP_SETTING_KEYS {
            sqlx::query("DELETE FROM settings WHERE key = ?1")
                .bind(key)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        Ok(())
    }

    /// Reads a raw key.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Writes a raw key.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, "Setting raw key");

        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes a raw key. Returns whether it existed.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM settings WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn upsert(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    key: &str,
    value: &str,
) -> DbResult<()> {
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use glazier_core::ShopSettings;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_fresh_database_loads_defaults() {
        let db = db().await;
        assert_eq!(db.settings().load().await.unwrap(), ShopSettings::default());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let db = db().await;
        let settings = ShopSettings {
            shop_name: "Cristalería Sur".to_string(),
            logo: Some("data:image/png;base64,AAAA".to_string()),
            margin: "45".to_string(),
            vat: "abc".to_string(),
            ..ShopSettings::default()
        };

        db.settings().save(&settings).await.unwrap();
        let loaded = db.settings().load().await.unwrap();
        assert_eq!(loaded, settings);

        // Clearing the logo deletes the row
        let without_logo = ShopSettings {
            logo: None,
            ..settings
        };
        db.settings().save(&without_logo).await.unwrap();
        assert_eq!(db.settings().load().await.unwrap().logo, None);
    }

    #[tokio::test]
    async fn test_reset_keeps_raw_keys() {
        let db = db().await;
        let repo = db.settings();

        repo.set("session.account_id", "abc").await.unwrap();
        repo.save(&ShopSettings {
            margin: "80".to_string(),
            ..ShopSettings::default()
        })
        .await
        .unwrap();

        repo.reset().await.unwrap();

        assert_eq!(repo.load().await.unwrap(), ShopSettings::default());
        assert_eq!(repo.get("session.account_id").await.unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_raw_keys() {
        let db = db().await;
        let repo = db.settings();

        assert_eq!(repo.get("missing").await.unwrap(), None);
        repo.set("k", "1").await.unwrap();
        repo.set("k", "2").await.unwrap();
        assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("2"));
        assert!(repo.delete("k").await.unwrap());
        assert!(!repo.delete("k").await.unwrap());
    }
}
