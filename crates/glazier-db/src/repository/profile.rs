//! # Profile Repository
//!
//! Shop settings saved against an account, so an operator can carry their
//! configuration to another machine with `account push` / `account pull`.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use glazier_core::ShopSettings;

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    shop_name: String,
    logo: Option<String>,
    background_color: String,
    margin: String,
    installation: String,
    vat: String,
    gross_receipts: String,
}

impl From<ProfileRow> for ShopSettings {
    fn from(row: ProfileRow) -> Self {
        ShopSettings {
            shop_name: row.shop_name,
            logo: row.logo,
            background_color: row.background_color,
            margin: row.margin,
            installation: row.installation,
            vat: row.vat,
            gross_receipts: row.gross_receipts,
        }
    }
}

/// Repository for per-account settings.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    /// Creates a new ProfileRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProfileRepository { pool }
    }

    /// Settings saved for `account_id`, if any.
    pub async fn get(&self, account_id: &str) -> DbResult<Option<ShopSettings>> {
        let row: Option<ProfileRow> = sqlx::query_as(
            "SELECT shop_name, logo, background_color, margin, installation, vat, gross_receipts
             FROM profiles
             WHERE account_id = ?1",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ShopSettings::from))
    }

    /// Saves `settings` for `account_id`, replacing any previous profile.
    ///
    /// Fails with [`crate::DbError::ForeignKeyViolation`] for an unknown
    /// account.
    pub async fn upsert(&self, account_id: &str, settings: &ShopSettings) -> DbResult<()> {
        debug!(account_id = %account_id, "Saving profile");

        sqlx::query(
            "INSERT INTO profiles (
                account_id, shop_name, logo, background_color,
                margin, installation, vat, gross_receipts, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(account_id) DO UPDATE SET
                shop_name = excluded.shop_name,
                logo = excluded.logo,
                background_color = excluded.background_color,
                margin = excluded.margin,
                installation = excluded.installation,
                vat = excluded.vat,
                gross_receipts = excluded.gross_receipts,
                updated_at = excluded.updated_at",
        )
        .bind(account_id)
        .bind(&settings.shop_name)
        .bind(&settings.logo)
        .bind(&settings.background_color)
        .bind(&settings.margin)
        .bind(&settings.installation)
        .bind(&settings.vat)
        .bind(&settings.gross_receipts)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use glazier_core::ShopSettings;

    #[tokio::test]
    async fn test_upsert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let account = db.accounts().register("a@b.com", "secreto", "A").await.unwrap();
        let profiles = db.profiles();

        assert!(profiles.get(&account.id).await.unwrap().is_none());

        let first = ShopSettings {
            shop_name: "Cristalería Sur".to_string(),
            ..ShopSettings::default()
        };
        profiles.upsert(&account.id, &first).await.unwrap();
        assert_eq!(profiles.get(&account.id).await.unwrap(), Some(first));

        let second = ShopSettings {
            logo: Some("data:image/jpeg;base64,/9j/".to_string()),
            margin: "60".to_string(),
            ..ShopSettings::default()
        };
        profiles.upsert(&account.id, &second).await.unwrap();
        assert_eq!(profiles.get(&account.id).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_unknown_account_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db
            .profiles()
            .upsert("missing", &ShopSettings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
