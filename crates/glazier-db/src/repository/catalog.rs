//! # Catalog Repository
//!
//! Snapshot of the last imported price list.
//!
//! An import replaces the whole list; rows are never edited in place. The
//! `position` column keeps the order of the source file so that duplicate
//! `(kind, thickness)` pairs resolve to the same row after a reload.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use glazier_core::{Catalog, CatalogEntry};

/// Catalog row as stored.
#[derive(Debug, Clone, sqlx::FromRow)]
struct CatalogRow {
    kind: String,
    thickness: String,
    unit_cost_price: String,
}

impl From<CatalogRow> for CatalogEntry {
    fn from(row: CatalogRow) -> Self {
        CatalogEntry::new(row.kind, row.thickness, row.unit_cost_price)
    }
}

/// Repository for the imported price list.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Replaces the stored price list with `entries`, in one transaction.
    pub async fn replace_all(&self, entries: &[CatalogEntry]) -> DbResult<()> {
        info!(count = entries.len(), "Replacing catalog");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM catalog_entries")
            .execute(&mut *tx)
            .await?;

        for (position, entry) in entries.iter().enumerate() {
            sqlx::query(
                "INSERT INTO catalog_entries (position, kind, thickness, unit_cost_price)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(position as i64)
            .bind(&entry.kind)
            .bind(&entry.thickness)
            .bind(&entry.unit_cost_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!("Catalog replaced");

        Ok(())
    }

    /// Loads the price list in import order.
    pub async fn list(&self) -> DbResult<Catalog> {
        let rows: Vec<CatalogRow> = sqlx::query_as(
            "SELECT kind, thickness, unit_cost_price
             FROM catalog_entries
             ORDER BY position",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(Catalog::new(rows.into_iter().map(CatalogEntry::from).collect()))
    }

    /// Number of stored entries.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM catalog_entries")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use glazier_core::CatalogEntry;

    #[tokio::test]
    async fn test_replace_all_preserves_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();

        let entries = vec![
            CatalogEntry::new("Laminado 3+3", "6mm", "$ 40.000"),
            CatalogEntry::new("Float Incoloro", "4mm", "15000"),
            CatalogEntry::new("Float Incoloro", "4mm", "99999"),
        ];
        repo.replace_all(&entries).await.unwrap();

        let catalog = repo.list().await.unwrap();
        assert_eq!(catalog.entries(), entries.as_slice());
        assert_eq!(
            catalog.find("Float Incoloro", "4mm").unwrap().unit_cost_price,
            "15000"
        );
    }

    #[tokio::test]
    async fn test_replace_all_drops_previous_import() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();

        repo.replace_all(&[CatalogEntry::new("Espejo", "4mm", "20000")])
            .await
            .unwrap();
        repo.replace_all(&[
            CatalogEntry::new("Float Incoloro", "4mm", "15000"),
            CatalogEntry::new("Float Incoloro", "5mm", "18500"),
        ])
        .await
        .unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        assert!(repo.list().await.unwrap().find("Espejo", "4mm").is_err());

        repo.replace_all(&[]).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }
}
