//! # Order Repository
//!
//! Lines of the order currently being quoted.
//!
//! ## Line Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  glazier quote --add  ──► insert(LineItem)      id = creation ms        │
//! │  glazier order list   ──► list()                ordered by id           │
//! │  glazier order remove ──► remove(id)            NotFound when absent    │
//! │  glazier order clear  ──► clear()               after printing          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are never updated. Totals are not stored; they are recomputed from
//! the subtotals whenever the order is shown.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use glazier_core::LineItem;

/// Order line as stored.
#[derive(Debug, Clone, sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    description: String,
    subtotal: f64,
}

impl From<OrderItemRow> for LineItem {
    fn from(row: OrderItemRow) -> Self {
        LineItem::new(row.id, row.description, row.subtotal)
    }
}

/// Repository for order lines.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// All lines, oldest first.
    pub async fn list(&self) -> DbResult<Vec<LineItem>> {
        let rows: Vec<OrderItemRow> = sqlx::query_as(
            "SELECT id, description, subtotal
             FROM order_items
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LineItem::from).collect())
    }

    /// Appends a line.
    ///
    /// A reused id fails with [`DbError::UniqueViolation`].
    pub async fn insert(&self, item: &LineItem) -> DbResult<()> {
        debug!(id = item.id, subtotal = item.subtotal, "Inserting order line");

        sqlx::query(
            "INSERT INTO order_items (id, description, subtotal, created_at)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(item.id)
        .bind(&item.description)
        .bind(item.subtotal)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, item.id.to_string()),
            other => other,
        })?;

        Ok(())
    }

    /// Removes the line with `id`.
    pub async fn remove(&self, id: i64) -> DbResult<()> {
        debug!(id, "Removing order line");

        let result = sqlx::query("DELETE FROM order_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Line item", id.to_string()));
        }

        Ok(())
    }

    /// Removes every line. Returns how many were removed.
    pub async fn clear(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM order_items")
            .execute(&self.pool)
            .await?;

        debug!(removed = result.rows_affected(), "Order cleared");
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
