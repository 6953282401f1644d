//! # Order State
//!
//! The order being quoted: an ordered list of priced line items.
//!
//! ## Order Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Operations                                     │
//! │                                                                         │
//! │  Command                  Order Method            State Change          │
//! │  ───────                  ────────────            ────────────          │
//! │                                                                         │
//! │  quote --add ────────────► add(request) ────────► items.push(item)      │
//! │                                                                         │
//! │  order remove <id> ──────► remove(id) ──────────► items.retain(...)     │
//! │                                                                         │
//! │  order clear ────────────► clear() ─────────────► items.clear()         │
//! │                                                                         │
//! │  order list / print ─────► totals(aggregator) ──► (read only)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Line Ids
//! Ids are creation timestamps in milliseconds. Two lines added within the
//! same millisecond (or after a clock step back) get `last + 1`, so ids stay
//! unique and strictly increasing within an order.

use chrono::Utc;
use serde::Serialize;

use glazier_core::{CoreError, CoreResult, LineItem, OrderAggregator, OrderTotals, QuoteRequest};

/// The current order.
///
/// ## Invariants
/// - Line ids are unique and strictly increasing in insertion order
/// - Lines are immutable once added; only removal is supported
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Order {
    items: Vec<LineItem>,
}

impl Order {
    /// Creates an empty order.
    pub fn new() -> Self {
        Order { items: Vec::new() }
    }

    /// Rebuilds an order from stored lines, keeping them in id order.
    pub fn from_items(mut items: Vec<LineItem>) -> Self {
        items.sort_by_key(|item| item.id);
        Order { items }
    }

    /// Prices `request` and appends it as a new line.
    ///
    /// Nothing is appended when pricing fails.
    pub fn add(&mut self, request: QuoteRequest) -> CoreResult<&LineItem> {
        let id = self.next_id(Utc::now().timestamp_millis());
        let item = request.into_line_item(id)?;
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Removes the line with `id`.
    pub fn remove(&mut self, id: i64) -> CoreResult<LineItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(CoreError::LineItemNotFound(id))?;
        Ok(self.items.remove(index))
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the order is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Totals under the given rates.
    pub fn totals(&self, aggregator: &OrderAggregator) -> OrderTotals {
        aggregator.aggregate(&self.items)
    }

    /// Id for a line created at `now_ms`.
    fn next_id(&self, now_ms: i64) -> i64 {
        match self.items.last() {
            Some(last) if now_ms <= last.id => last.id + 1,
            _ => now_ms,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
