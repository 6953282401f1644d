//! # glazier-core: Pure Quoting Logic for Glazier
//!
//! This crate is the heart of Glazier, a quoting tool for glass shops. It
//! holds the pricing and quotation engine as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Glazier Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    glazier CLI (apps/cli)                       │   │
//! │  │    catalog import ──► quote --add ──► order list ──► print      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ glazier-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │  totals   │  │   money   │  │ quotation │  │   │
//! │  │   │ItemPricer │  │Aggregator │  │ es-AR fmt │  │  render   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    glazier-db (Database Layer)                  │   │
//! │  │        settings, catalog snapshot, order items, accounts        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - Line item sell price ([`ItemPricer`], [`price_item`])
//! - [`totals`] - Cascading IVA / IIBB totals ([`OrderAggregator`], [`aggregate_order`])
//! - [`money`] - es-AR currency display ([`format_currency`])
//! - [`numeric`] - Rate coercion and price-list number parsing
//! - [`catalog`] - Price list lookup
//! - [`quotation`] - Plain-text quotation
//! - [`types`] - Domain types
//! - [`validation`] - Operator input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use glazier_core::{aggregate_order, format_currency, price_item};
//!
//! let plain = price_item("15000", 50.0, 30.0, 1.0, 1.0, 1, false);
//! let installed = price_item("15000", 50.0, 30.0, 1.0, 1.0, 1, true);
//!
//! let totals = aggregate_order(&[plain, installed], 21.0, 5.0);
//! assert_eq!(format_currency(totals.total), "$\u{a0}65.748,38");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod numeric;
pub mod pricing;
pub mod quotation;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{format_currency, Money};
pub use pricing::{price_item, ItemPricer, QuoteRequest};
pub use quotation::Quotation;
pub use totals::{aggregate_order, OrderAggregator, Priced};
pub use types::*;
