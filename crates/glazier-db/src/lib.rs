//! # glazier-db: Database Layer for Glazier
//!
//! SQLite persistence for the quoting tool, using sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Glazier Data Flow                                │
//! │                                                                         │
//! │  glazier quote --add                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    glazier-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ Settings      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ Catalog       │    │ 0001_initial │  │   │
//! │  │   │               │    │ Order         │    │              │  │   │
//! │  │   │               │    │ Account       │    │              │  │   │
//! │  │   │               │    │ Profile       │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite file in the platform data dir (glazier.db)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use glazier_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("glazier.db")).await?;
//!
//! let settings = db.settings().load().await?;
//! let catalog = db.catalog().list().await?;
//! let items = db.order().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::account::{Account, AccountRepository};
pub use repository::catalog::CatalogRepository;
pub use repository::order::OrderRepository;
pub use repository::profile::ProfileRepository;
pub use repository::settings::SettingsRepository;
