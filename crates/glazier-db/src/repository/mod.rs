//! # Repository Module
//!
//! Database repository implementations for Glazier.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  db.order().insert(&item)                                       │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── list(&self)                                                       │
//! │  ├── insert(&self, item)                                               │
//! │  ├── remove(&self, id)                                                 │
//! │  └── clear(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SettingsRepository`](settings::SettingsRepository) - Shop settings and raw keys
//! - [`CatalogRepository`](catalog::CatalogRepository) - Imported price list
//! - [`OrderRepository`](order::OrderRepository) - Lines of the current order
//! - [`AccountRepository`](account::AccountRepository) - Shop accounts
//! - [`ProfileRepository`](profile::ProfileRepository) - Per-account settings

pub mod account;
pub mod catalog;
pub mod order;
pub mod profile;
pub mod settings;
