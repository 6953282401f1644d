//! # State Module
//!
//! State a command runs against.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐        ┌──────────────────────────────────────┐  │
//! │  │    AppConfig     │        │              Session                 │  │
//! │  │                  │        │                                      │  │
//! │  │  database_path   │        │  Database    (SQLite pool)           │  │
//! │  │  log_filter      │        │  ShopSettings (rates as text)        │  │
//! │  │  validity_days   │        │  Catalog     (price list)            │  │
//! │  └──────────────────┘        │  Order       (line items)            │  │
//! │   read once at startup       └──────────────────────────────────────┘  │
//! │                               loaded per command, written through      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod order;
mod session;

pub use self::config::{AppConfig, DEFAULT_CONFIG_FILE, DEFAULT_LOG_FILTER, ENV_PREFIX};
pub use order::Order;
pub use session::Session;
