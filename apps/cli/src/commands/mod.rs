//! # Commands Module
//!
//! One module per top-level subcommand.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (dispatch)
//! ├── catalog.rs   ◄─── Price list import, template, listing
//! ├── settings.rs  ◄─── Shop name, logo, rates
//! ├── quote.rs     ◄─── Pricing a piece of glass
//! ├── order.rs     ◄─── Order lines and totals
//! ├── print.rs     ◄─── Quotation rendering
//! └── account.rs   ◄─── Login and settings backup
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  glazier order list --json                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  execute(Commands::Order { .. }, &mut session, &config, output)         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  order::list(&session, output) -> AppResult<String>                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  run() prints the returned text to stdout                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands return their output instead of printing it, so they can be
//! exercised from tests against an in-memory session.

pub mod account;
pub mod catalog;
pub mod order;
pub mod print;
pub mod quote;
pub mod settings;

use serde::Serialize;

use crate::cli::{AccountCommands, CatalogCommands, Commands, OrderCommands, SettingsCommands};
use crate::error::AppResult;
use crate::state::{AppConfig, Session};

/// How a command renders its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl Output {
    /// JSON when `json` is set.
    pub fn from_flag(json: bool) -> Self {
        if json {
            Output::Json
        } else {
            Output::Text
        }
    }

    /// Renders `value` as JSON, or `text()` in text mode.
    pub fn render<T: Serialize>(
        self,
        value: &T,
        text: impl FnOnce() -> String,
    ) -> AppResult<String> {
        match self {
            Output::Json => Ok(serde_json::to_string_pretty(value)?),
            Output::Text => Ok(text()),
        }
    }
}

/// Runs one command against the session.
pub async fn execute(
    command: Commands,
    session: &mut Session,
    config: &AppConfig,
    output: Output,
) -> AppResult<String> {
    match command {
        Commands::Catalog { action } => match action {
            CatalogCommands::Import { file } => catalog::import(session, &file, output).await,
            CatalogCommands::Template { out } => catalog::template(out.as_deref()),
            CatalogCommands::List => catalog::list(session, output),
        },
        Commands::Settings { action } => match action {
            SettingsCommands::Show => settings::show(session, output),
            SettingsCommands::Set { key, value } => settings::set(session, key, &value).await,
            SettingsCommands::Logo { image } => settings::logo(session, &image).await,
            SettingsCommands::Reset => settings::reset(session).await,
        },
        Commands::Quote(args) => quote::quote(session, &args, output).await,
        Commands::Order { action } => match action {
            OrderCommands::List => order::list(session, output),
            OrderCommands::Remove { id } => order::remove(session, id).await,
            OrderCommands::Clear => order::clear(session).await,
        },
        Commands::Print { out } => print::print(session, config, out.as_deref()),
        Commands::Account { action } => match action {
            AccountCommands::Register {
                email,
                password,
                business_name,
            } => account::register(session, &email, &password, &business_name).await,
            AccountCommands::Login { email, password } => {
                account::login(session, &email, &password).await
            }
            AccountCommands::Logout => account::logout(session).await,
            AccountCommands::Push => account::push(session).await,
            AccountCommands::Pull => account::pull(session).await,
            AccountCommands::Status => account::status(session, output).await,
        },
    }
}
