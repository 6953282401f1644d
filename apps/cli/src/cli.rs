//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "glazier", version, about = "Glass shop quoting tool")]
pub struct Cli {
    /// Configuration file path (defaults to ./glazier.toml when present)
    #[arg(short, long, global = true, env = "GLAZIER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage the glass price list
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },

    /// Shop name, logo and rates
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },

    /// Price a piece of glass, optionally adding it to the order
    Quote(QuoteArgs),

    /// Inspect or edit the current order
    Order {
        #[command(subcommand)]
        action: OrderCommands,
    },

    /// Render the quotation for the current order
    Print {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Shop account and settings backup
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CatalogCommands {
    /// Replace the price list with a CSV file (tipo, espesor, precio_m2)
    Import {
        /// CSV file to load
        file: PathBuf,
    },

    /// Write an example price list
    Template {
        /// Destination (defaults to ./plantilla_precios.csv)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show the loaded price list
    List,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommands {
    /// Show current settings
    Show,

    /// Change one setting
    Set {
        /// Setting to change
        key: SettingKey,

        /// New value
        value: String,
    },

    /// Set the shop logo from a PNG or JPEG file
    Logo {
        /// Image file
        image: PathBuf,
    },

    /// Restore default settings
    Reset,
}

/// Settings editable with `settings set`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    ShopName,
    Margin,
    Installation,
    Vat,
    GrossReceipts,
    BackgroundColor,
}

#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    /// Glass kind, as listed in the catalog
    #[arg(short, long)]
    pub kind: String,

    /// Thickness, as listed in the catalog (e.g. 4mm)
    #[arg(short, long)]
    pub thickness: String,

    /// Width in meters
    #[arg(short, long, allow_hyphen_values = true)]
    pub width: String,

    /// Height in meters
    #[arg(short = 'H', long, allow_hyphen_values = true)]
    pub height: String,

    /// Number of pieces
    #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
    pub quantity: String,

    /// Include installation
    #[arg(short, long)]
    pub install: bool,

    /// Add the quote to the current order
    #[arg(short, long)]
    pub add: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum OrderCommands {
    /// List lines and totals
    List,

    /// Remove a line by id
    Remove {
        /// Line id, as shown by `order list`
        id: i64,
    },

    /// Remove every line
    Clear,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AccountCommands {
    /// Create an account and log in
    Register {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        business_name: String,
    },

    /// Log in
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Log out
    Logout,

    /// Save local settings to the account
    Push,

    /// Replace local settings with the account's
    Pull,

    /// Show who is logged in
    Status,
}
