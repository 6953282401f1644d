//! # Glazier CLI Library
//!
//! Command-line shell around the quoting engine: parses arguments, loads
//! configuration and the quoting session, runs one command and prints its
//! output.
//!
//! ## Module Organization
//! ```text
//! glazier_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap command definitions
//! ├── import.rs       ◄─── CSV price list loader
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (glazier.toml + GLAZIER_*)
//! │   ├── order.rs    ◄─── Order being quoted
//! │   └── session.rs  ◄─── Settings + catalog + order, backed by SQLite
//! ├── commands/       ◄─── One module per subcommand
//! └── error.rs        ◄─── AppError returned by commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod import;
pub mod state;

use std::path::PathBuf;

use clap::Parser;
use directories::ProjectDirs;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use commands::Output;
use error::{AppError, AppResult};
use glazier_db::{Database, DbConfig};
use state::{AppConfig, Session};

/// Database file name inside the data directory.
pub const DATABASE_FILE_NAME: &str = "glazier.db";

/// Parses the command line and runs the command.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Command Startup                                   │
/// │                                                                         │
/// │  1. Parse arguments (clap)                                              │
/// │                                                                         │
/// │  2. Load AppConfig ───────────────────────────────────────────────────► │
/// │     • defaults → glazier.toml (or --config) → GLAZIER_* env             │
/// │                                                                         │
/// │  3. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG, else log_filter from config; stderr only                │
/// │                                                                         │
/// │  4. Determine Database Path ──────────────────────────────────────────► │
/// │     • database_path from config, else the platform data dir             │
/// │     • Linux: ~/.local/share/glazier/glazier.db                          │
/// │                                                                         │
/// │  5. Connect, migrate, load Session ───────────────────────────────────► │
/// │                                                                         │
/// │  6. Run the command; print its output to stdout                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let output = Output::from_flag(cli.json);

    let config = AppConfig::load(cli.config.as_deref())?;
    init_tracing(&config.log_filter);
    debug!(?config, "Configuration loaded");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let text = runtime.block_on(async {
        let db_path = database_path(&config)?;
        debug!(db_path = %db_path.display(), "Database path determined");

        let db = Database::new(DbConfig::new(db_path)).await?;
        let mut session = Session::load(db.clone()).await?;

        let result = commands::execute(cli.command, &mut session, &config, output).await;
        db.close().await;
        result
    });

    match text {
        Ok(text) => {
            if !text.is_empty() {
                println!("{}", text);
            }
            Ok(())
        }
        Err(err) => {
            if output == Output::Json {
                if let Ok(json) = serde_json::to_string_pretty(&err) {
                    println!("{}", json);
                }
            }
            Err(err)
        }
    }
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over `filter`. Output goes to stderr so quotations on
/// stdout can be redirected cleanly.
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(state::DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Resolves the database file.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.glazier.glazier/glazier.db`
/// - **Windows**: `%APPDATA%\glazier\glazier\data\glazier.db`
/// - **Linux**: `~/.local/share/glazier/glazier.db`
///
/// `database_path` in the config (or `GLAZIER_DATABASE_PATH`) overrides it.
fn database_path(config: &AppConfig) -> AppResult<PathBuf> {
    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "glazier", "glazier")
        .ok_or_else(|| AppError::internal("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;
    info!(data_dir = %data_dir.display(), "Using platform data directory");

    Ok(data_dir.join(DATABASE_FILE_NAME))
}
