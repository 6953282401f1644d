//! # Seed Data Generator
//!
//! Loads a sample glass price list for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./glazier_dev.db
//! cargo run -p glazier-db --bin seed
//!
//! # Specify database path
//! cargo run -p glazier-db --bin seed -- --db ./data/glazier.db
//!
//! # Replace an existing catalog
//! cargo run -p glazier-db --bin seed -- --force
//! ```
//!
//! ## Generated Catalog
//! Every glass kind in [`KINDS`] crossed with its thicknesses. Cost prices
//! grow with thickness and are written the way a supplier list writes them
//! (`"$ 18.450,00"`), so the seed exercises the price parser.

use std::env;

use glazier_core::{format_currency, CatalogEntry};
use glazier_db::{Database, DbConfig};

/// Glass kinds with their base cost per m² at 3mm and the thicknesses sold.
const KINDS: &[(&str, f64, &[u32])] = &[
    ("Float Incoloro", 12_000.0, &[3, 4, 5, 6, 8, 10]),
    ("Float Bronce", 16_500.0, &[4, 5, 6]),
    ("Float Gris", 16_800.0, &[4, 5, 6]),
    ("Espejo Incoloro", 19_000.0, &[3, 4, 5]),
    ("Laminado 3+3", 38_000.0, &[6]),
    ("Laminado 4+4", 45_500.0, &[8]),
    ("Templado Incoloro", 52_000.0, &[6, 8, 10]),
    ("Fantasía Martelé", 14_200.0, &[4]),
];

/// Extra cost per mm above 3mm, as a fraction of the base.
const PER_MM_FACTOR: f64 = 0.18;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = "./glazier_dev.db".to_string();
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Glazier Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./glazier_dev.db)");
                println!("  -f, --force        Replace an existing catalog");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Glazier Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.catalog().count().await?;
    if existing > 0 && !force {
        println!("⚠ Database already has {} catalog entries", existing);
        println!("  Skipping seed. Pass --force to replace them.");
        return Ok(());
    }

    let entries = sample_catalog();
    db.catalog().replace_all(&entries).await?;

    println!();
    println!("✓ Loaded {} catalog entries", entries.len());

    let catalog = db.catalog().list().await?;
    for kind in catalog.kinds() {
        let count = catalog.iter().filter(|e| e.kind == kind).count();
        println!("  {:<20} {} thicknesses", kind, count);
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds the sample price list.
fn sample_catalog() -> Vec<CatalogEntry> {
    KINDS
        .iter()
        .flat_map(|(kind, base, thicknesses)| {
            thicknesses.iter().map(move |mm| {
                let cost = base * (1.0 + PER_MM_FACTOR * mm.saturating_sub(3) as f64);
                // Suppliers quote whole pesos
                let price = format_currency(cost.round()).replace('\u{a0}', " ");
                CatalogEntry::new(*kind, format!("{mm}mm"), price)
            })
        })
        .collect()
}
