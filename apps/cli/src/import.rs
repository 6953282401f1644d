//! # Price List Import
//!
//! Loads a supplier price list from CSV into catalog entries.
//!
//! ## Expected Format
//! ```text
//! tipo;espesor;precio_m2
//! Float Incoloro;4mm;15000
//! Float Bronce;5mm;$ 21.300,00
//! ```
//!
//! - Delimiter `;` or `,`, detected from the header line
//! - Header names are lowercased, trimmed and stripped of a UTF-8 BOM, so
//!   spreadsheet exports (`"\u{feff}Tipo"`) load unchanged
//! - Extra columns are ignored; blank lines are skipped
//! - Prices are kept as written and parsed when a quote is computed

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use glazier_core::CatalogEntry;

/// Columns every price list must have.
pub const REQUIRED_COLUMNS: [&str; 3] = ["tipo", "espesor", "precio_m2"];

/// File name offered for the downloadable template.
pub const TEMPLATE_FILE_NAME: &str = "plantilla_precios.csv";

/// Template contents: BOM, header and one example row.
pub const TEMPLATE_CSV: &str = "\u{feff}tipo;espesor;precio_m2\nFloat Incoloro;4mm;15000\n";

const BOM: char = '\u{feff}';

/// Errors while importing a price list.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Only `.csv` files are accepted.
    #[error("Only .csv files are accepted: {path}")]
    NotCsv { path: String },

    /// The header lacks one or more required columns.
    #[error("Price list is missing columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// The file is empty.
    #[error("Price list is empty")]
    Empty,

    /// Malformed CSV.
    #[error("Invalid CSV at line {line}: {message}")]
    Csv { line: u64, message: String },

    /// Reading the file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        ImportError::Csv {
            line,
            message: err.to_string(),
        }
    }
}

/// Loads a price list file.
pub fn load_price_list_file(path: &Path) -> Result<Vec<CatalogEntry>, ImportError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(ImportError::NotCsv {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path)?;
    let entries = load_price_list(BufReader::new(file))?;

    info!(path = %path.display(), entries = entries.len(), "Price list loaded");
    Ok(entries)
}

/// Loads a price list from any reader.
pub fn load_price_list<R: Read>(reader: R) -> Result<Vec<CatalogEntry>, ImportError> {
    let mut reader = BufReader::new(reader);

    let mut header_line = String::new();
    if reader.read_line(&mut header_line)? == 0 {
        return Err(ImportError::Empty);
    }
    let delimiter = detect_delimiter(&header_line);
    debug!(delimiter = %char::from(delimiter), "Detected delimiter");

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(header_line.as_bytes().chain(reader));

    let mut records = csv_reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(ImportError::Empty),
    };
    let header: Vec<String> = header.iter().map(normalize_header).collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !header.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns { missing });
    }

    let column = |name: &str| header.iter().position(|h| h == name).unwrap_or(0);
    let (kind_col, thickness_col, price_col) =
        (column("tipo"), column("espesor"), column("precio_m2"));

    let mut entries = Vec::new();
    for record in records {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let field = |index: usize| record.get(index).unwrap_or("").to_string();
        entries.push(CatalogEntry::new(
            field(kind_col),
            field(thickness_col),
            field(price_col),
        ));
    }

    Ok(entries)
}

/// `;` when the header line has one, `,` otherwise.
fn detect_delimiter(header_line: &str) -> u8 {
    if header_line.contains(';') {
        b';'
    } else {
        b','
    }
}

fn normalize_header(header: &str) -> String {
    header.to_lowercase().trim().trim_start_matches(BOM).to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_semicolon_list() {
        let csv_data = "tipo;espesor;precio_m2\n\
                        Float Incoloro;4mm;15000\n\
                        Float Bronce;5mm;$ 21.300,00\n";
        let entries = load_price_list(csv_data.as_bytes()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], CatalogEntry::new("Float Incoloro", "4mm", "15000"));
        assert_eq!(entries[1].unit_cost_price, "$ 21.300,00");
    }

    #[test]
    fn test_template_loads() {
        let entries = load_price_list(TEMPLATE_CSV.as_bytes()).unwrap();
        assert_eq!(entries, vec![CatalogEntry::new("Float Incoloro", "4mm", "15000")]);
    }

    #[test]
    fn test_headers_normalized() {
        let csv_data = "\u{feff}Tipo , ESPESOR,Precio_M2,notas\n\
                        Espejo,3mm,19000,pedido\n\
                        \n";
        let entries = load_price_list(csv_data.as_bytes()).unwrap();
        assert_eq!(entries, vec![CatalogEntry::new("Espejo", "3mm", "19000")]);
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let csv_data = "precio_m2;tipo;espesor\n15000;Float Incoloro;4mm\n";
        let entries = load_price_list(csv_data.as_bytes()).unwrap();
        assert_eq!(entries[0], CatalogEntry::new("Float Incoloro", "4mm", "15000"));
    }

    #[test]
    fn test_missing_columns_named() {
        let csv_data = "tipo;precio\nFloat;100\n";
        let err = load_price_list(csv_data.as_bytes()).unwrap_err();
        match &err {
            ImportError::MissingColumns { missing } => {
                assert_eq!(missing, &vec!["espesor".to_string(), "precio_m2".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.to_string(), "Price list is missing columns: espesor, precio_m2");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(load_price_list("".as_bytes()), Err(ImportError::Empty)));
    }

    #[test]
    fn test_short_rows_fill_blank() {
        let csv_data = "tipo;espesor;precio_m2\nFloat Incoloro;4mm\n";
        let entries = load_price_list(csv_data.as_bytes()).unwrap();
        assert_eq!(entries[0].unit_cost_price, "");
    }

    #[test]
    fn test_rejects_non_csv_extension() {
        let err = load_price_list_file(Path::new("precios.xlsx")).unwrap_err();
        assert!(matches!(err, ImportError::NotCsv { .. }));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("tipo;espesor;precio_m2\n"), b';');
        assert_eq!(detect_delimiter("tipo,espesor,precio_m2\n"), b',');
    }
}
