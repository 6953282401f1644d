//! # Catalog
//!
//! The imported price list, kept in file order.
//!
//! `(kind, thickness)` pairs are expected to be unique. When a price list
//! repeats a pair, lookups return the first row.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::CatalogEntry;

/// An ordered price list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Wraps entries, preserving their order.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Catalog { entries }
    }

    /// First entry matching `kind` and `thickness`.
    ///
    /// ## Example
    /// ```rust
    /// use glazier_core::catalog::Catalog;
    /// use glazier_core::types::CatalogEntry;
    ///
    /// let catalog = Catalog::new(vec![
    ///     CatalogEntry::new("Float Incoloro", "4mm", "15000"),
    ///     CatalogEntry::new("Float Incoloro", "5mm", "18500"),
    /// ]);
    ///
    /// let entry = catalog.find("Float Incoloro", "5mm").unwrap();
    /// assert_eq!(entry.unit_cost_price, "18500");
    /// assert!(catalog.find("Float Incoloro", "6mm").is_err());
    /// ```
    pub fn find(&self, kind: &str, thickness: &str) -> CoreResult<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.kind == kind && e.thickness == thickness)
            .ok_or_else(|| CoreError::CatalogEntryNotFound {
                kind: kind.to_string(),
                thickness: thickness.to_string(),
            })
    }

    /// Distinct glass kinds, in first-seen order.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !kinds.contains(&entry.kind.as_str()) {
                kinds.push(&entry.kind);
            }
        }
        kinds
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Borrows the entries as a slice.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

impl From<Vec<CatalogEntry>> for Catalog {
    fn from(entries: Vec<CatalogEntry>) -> Self {
        Catalog::new(entries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![
            CatalogEntry::new("Float Incoloro", "4mm", "15000"),
            CatalogEntry::new("Laminado 3+3", "6mm", "$ 40.000"),
            CatalogEntry::new("Float Incoloro", "4mm", "99999"),
        ])
    }

    #[test]
    fn test_find_returns_first_match() {
        let catalog = sample();
        assert_eq!(catalog.find("Float Incoloro", "4mm").unwrap().unit_cost_price, "15000");
    }

    #[test]
    fn test_find_missing_entry() {
        let err = sample().find("Espejo", "4mm").unwrap_err();
        assert!(matches!(err, CoreError::CatalogEntryNotFound { ref kind, .. } if kind == "Espejo"));
    }

    #[test]
    fn test_kinds_are_distinct_and_ordered() {
        assert_eq!(sample().kinds(), vec!["Float Incoloro", "Laminado 3+3"]);
        assert!(Catalog::default().is_empty());
        assert_eq!(sample().len(), 3);
    }
}
