//! # Error Types
//!
//! Domain-specific error types for glazier-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  glazier-core errors (this file)                                       │
//! │  ├── CoreError        - Quoting failures (bad price, missing entry)    │
//! │  └── ValidationError  - Operator input failures                        │
//! │                                                                         │
//! │  glazier-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT An Error
//! Unparseable rate parameters (margin, installation, IVA, IIBB) never
//! surface here. They coerce to zero, see [`crate::types::Percent::parse`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core quoting errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog cost price does not reduce to a number.
    ///
    /// ## When This Occurs
    /// - Price list cell is empty
    /// - Price list cell holds text ("consultar", "N/A")
    ///
    /// The lossy pricing path turns this into `NaN` instead; see
    /// [`crate::pricing::price_item`].
    #[error("Invalid cost price: '{raw}'")]
    InvalidCostPrice { raw: String },

    /// A width, height or quantity input does not parse.
    #[error("Invalid {field}: '{raw}'")]
    InvalidDimension { field: String, raw: String },

    /// No catalog entry matches the requested kind and thickness.
    #[error("No catalog entry for {kind} ({thickness})")]
    CatalogEntryNotFound { kind: String, thickness: String },

    /// No line item with this id in the order.
    #[error("Line item not found: {0}")]
    LineItemNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used by the application shell to gate calculations before they run.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email, unsupported image type).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
