//! # Application Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Glazier                                │
//! │                                                                         │
//! │  glazier quote --kind ... --width 0                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  AppResult<T>                                                    │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation?  ─── ValidationError::MustBePositive ──┐            │  │
//! │  │  Pricing?     ─── CoreError::InvalidCostPrice ──────┤            │  │
//! │  │  Database?    ─── DbError::NotFound ────────────────┼─► AppError │  │
//! │  │  Import?      ─── ImportError::MissingColumns ──────┘            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  main.rs prints "[VALIDATION_ERROR] width must be positive"            │
//! │  and exits with status 1                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::import::ImportError;
use glazier_core::{CoreError, ValidationError};
use glazier_db::DbError;

/// Result alias for command functions.
pub type AppResult<T> = Result<T, AppError>;

/// Error returned from CLI commands.
///
/// ## Serialization
/// With `--json` output the error is printed as:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Line item not found: 1718900000000"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for CLI failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Pricing could not be computed
    PricingError,

    /// Price list could not be imported
    ImportError,

    /// Configuration could not be loaded
    ConfigError,

    /// Login required or credentials rejected
    AuthError,

    /// File system error
    IoError,

    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Code as printed, e.g. `NOT_FOUND`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::PricingError => "PRICING_ERROR",
            ErrorCode::ImportError => "IMPORT_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::AuthError => "AUTH_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl AppError {
    /// Creates a new application error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::AuthError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to application errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => AppError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                AppError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::PasswordHash(e) => {
                tracing::error!("Password hashing failed: {}", e);
                AppError::internal("Could not process password")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to application errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCostPrice { .. } => {
                AppError::new(ErrorCode::PricingError, err.to_string())
            }
            CoreError::InvalidDimension { .. } => AppError::validation(err.to_string()),
            CoreError::CatalogEntryNotFound { kind, thickness } => {
                AppError::not_found("Catalog entry", &format!("{} ({})", kind, thickness))
            }
            CoreError::LineItemNotFound(id) => AppError::not_found("Line item", &id.to_string()),
            CoreError::Validation(e) => AppError::from(e),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Io(e) => AppError::from(e),
            other => AppError::new(ErrorCode::ImportError, other.to_string()),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_screaming_code() {
        let err = AppError::not_found("Line item", "42");
        assert_eq!(err.to_string(), "[NOT_FOUND] Line item not found: 42");
    }

    #[test]
    fn test_code_serializes_like_display() {
        let err = AppError::validation("width must be positive");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "width must be positive");
    }

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = AppError::from(CoreError::InvalidCostPrice { raw: "abc".into() });
        assert_eq!(err.code, ErrorCode::PricingError);

        let err = AppError::from(CoreError::CatalogEntryNotFound {
            kind: "Float Incoloro".into(),
            thickness: "7mm".into(),
        });
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("Float Incoloro (7mm)"));

        let err = AppError::from(CoreError::from(ValidationError::MustBePositive {
            field: "width".into(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "width must be positive");
    }

    #[test]
    fn test_db_errors_hide_details() {
        let err = AppError::from(DbError::QueryFailed("syntax error near FROM".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("syntax"));

        let err = AppError::from(DbError::duplicate("email", "a@b.com"));
        assert_eq!(err.message, "email 'a@b.com' already exists");
    }
}
