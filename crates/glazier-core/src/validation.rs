//! # Validation Module
//!
//! Input validation for the application shell.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing (clap)                                  │
//! │  └── Types: f64, i64, file paths                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Dimensions must be positive, quantity at least 1                  │
//! │  └── Account and shop fields, logo image type                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── UNIQUE email, foreign keys                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing arithmetic itself never validates: zero or negative sizes
//! flow through unchanged. Gating happens here, before a quote is requested.
//!
//! ## Usage
//! ```rust
//! use glazier_core::validation::{validate_dimension, validate_quantity};
//!
//! validate_dimension("width", 1.2).unwrap();
//! validate_quantity(2).unwrap();
//! assert!(validate_dimension("height", 0.0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::Dimensions;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum password length for shop accounts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Image types accepted as shop logo.
pub const LOGO_MIME_TYPES: [&str; 2] = ["image/png", "image/jpeg"];

// =============================================================================
// Quote Input Validators
// =============================================================================

/// Validates a width or height in meters.
///
/// ## Rules
/// - Must be a finite number greater than zero
pub fn validate_dimension(field: &str, meters: f64) -> ValidationResult<()> {
    if !meters.is_finite() || meters <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a piece count.
///
/// ## Example
/// ```rust
/// use glazier_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates all three dimension fields at once.
pub fn validate_dimensions(dimensions: &Dimensions) -> ValidationResult<()> {
    validate_dimension("width", dimensions.width_m)?;
    validate_dimension("height", dimensions.height_m)?;
    validate_quantity(dimensions.quantity)
}

// =============================================================================
// Shop Validators
// =============================================================================

/// Validates a shop name.
///
/// ## Rules
/// - Must not be blank
/// - At most 120 characters
pub fn validate_shop_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "shop name".to_string(),
        });
    }

    if name.chars().count() > 120 {
        return Err(ValidationError::TooLong {
            field: "shop name".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates a `#rrggbb` color.
///
/// ## Example
/// ```rust
/// use glazier_core::validation::validate_hex_color;
///
/// assert!(validate_hex_color("#f1f5f9").is_ok());
/// assert!(validate_hex_color("slate").is_err());
/// ```
pub fn validate_hex_color(color: &str) -> ValidationResult<()> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "background color".to_string(),
            reason: "expected #rrggbb".to_string(),
        });
    }

    Ok(())
}

/// Maps a logo file extension to its MIME type.
///
/// ## Rules
/// - Only PNG and JPEG images are accepted
///
/// ## Example
/// ```rust
/// use glazier_core::validation::logo_mime_for_extension;
///
/// assert_eq!(logo_mime_for_extension("PNG").unwrap(), "image/png");
/// assert_eq!(logo_mime_for_extension("jpg").unwrap(), "image/jpeg");
/// assert!(logo_mime_for_extension("gif").is_err());
/// ```
pub fn logo_mime_for_extension(extension: &str) -> ValidationResult<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Ok(LOGO_MIME_TYPES[0]),
        "jpg" | "jpeg" => Ok(LOGO_MIME_TYPES[1]),
        _ => Err(ValidationError::InvalidFormat {
            field: "logo".to_string(),
            reason: "must be a PNG or JPEG image".to_string(),
        }),
    }
}

// =============================================================================
// Account Validators
// =============================================================================

/// Validates an account email.
///
/// ## Rules
/// - Must not be blank
/// - Must have a non-empty local part and a dotted domain
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain.com".to_string(),
        });
    }

    Ok(())
}

/// Validates a new account password.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
