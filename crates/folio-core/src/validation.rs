//! # Validation Module
//!
//! Input validation for caller-supplied request fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE - field-level checks on inbound requests         │
//! │           (orders, download requests) before business logic runs       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (sale tokens, ISBNs)                           │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: both layers catch different errors                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length accepted for free-form identifier fields
/// (customers, order ids, usernames).
const MAX_FIELD_LEN: usize = 128;

/// Validates that a required identifier field is present and reasonably
/// sized.
///
/// ## Example
/// ```rust
/// use folio_core::validation::require_field;
///
/// assert!(require_field("customer", "buyer@example.com").is_ok());
/// assert!(require_field("customer", "  ").is_err());
/// ```
pub fn require_field(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_FIELD_LEN,
        });
    }

    Ok(())
}
