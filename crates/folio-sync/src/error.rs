//! # Sync Error Types
//!
//! Error taxonomy for catalog sync and fulfillment operations.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Lookup       │  │  Remote calls   │  │     Fulfillment         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  NotFound       │  │  RemoteRejected │  │  Expired                │ │
//! │  │  MissingCategory│  │  Transport      │  │  AlreadyDownloaded      │ │
//! │  │  MissingTag     │  │  Stale          │  │  InvalidDownloadUrl     │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                               │
//! │  │    Storage      │  │  Configuration  │                               │
//! │  │                 │  │                 │                               │
//! │  │  Database       │  │  InvalidConfig  │                               │
//! │  │  Validation     │  │  ConfigLoad/Save│                               │
//! │  └─────────────────┘  └─────────────────┘                               │
//! │                                                                         │
//! │  `Stale` is special: it is a self-heal trigger, not a terminal         │
//! │  failure. The sale simulation path catches it, refreshes the           │
//! │  publication and republishes instead of propagating.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Propagation Policy
//! Per-item errors in the batch sync loop are caught, counted and logged -
//! they never abort the batch. Everything else aborts its enclosing
//! transaction and propagates. Every failure is logged with the affected
//! entity before propagating.

use thiserror::Error;

use folio_core::ValidationError;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Sync error type covering all catalog sync and fulfillment failures.
///
/// ## Design Principles
/// - Each variant includes enough context to identify the affected entity
/// - Variants are machine-checkable; `user_message()` carries the
///   operator-facing text
/// - All errors are `Send + Sync` for async compatibility
#[derive(Debug, Error)]
pub enum SyncError {
    // =========================================================================
    // Lookup Errors
    // =========================================================================
    /// A referenced publication or sale does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A subject code has no reconciled remote category.
    #[error("no reconciled category for subject code {code}")]
    MissingCategory { code: String },

    /// A publisher has no remote tag yet.
    #[error("publisher {id} has no remote tag")]
    MissingTag { id: String },

    // =========================================================================
    // Remote Call Errors
    // =========================================================================
    /// The rights service reports the publication's metadata is out of
    /// date. Self-heal trigger, not fatal.
    #[error("rights service reports stale metadata for {isbn}")]
    Stale { isbn: String },

    /// A remote service returned an unexpected status.
    #[error("{service} rejected the request with status {status}: {message}")]
    RemoteRejected {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// The remote call itself errored.
    #[error("transport failure calling {service}: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    // =========================================================================
    // Fulfillment Errors
    // =========================================================================
    /// Sale token outside its validity window.
    #[error("download window expired for sale token {token}")]
    Expired { token: String },

    /// Sale token already exchanged for a download URL.
    #[error("sale token {token} was already used for a download")]
    AlreadyDownloaded { token: String },

    /// The rights service returned a malformed download location.
    #[error("invalid download URL: {0}")]
    InvalidDownloadUrl(String),

    // =========================================================================
    // Storage & Input Errors
    // =========================================================================
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Caller-supplied input failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid sync configuration.
    #[error("invalid sync configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<folio_db::DbError> for SyncError {
    fn from(err: folio_db::DbError) -> Self {
        SyncError::Database(err.to_string())
    }
}

impl From<url::ParseError> for SyncError {
    fn from(err: url::ParseError) -> Self {
        SyncError::InvalidDownloadUrl(err.to_string())
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SyncError {
    fn from(err: toml::ser::Error) -> Self {
        SyncError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SyncError {
    /// Returns true if this error means a referenced entity is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::NotFound { .. })
    }

    /// Returns true if a remote service actively rejected the request.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            SyncError::RemoteRejected { .. } | SyncError::Stale { .. }
        )
    }

    /// Returns true if the caller supplied bad input (not-found, expired
    /// or reused token, validation failure) as opposed to a system fault.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            SyncError::NotFound { .. }
                | SyncError::Expired { .. }
                | SyncError::AlreadyDownloaded { .. }
                | SyncError::Validation(_)
        )
    }

    /// Operator-facing message, localized the way the storefront presents
    /// failures to end customers.
    pub fn user_message(&self) -> &'static str {
        match self {
            SyncError::NotFound { entity, .. } if *entity == "sale" => {
                "No se pudo encontrar el registro de venta activo, \
                 por favor comuníquese con el Administrador."
            }
            SyncError::NotFound { .. } => {
                "No se pudo encontrar el producto ingresado, \
                 por favor comuníquese con el administrador."
            }
            SyncError::Expired { .. } | SyncError::AlreadyDownloaded { .. } => {
                "Tiempo expirado de descarga."
            }
            SyncError::RemoteRejected { service, .. } if *service == crate::api::RIGHTS_SERVICE => {
                "No se puede registrar la venta, \
                 por favor comuníquese con la Administración."
            }
            _ => "Ocurrió un error inesperado, por favor comuníquese con el Administrador.",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RIGHTS_SERVICE;

    #[test]
    fn test_categorization() {
        let err = SyncError::NotFound {
            entity: "publication",
            id: "42".into(),
        };
        assert!(err.is_not_found());
        assert!(err.is_caller_error());
        assert!(!err.is_rejection());

        let err = SyncError::RemoteRejected {
            service: RIGHTS_SERVICE,
            status: 500,
            message: "boom".into(),
        };
        assert!(err.is_rejection());
        assert!(!err.is_caller_error());

        assert!(SyncError::Stale { isbn: "978".into() }.is_rejection());
    }

    #[test]
    fn test_display_includes_entity() {
        let err = SyncError::NotFound {
            entity: "sale",
            id: "token-1".into(),
        };
        assert_eq!(err.to_string(), "sale not found: token-1");
    }

    #[test]
    fn test_user_messages_distinguish_sale_and_product() {
        let sale = SyncError::NotFound {
            entity: "sale",
            id: "t".into(),
        };
        let product = SyncError::NotFound {
            entity: "publication",
            id: "42".into(),
        };
        assert!(sale.user_message().contains("registro de venta"));
        assert!(product.user_message().contains("producto"));
    }
}
