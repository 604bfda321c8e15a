//! # Remote Service Contracts
//!
//! Trait seams for the two remote services the sync layer talks to:
//! the commerce storefront (products, tags, categories) and the digital
//! rights service (sale simulation, sale registration, fulfillment).
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Remote Service Seams                         │
//! │                                                                 │
//! │   orchestration code ──► dyn CommerceApi ──► storefront HTTP    │
//! │                     └──► dyn RightsApi   ──► rights HTTP        │
//! │                                                                 │
//! │   Tests substitute in-process fakes behind the same traits.     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transports live behind these traits so orchestration logic stays
//! testable without a network. Every method returns `ApiResult` - a
//! transport error or a decoded response; HTTP-status business decisions
//! (stale metadata, rejection) are made by the callers, which know the
//! operation's semantics.

use async_trait::async_trait;
use thiserror::Error;

use crate::requests::{
    CreateCategoryRequest, CreateProductRequest, CreateTagRequest, DownloadQuery, SaleRequest,
    SimulateSaleQuery, UpdateProductRequest,
};

/// Service label used in errors and log fields for the storefront.
pub const COMMERCE_SERVICE: &str = "commerce";

/// Service label used in errors and log fields for the rights service.
pub const RIGHTS_SERVICE: &str = "rights";

/// Result type alias for remote service calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors produced by remote service adapters.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success status the adapter could
    /// not map to a typed response.
    #[error("{service} returned status {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// The request never produced a response (connection refused, DNS,
    /// timeout, TLS).
    #[error("transport failure calling {service}: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },
}

impl From<ApiError> for crate::error::SyncError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status {
                service,
                status,
                body,
            } => crate::error::SyncError::RemoteRejected {
                service,
                status,
                message: body,
            },
            ApiError::Transport { service, message } => {
                crate::error::SyncError::Transport { service, message }
            }
        }
    }
}

/// A remote entity reference returned by the storefront on creation.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RemoteEntity {
    pub id: i64,
}

/// Raw response from the rights service. Status drives the business
/// decision; the body is a message or a download location depending on
/// the operation.
#[derive(Debug, Clone)]
pub struct RightsResponse {
    pub status: u16,
    pub body: String,
}

impl RightsResponse {
    /// Returns true for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// =============================================================================
// Commerce Storefront
// =============================================================================

/// Operations against the commerce storefront catalog.
#[async_trait]
pub trait CommerceApi: Send + Sync {
    /// Create a product, returning its remote id.
    async fn create_product(&self, request: &CreateProductRequest) -> ApiResult<RemoteEntity>;

    /// Update an existing product in place.
    async fn update_product(&self, product_id: i64, request: &UpdateProductRequest)
        -> ApiResult<()>;

    /// Create a publisher tag, returning its remote id.
    async fn create_tag(&self, request: &CreateTagRequest) -> ApiResult<RemoteEntity>;

    /// Create a subject category, returning its remote id.
    async fn create_category(&self, request: &CreateCategoryRequest) -> ApiResult<RemoteEntity>;
}

// =============================================================================
// Digital Rights Service
// =============================================================================

/// Operations against the digital rights / fulfillment service.
#[async_trait]
pub trait RightsApi: Send + Sync {
    /// Dry-run a sale to verify the rights holder would accept it.
    async fn simulate_sale(&self, query: &SimulateSaleQuery) -> ApiResult<RightsResponse>;

    /// Register a committed sale for one ISBN with the rights holder.
    async fn register_sale(&self, isbn: &str, request: &SaleRequest) -> ApiResult<RightsResponse>;

    /// Exchange a registered sale for a time-limited download location.
    async fn download_url(&self, query: &DownloadQuery) -> ApiResult<RightsResponse>;

    /// Ask the rights service to refresh its cached metadata for one ISBN.
    async fn refresh_metadata(&self, isbn: &str) -> ApiResult<RightsResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rights_response_success_range() {
        let ok = RightsResponse {
            status: 201,
            body: String::new(),
        };
        let bad = RightsResponse {
            status: 400,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!bad.is_success());
    }

    #[test]
    fn test_api_error_maps_to_sync_error() {
        let err = ApiError::Status {
            service: COMMERCE_SERVICE,
            status: 422,
            body: "bad sku".into(),
        };
        match crate::error::SyncError::from(err) {
            crate::error::SyncError::RemoteRejected {
                service, status, ..
            } => {
                assert_eq!(service, COMMERCE_SERVICE);
                assert_eq!(status, 422);
            }
            other => panic!("unexpected conversion: {other:?}"),
        }
    }
}
