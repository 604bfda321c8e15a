//! # folio-sync: Catalog Sync & Fulfillment Orchestration
//!
//! Orchestrates the Folio catalog against two remote services: the
//! commerce storefront (products, tags, categories) and the digital
//! rights service (sale simulation, registration, fulfillment).
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      folio-sync Architecture                            │
//! │                                                                         │
//! │  ┌──────────────────┐      ┌──────────────────────────────────────┐    │
//! │  │ SyncOrchestrator │─────►│ TagCategoryReconciler                │    │
//! │  │                  │      │   publishers → tags                  │    │
//! │  │  reconcile, then │      │   subject codes → categories         │    │
//! │  │  publish batch   │      └──────────────────────────────────────┘    │
//! │  │                  │      ┌──────────────────────────────────────┐    │
//! │  │                  │─────►│ CatalogPublisher                     │    │
//! │  └──────────────────┘      │   create / update / skip per item    │    │
//! │                            └──────────────────────────────────────┘    │
//! │  ┌──────────────────┐      ┌──────────────────────────────────────┐    │
//! │  │ SaleRegistrar    │─────►│ dyn RightsApi                        │    │
//! │  │  simulate (self- │      │   simulate, register, download,      │    │
//! │  │  healing), register      │   refresh metadata                  │    │
//! │  └──────────────────┘      └──────────────────────────────────────┘    │
//! │  ┌──────────────────┐                                                  │
//! │  │ DownloadAuthorizer│  one-time, time-limited fulfillment             │
//! │  └──────────────────┘                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Remote transports live behind the [`api::CommerceApi`] and
//! [`api::RightsApi`] traits; orchestration logic never touches a socket.
//! Each operation owns exactly one database transaction with a single
//! terminal outcome: commit on the success path, rollback on drop
//! otherwise.
//!
//! ## Modules
//!
//! - [`api`] - Remote service trait seams and adapter errors
//! - [`requests`] - Wire payloads for both services
//! - [`config`] - Sync settings (TOML-backed)
//! - [`reconciler`] - Publisher tag & subject category reconciliation
//! - [`publisher`] - Per-publication storefront publishing
//! - [`orchestrator`] - Full batch sync runs
//! - [`sales`] - Sale simulation (self-healing) and registration
//! - [`download`] - One-time download authorization
//! - [`error`] - Sync error taxonomy

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod config;
pub mod download;
pub mod error;
pub mod orchestrator;
pub mod publisher;
pub mod reconciler;
pub mod requests;
pub mod sales;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use api::{ApiError, ApiResult, CommerceApi, RemoteEntity, RightsApi, RightsResponse};
pub use config::SyncSettings;
pub use download::DownloadAuthorizer;
pub use error::{SyncError, SyncResult};
pub use orchestrator::{BatchOutcome, SyncOrchestrator};
pub use publisher::{CatalogPublisher, PublishAction};
pub use reconciler::{ReconcileReport, TagCategoryReconciler};
pub use sales::SaleRegistrar;
