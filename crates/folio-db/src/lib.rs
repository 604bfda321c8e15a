//! # folio-db: Database Layer for Folio
//!
//! This crate provides database access for the Folio catalog store.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Folio Data Flow                                │
//! │                                                                         │
//! │  folio-sync operation (synchronize, register_sale, ...)                │
//! │       │                                                                 │
//! │       │  db.begin() ──► one transaction per logical operation          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     folio-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ Publication   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ Publisher     │    │ 001_initial_ │  │   │
//! │  │   │ Transactions  │    │ Category      │    │ schema.sql   │  │   │
//! │  │   │               │    │ Sale          │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (WAL mode)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transaction Model
//!
//! Repository methods take `&mut SqliteConnection` so the **caller** owns
//! the transaction scope. `Database::begin()` hands out an RAII
//! [`sqlx::Transaction`]: dropping it rolls back, `commit()` is the single
//! terminal outcome. There is no path where a transaction both rolls back
//! and commits.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_db::{Database, DbConfig};
//! use folio_db::repository::publication::PublicationRepository;
//!
//! let db = Database::new(DbConfig::in_memory()).await?;
//! let mut tx = db.begin().await?;
//! let pending = PublicationRepository::find_pending(&mut tx).await?;
//! tx.commit().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, DbTransaction};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::publication::PublicationRepository;
pub use repository::publisher::PublisherRepository;
pub use repository::sale::SaleRepository;
