//! # Repository Module
//!
//! Database repository implementations for the Folio catalog store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern isolates SQL behind a typed API.               │
//! │                                                                         │
//! │  folio-sync operation                                                  │
//! │       │                                                                 │
//! │       │  let mut tx = db.begin().await?;                               │
//! │       │  PublicationRepository::find_pending(&mut tx).await?           │
//! │       ▼                                                                 │
//! │  Repository (associated functions)                                     │
//! │  ├── find_pending(conn)                                                │
//! │  ├── find_by_remote_product_id(conn, id)                               │
//! │  └── persist(conn, &publication)                                       │
//! │       │                                                                 │
//! │       │  SQL + row mapping                                              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Every method takes `&mut SqliteConnection`: the CALLER owns the       │
//! │  transaction, so a batch of repository calls shares one atomic scope   │
//! │  and there is exactly one commit-or-rollback decision per operation.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`publication::PublicationRepository`] - pending sync queries, remote-id lookup
//! - [`publisher::PublisherRepository`] - tag reconciliation state
//! - [`category::CategoryRepository`] - subject-code reconciliation and index
//! - [`sale::SaleRepository`] - sale records and download state

pub mod category;
pub mod publication;
pub mod publisher;
pub mod sale;
