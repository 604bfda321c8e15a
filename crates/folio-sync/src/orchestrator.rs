//! # Sync Orchestrator
//!
//! Drives a full catalog sync run: reconcile reference data first, then
//! publish every pending publication in one batch transaction.
//!
//! ## Run Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     SyncOrchestrator::run                           │
//! │                                                                     │
//! │  1. reconcile tags & categories (own transaction)                   │
//! │     └─ infrastructure failure here aborts the run                   │
//! │  2. begin batch transaction                                         │
//! │  3. load category index + pending publications                      │
//! │  4. for each publication: publish                                   │
//! │     └─ per-item failure is logged & counted, batch continues        │
//! │  5. commit - successful items stay published even when              │
//! │     neighbours failed                                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{error, info};

use folio_core::PriceConverter;
use folio_db::{CategoryRepository, Database, DbError, PublicationRepository};

use crate::api::CommerceApi;
use crate::error::{SyncError, SyncResult};
use crate::publisher::{CatalogPublisher, PublishAction};
use crate::reconciler::{ReconcileReport, TagCategoryReconciler};

/// Outcome of one batch sync run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// ISBNs published (created or updated) this run.
    pub published: Vec<String>,
    /// ISBNs already current, skipped without a remote call.
    pub skipped: Vec<String>,
    /// ISBNs that failed, with the error that stopped each one.
    pub failed: Vec<(String, SyncError)>,
    /// Reference-data reconciliation counts from the pre-pass.
    pub reconcile: ReconcileReport,
}

impl BatchOutcome {
    /// True when every pending publication was published or skipped.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.reconcile.failed == 0
    }
}

/// Orchestrates full catalog sync runs.
pub struct SyncOrchestrator {
    db: Database,
    reconciler: TagCategoryReconciler,
    publisher: CatalogPublisher,
}

impl SyncOrchestrator {
    pub fn new(db: Database, commerce: Arc<dyn CommerceApi>, converter: PriceConverter) -> Self {
        SyncOrchestrator {
            reconciler: TagCategoryReconciler::new(db.clone(), Arc::clone(&commerce)),
            publisher: CatalogPublisher::new(commerce, converter),
            db,
        }
    }

    /// Runs one full sync pass: reconcile, then publish all pending
    /// publications.
    pub async fn run(&self) -> SyncResult<BatchOutcome> {
        let reconcile = self.reconciler.run().await?;

        let mut tx = self.db.begin().await?;
        let category_index = CategoryRepository::index(&mut tx).await?;
        let pending = PublicationRepository::find_pending(&mut tx).await?;

        info!(pending = pending.len(), "starting publish batch");

        let mut outcome = BatchOutcome {
            reconcile,
            ..BatchOutcome::default()
        };

        for mut publication in pending {
            let isbn = publication.isbn.clone();
            match self
                .publisher
                .publish(&mut tx, &mut publication, &category_index)
                .await
            {
                Ok(PublishAction::Skipped) => outcome.skipped.push(isbn),
                Ok(_) => outcome.published.push(isbn),
                Err(err) => {
                    error!(isbn = %isbn, error = %err, "publication sync failed");
                    outcome.failed.push((isbn, err));
                }
            }
        }

        // Successful items commit even when neighbours failed.
        tx.commit().await.map_err(DbError::from)?;

        info!(
            published = outcome.published.len(),
            skipped = outcome.skipped.len(),
            failed = outcome.failed.len(),
            "publish batch complete"
        );
        Ok(outcome)
    }
}
