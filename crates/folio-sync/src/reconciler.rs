//! # Tag & Category Reconciler
//!
//! Ensures every pending publisher has a storefront tag and every subject
//! code referenced by a pending publication has a storefront category,
//! before any product is published.
//!
//! ## Reconcile Pass
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  TagCategoryReconciler::run                         │
//! │                                                                     │
//! │  publishers WHERE tag_id IS NULL ──► create_tag ──► persist         │
//! │  subject codes of pending pubs                                      │
//! │    minus already-reconciled     ──► create_category ──► persist     │
//! │                                                                     │
//! │  Per-entity isolation: one remote failure is logged and counted,    │
//! │  the pass continues. Successes are persisted as they happen and     │
//! │  the transaction commits unconditionally - partial progress is      │
//! │  kept, never rolled back.                                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{error, info};

use folio_db::{CategoryRepository, Database, PublicationRepository, PublisherRepository};

use crate::api::CommerceApi;
use crate::error::SyncResult;
use crate::requests::{CreateCategoryRequest, CreateTagRequest};

/// Outcome counts of one reconcile pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub tags_created: usize,
    pub categories_created: usize,
    pub failed: usize,
}

/// Reconciles publisher tags and subject-code categories with the
/// storefront.
pub struct TagCategoryReconciler {
    db: Database,
    commerce: Arc<dyn CommerceApi>,
}

impl TagCategoryReconciler {
    pub fn new(db: Database, commerce: Arc<dyn CommerceApi>) -> Self {
        TagCategoryReconciler { db, commerce }
    }

    /// Runs one reconcile pass in its own transaction.
    pub async fn run(&self) -> SyncResult<ReconcileReport> {
        let mut tx = self.db.begin().await?;
        let mut report = ReconcileReport::default();

        let publishers = PublisherRepository::find_pending(&mut tx).await?;
        for mut publisher in publishers {
            let request = CreateTagRequest {
                name: publisher.name.clone(),
            };
            match self.commerce.create_tag(&request).await {
                Ok(remote) => {
                    publisher.tag_id = Some(remote.id);
                    PublisherRepository::persist(&mut tx, &publisher).await?;
                    info!(publisher = %publisher.id, tag_id = remote.id, "created publisher tag");
                    report.tags_created += 1;
                }
                Err(err) => {
                    error!(publisher = %publisher.id, error = %err, "tag creation failed");
                    report.failed += 1;
                }
            }
        }

        let codes = PublicationRepository::pending_subject_codes(&mut tx).await?;
        let categories = CategoryRepository::find_pending(&mut tx, &codes).await?;
        for mut category in categories {
            let request = CreateCategoryRequest {
                name: category.description.clone(),
            };
            match self.commerce.create_category(&request).await {
                Ok(remote) => {
                    category.category_id = Some(remote.id);
                    CategoryRepository::persist(&mut tx, &category).await?;
                    info!(code = %category.code, category_id = remote.id, "created category");
                    report.categories_created += 1;
                }
                Err(err) => {
                    error!(code = %category.code, error = %err, "category creation failed");
                    report.failed += 1;
                }
            }
        }

        // Partial progress is durable even when some creations failed.
        tx.commit().await.map_err(folio_db::DbError::from)?;

        info!(
            tags = report.tags_created,
            categories = report.categories_created,
            failed = report.failed,
            "reconcile pass complete"
        );
        Ok(report)
    }
}
