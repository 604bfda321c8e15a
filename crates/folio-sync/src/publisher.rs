//! # Catalog Publisher
//!
//! Publishes one publication at a time to the commerce storefront:
//! creates the product on first contact, updates it afterwards, and
//! records migration state locally.
//!
//! ## Publish Decision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    CatalogPublisher::publish                        │
//! │                                                                     │
//! │  price.migrated?                                                    │
//! │    yes, updated ──────────────────────────────► Skipped             │
//! │    yes, not updated ──► PUT product ──────────► Updated             │
//! │    no ──► POST product ──► record remote id ──► Created             │
//! │                            record rate (non-settlement)             │
//! │                            updated = price.is_unreviewed()          │
//! │                                                                     │
//! │  Creation is guarded by `migrated`, never by the remote id:         │
//! │  a price version is created remotely at most once.                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::SqliteConnection;
use tracing::{info, warn};

use folio_core::{PriceConverter, Publication};
use folio_db::PublicationRepository;
use folio_db::PublisherRepository;

use crate::api::CommerceApi;
use crate::error::{SyncError, SyncResult};
use crate::requests::{CreateProductRequest, ItemRef, UpdateProductRequest};

/// What a publish call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAction {
    /// Product was created remotely; remote id recorded.
    Created,
    /// Product existed; presentation fields were pushed.
    Updated,
    /// Already migrated and up to date; no remote call made.
    Skipped,
}

/// Publishes publications to the commerce storefront.
pub struct CatalogPublisher {
    commerce: Arc<dyn CommerceApi>,
    converter: PriceConverter,
}

impl CatalogPublisher {
    pub fn new(commerce: Arc<dyn CommerceApi>, converter: PriceConverter) -> Self {
        CatalogPublisher { commerce, converter }
    }

    /// Publishes one publication, mutating it in place and persisting the
    /// result on the caller's connection. The caller owns the transaction.
    pub async fn publish(
        &self,
        conn: &mut SqliteConnection,
        publication: &mut Publication,
        category_index: &HashMap<String, i64>,
    ) -> SyncResult<PublishAction> {
        if publication.price.migrated {
            info!(isbn = %publication.isbn, "price already migrated, skipping");
            return Ok(PublishAction::Skipped);
        }

        let categories = self.resolve_categories(publication, category_index)?;
        let tags = self.resolve_tag(conn, publication).await?;
        let price = self.converter.convert(&publication.price).to_price_string();

        let action = match publication.remote_product_id {
            Some(remote_id) => {
                self.update(remote_id, publication, price, categories, tags)
                    .await?
            }
            None => self.create(publication, price, categories, tags).await?,
        };

        PublicationRepository::persist(conn, publication).await?;
        Ok(action)
    }

    async fn create(
        &self,
        publication: &mut Publication,
        price: String,
        categories: Vec<ItemRef>,
        tags: Vec<ItemRef>,
    ) -> SyncResult<PublishAction> {
        let request = CreateProductRequest::from_publication(publication, price, categories, tags);
        let remote = self.commerce.create_product(&request).await?;

        publication.remote_product_id = Some(remote.id);
        publication.price.migrated = true;
        // A reviewed price needs a manual follow-up pass before the
        // listing counts as current.
        publication.updated = publication.price.is_unreviewed();
        if !self.converter.is_settlement(&publication.price.currency) {
            publication.exchange_rate = Some(self.converter.exchange_rate());
        }

        info!(
            isbn = %publication.isbn,
            remote_product_id = remote.id,
            updated = publication.updated,
            "created storefront product"
        );
        Ok(PublishAction::Created)
    }

    async fn update(
        &self,
        remote_id: i64,
        publication: &mut Publication,
        price: String,
        categories: Vec<ItemRef>,
        tags: Vec<ItemRef>,
    ) -> SyncResult<PublishAction> {
        let request = UpdateProductRequest::from_publication(publication, price, categories, tags);
        self.commerce.update_product(remote_id, &request).await?;

        // This price version is now reflected remotely; without the flag
        // the row would re-enter the update path on every run.
        publication.price.migrated = true;
        publication.updated = true;
        info!(
            isbn = %publication.isbn,
            remote_product_id = remote_id,
            "updated storefront product"
        );
        Ok(PublishAction::Updated)
    }

    /// Every distinct subject code must already be reconciled to a remote
    /// category; a missing one fails this publication only.
    fn resolve_categories(
        &self,
        publication: &Publication,
        category_index: &HashMap<String, i64>,
    ) -> SyncResult<Vec<ItemRef>> {
        let mut refs = Vec::new();
        for code in publication.subject_code_list() {
            match category_index.get(code) {
                Some(id) => refs.push(ItemRef { id: *id }),
                None => {
                    warn!(isbn = %publication.isbn, code, "subject code has no remote category");
                    return Err(SyncError::MissingCategory {
                        code: code.to_string(),
                    });
                }
            }
        }
        Ok(refs)
    }

    async fn resolve_tag(
        &self,
        conn: &mut SqliteConnection,
        publication: &Publication,
    ) -> SyncResult<Vec<ItemRef>> {
        let publisher = PublisherRepository::get(conn, &publication.publisher_id)
            .await?
            .ok_or_else(|| SyncError::NotFound {
                entity: "publisher",
                id: publication.publisher_id.clone(),
            })?;

        match publisher.tag_id {
            Some(id) => Ok(vec![ItemRef { id }]),
            None => Err(SyncError::MissingTag {
                id: publisher.id.clone(),
            }),
        }
    }
}
