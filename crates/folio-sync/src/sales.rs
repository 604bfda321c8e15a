//! # Sale Registrar
//!
//! Simulates and registers sales against the digital rights service.
//!
//! ## Self-Healing Simulation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  SaleRegistrar::simulate_sale                       │
//! │                                                                     │
//! │  rights dry-run ──► 200 ─────────────────────► ok = true            │
//! │                │                                                    │
//! │                └──► 400 (stale metadata)                            │
//! │                       │ refresh rights metadata for the ISBN        │
//! │                       │ refetch the publication                     │
//! │                       │ republish to the storefront (same tx)       │
//! │                       └──────────────────────► ok = false +         │
//! │                                                "datos actualizados" │
//! │                                                                     │
//! │  Any other status propagates; the transaction rolls back.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sales are recorded with the price and currency *as listed* - settlement
//! conversion only affects the storefront display, never the sale record.

use std::sync::Arc;

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::{info, warn};

use folio_core::{sale_token, PriceConverter, Publication, Sale};
use folio_db::{CategoryRepository, Database, DbError, PublicationRepository, SaleRepository};

use crate::api::{CommerceApi, RightsApi, RIGHTS_SERVICE};
use crate::config::SyncSettings;
use crate::error::{SyncError, SyncResult};
use crate::publisher::CatalogPublisher;
use crate::requests::{Order, SaleRequest, SimulateOutcome, SimulateSaleQuery};

/// Message returned when a simulation triggered a metadata refresh.
const REFRESHED_MESSAGE: &str = "Los datos del producto fueron actualizados.";

/// Registers and simulates sales with the rights service.
pub struct SaleRegistrar {
    db: Database,
    rights: Arc<dyn RightsApi>,
    publisher: CatalogPublisher,
    converter: PriceConverter,
    settings: SyncSettings,
}

impl SaleRegistrar {
    pub fn new(
        db: Database,
        rights: Arc<dyn RightsApi>,
        commerce: Arc<dyn CommerceApi>,
        settings: SyncSettings,
    ) -> Self {
        SaleRegistrar {
            db,
            rights,
            publisher: CatalogPublisher::new(commerce, settings.converter()),
            converter: settings.converter(),
            settings,
        }
    }

    /// Dry-runs a sale for the publication behind a storefront product id.
    ///
    /// A rights rejection for stale metadata is healed in place: the
    /// rights-side metadata is refreshed, the publication refetched and
    /// republished, and the caller is told to retry.
    pub async fn simulate_sale(&self, product_id: i64) -> SyncResult<SimulateOutcome> {
        let mut tx = self.db.begin().await?;
        let publication = self.find_publication(&mut tx, product_id).await?;
        let query = self.simulate_query(&publication);

        match self.rights_check(&query).await {
            Ok(message) => {
                tx.commit().await.map_err(DbError::from)?;
                Ok(SimulateOutcome {
                    ok: true,
                    message,
                    product_id,
                    price: self.converter.convert(&publication.price).to_price_string(),
                })
            }
            Err(SyncError::Stale { isbn }) => {
                warn!(isbn = %isbn, "rights metadata stale, refreshing and republishing");
                let refresh = self.rights.refresh_metadata(&isbn).await?;
                if !refresh.is_success() {
                    return Err(SyncError::RemoteRejected {
                        service: RIGHTS_SERVICE,
                        status: refresh.status,
                        message: refresh.body,
                    });
                }

                // The refresh may have produced a new price version; the
                // publish rules decide between republish and no-op.
                let mut publication = self.find_publication(&mut tx, product_id).await?;
                let category_index = CategoryRepository::index(&mut tx).await?;
                self.publisher
                    .publish(&mut tx, &mut publication, &category_index)
                    .await?;
                tx.commit().await.map_err(DbError::from)?;

                Ok(SimulateOutcome {
                    ok: false,
                    message: REFRESHED_MESSAGE.to_string(),
                    product_id,
                    price: self.converter.convert(&publication.price).to_price_string(),
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Registers a committed sale, returning the fulfillment token.
    pub async fn register_sale(&self, order: &Order) -> SyncResult<String> {
        folio_core::validation::require_field("order_id", &order.order_id)?;
        folio_core::validation::require_field("username", &order.username)?;

        let mut tx = self.db.begin().await?;
        let publication = self.find_publication(&mut tx, order.product_id).await?;

        let request = SaleRequest {
            cost: publication.price.amount.cents(),
            country: publication.price.country.clone(),
            format: publication.format.clone(),
            customer_id: order.username.clone(),
            price_type: publication.price.price_type.clone(),
            protection: publication.protection.clone(),
            currency: publication.price.currency.clone(),
            sale_state: self.settings.sale_state.clone(),
            transaction_id: order.order_id.clone(),
        };

        let response = self.rights.register_sale(&publication.isbn, &request).await?;
        if response.status != 201 {
            return Err(SyncError::RemoteRejected {
                service: RIGHTS_SERVICE,
                status: response.status,
                message: response.body,
            });
        }

        // The token only exists for accepted sales.
        let token = sale_token();
        let sale = Sale {
            token: token.clone(),
            customer: order.username.clone(),
            order_id: order.order_id.clone(),
            sku: publication.isbn.clone(),
            format: publication.format.clone(),
            currency: publication.price.currency.clone(),
            price: publication.price.amount,
            quantity: 1,
            downloaded: false,
            created_at: Utc::now(),
        };
        SaleRepository::insert(&mut tx, &sale).await?;
        tx.commit().await.map_err(DbError::from)?;

        info!(
            token = %token,
            isbn = %publication.isbn,
            customer = %order.username,
            "registered sale"
        );
        Ok(token)
    }

    async fn find_publication(
        &self,
        conn: &mut SqliteConnection,
        product_id: i64,
    ) -> SyncResult<Publication> {
        PublicationRepository::find_by_remote_product_id(conn, product_id)
            .await?
            .ok_or_else(|| SyncError::NotFound {
                entity: "publication",
                id: product_id.to_string(),
            })
    }

    fn simulate_query(&self, publication: &Publication) -> SimulateSaleQuery {
        SimulateSaleQuery {
            isbn: publication.isbn.clone(),
            format: publication.format.clone(),
            cost: publication.price.amount.cents(),
            protection: publication.protection.clone(),
            country: publication.price.country.clone(),
            currency: publication.price.currency.clone(),
            price_type: publication.price.price_type.clone(),
        }
    }

    /// Maps the rights dry-run statuses onto the simulation outcome:
    /// 200 passes, 400 means stale metadata, anything else is a rejection.
    async fn rights_check(&self, query: &SimulateSaleQuery) -> SyncResult<String> {
        let response = self.rights.simulate_sale(query).await?;
        match response.status {
            200 => Ok(response.body),
            400 => Err(SyncError::Stale {
                isbn: query.isbn.clone(),
            }),
            status => Err(SyncError::RemoteRejected {
                service: RIGHTS_SERVICE,
                status,
                message: response.body,
            }),
        }
    }
}
