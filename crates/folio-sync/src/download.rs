//! # Download Authorizer
//!
//! Exchanges a sale token for a one-time, time-limited download URL.
//!
//! ## Authorization Gates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   DownloadAuthorizer::download                      │
//! │                                                                     │
//! │  blank token or username? ──yes──► Validation                       │
//! │  token known? ──no──► NotFound                                      │
//! │  already downloaded? ──yes──► AlreadyDownloaded                     │
//! │  now > created_at + window? ──yes──► Expired                        │
//! │  rights issues URL? ──no──► RemoteRejected                          │
//! │       │                                                             │
//! │       └──► mark downloaded, commit, return validated URL            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The window check runs before the remote call, so an expired token
//! never reaches the rights service. Marking `downloaded` commits in the
//! same transaction that issued the URL - a token fulfills exactly once.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use url::Url;

use folio_db::{Database, DbError, SaleRepository};

use crate::api::{RightsApi, RIGHTS_SERVICE};
use crate::config::SyncSettings;
use crate::error::{SyncError, SyncResult};
use crate::requests::DownloadQuery;

/// Authorizes one-time downloads for registered sales.
pub struct DownloadAuthorizer {
    db: Database,
    rights: Arc<dyn RightsApi>,
    settings: SyncSettings,
}

impl DownloadAuthorizer {
    pub fn new(db: Database, rights: Arc<dyn RightsApi>, settings: SyncSettings) -> Self {
        DownloadAuthorizer {
            db,
            rights,
            settings,
        }
    }

    /// Exchanges a sale token for its download URL.
    pub async fn download(&self, token: &str, username: &str) -> SyncResult<Url> {
        folio_core::validation::require_field("token", token)?;
        folio_core::validation::require_field("username", username)?;

        let mut tx = self.db.begin().await?;

        let sale = SaleRepository::find_by_token(&mut tx, token)
            .await?
            .ok_or_else(|| SyncError::NotFound {
                entity: "sale",
                id: token.to_string(),
            })?;

        if sale.downloaded {
            warn!(token = %token, "download token already used");
            return Err(SyncError::AlreadyDownloaded {
                token: token.to_string(),
            });
        }

        let deadline = sale.created_at + self.settings.download_window();
        if Utc::now() > deadline {
            warn!(token = %token, created_at = %sale.created_at, "download window expired");
            return Err(SyncError::Expired {
                token: token.to_string(),
            });
        }

        let query = DownloadQuery {
            customer: sale.customer.clone(),
            order_id: sale.order_id.clone(),
            sku: sale.sku.clone(),
            format: sale.format.clone(),
            username: username.to_string(),
        };
        let response = self.rights.download_url(&query).await?;
        if response.status != 200 {
            return Err(SyncError::RemoteRejected {
                service: RIGHTS_SERVICE,
                status: response.status,
                message: response.body,
            });
        }

        let url = Url::parse(response.body.trim())?;
        SaleRepository::mark_downloaded(&mut tx, token).await?;
        tx.commit().await.map_err(DbError::from)?;

        info!(token = %token, isbn = %sale.sku, "issued download URL");
        Ok(url)
    }
}
