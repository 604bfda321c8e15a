//! # Sale Repository
//!
//! Database operations for sale records.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. REGISTER                                                           │
//! │     └── insert() → Sale { downloaded: false }                          │
//! │         (exactly once per successful rights registration)              │
//! │                                                                         │
//! │  2. DOWNLOAD                                                           │
//! │     └── find_by_token() → validity checks in folio-sync                │
//! │     └── mark_downloaded() → downloaded: true (exactly once)            │
//! │                                                                         │
//! │  Sales are never deleted.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::debug;

use folio_core::{Money, Sale};

use crate::error::DbResult;

/// Repository for sale rows.
pub struct SaleRepository;

impl SaleRepository {
    /// Looks up a sale by its token.
    pub async fn find_by_token(
        conn: &mut SqliteConnection,
        token: &str,
    ) -> DbResult<Option<Sale>> {
        let row = sqlx::query(
            "SELECT token, customer, order_id, sku, format, currency, price_cents, \
                    quantity, downloaded, created_at \
             FROM sales WHERE token = ?1",
        )
        .bind(token)
        .fetch_optional(&mut *conn)
        .await?;

        row.as_ref().map(map_sale).transpose()
    }

    /// Inserts a new sale record.
    ///
    /// The token is the primary key; a collision surfaces as a unique
    /// violation rather than silently overwriting an earlier sale.
    pub async fn insert(conn: &mut SqliteConnection, sale: &Sale) -> DbResult<()> {
        debug!(token = %sale.token, order_id = %sale.order_id, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                token, customer, order_id, sku, format, currency,
                price_cents, quantity, downloaded, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&sale.token)
        .bind(&sale.customer)
        .bind(&sale.order_id)
        .bind(&sale.sku)
        .bind(&sale.format)
        .bind(&sale.currency)
        .bind(sale.price.cents())
        .bind(sale.quantity)
        .bind(sale.downloaded)
        .bind(sale.created_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Marks a sale as downloaded.
    pub async fn mark_downloaded(conn: &mut SqliteConnection, token: &str) -> DbResult<()> {
        sqlx::query("UPDATE sales SET downloaded = 1 WHERE token = ?1")
            .bind(token)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}

fn map_sale(row: &SqliteRow) -> DbResult<Sale> {
    Ok(Sale {
        token: row.try_get("token")?,
        customer: row.try_get("customer")?,
        order_id: row.try_get("order_id")?,
        sku: row.try_get("sku")?,
        format: row.try_get("format")?,
        currency: row.try_get("currency")?,
        price: Money::from_cents(row.try_get("price_cents")?),
        quantity: row.try_get("quantity")?,
        downloaded: row.try_get("downloaded")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
