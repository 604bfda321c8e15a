//! # Publication Repository
//!
//! Database operations for publications and their owned price/media.
//!
//! ## Pending Synchronization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 What "pending synchronization" means                    │
//! │                                                                         │
//! │  price_migrated = 0  → price version never reflected in a remote       │
//! │                        product creation                                │
//! │  updated = 0         → remote representation behind local state        │
//! │                                                                         │
//! │  find_pending() returns the union of both; the publisher decides       │
//! │  create vs update vs skip per item.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::debug;

use folio_core::{Media, Money, Price, Publication};

use crate::error::DbResult;

/// Repository for publication rows.
///
/// Stateless: all methods are associated functions taking the caller's
/// connection, so they participate in whatever transaction is open.
pub struct PublicationRepository;

const SELECT_COLUMNS: &str = "\
    id, isbn, title, author, description, subject_codes, format, protection, \
    remote_product_id, updated, exchange_rate, \
    price_amount_cents, price_currency, price_country, price_type, price_role, price_migrated, \
    media_path, publisher_id";

impl PublicationRepository {
    /// Fetches all publications pending synchronization.
    pub async fn find_pending(conn: &mut SqliteConnection) -> DbResult<Vec<Publication>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM publications \
             WHERE price_migrated = 0 OR updated = 0 \
             ORDER BY id"
        );
        let rows = sqlx::query(&sql).fetch_all(&mut *conn).await?;

        debug!(count = rows.len(), "Fetched pending publications");

        rows.iter().map(map_publication).collect()
    }

    /// Looks up a publication by its remote product identifier.
    pub async fn find_by_remote_product_id(
        conn: &mut SqliteConnection,
        remote_id: i64,
    ) -> DbResult<Option<Publication>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM publications WHERE remote_product_id = ?1"
        );
        let row = sqlx::query(&sql)
            .bind(remote_id)
            .fetch_optional(&mut *conn)
            .await?;

        row.as_ref().map(map_publication).transpose()
    }

    /// Returns the distinct subject codes referenced by pending
    /// publications, split out of their pipe-delimited lists.
    pub async fn pending_subject_codes(conn: &mut SqliteConnection) -> DbResult<Vec<String>> {
        let rows = sqlx::query(
            "SELECT subject_codes FROM publications \
             WHERE price_migrated = 0 OR updated = 0",
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut codes: Vec<String> = Vec::new();
        for row in rows {
            let raw: String = row.try_get("subject_codes")?;
            for code in raw.split('|') {
                let code = code.trim();
                if !code.is_empty() && !codes.iter().any(|c| c == code) {
                    codes.push(code.to_string());
                }
            }
        }

        Ok(codes)
    }

    /// Upserts a publication together with its owned price and media.
    pub async fn persist(conn: &mut SqliteConnection, publication: &Publication) -> DbResult<()> {
        debug!(id = %publication.id, isbn = %publication.isbn, "Persisting publication");

        sqlx::query(
            r#"
            INSERT INTO publications (
                id, isbn, title, author, description, subject_codes, format, protection,
                remote_product_id, updated, exchange_rate,
                price_amount_cents, price_currency, price_country, price_type, price_role, price_migrated,
                media_path, publisher_id
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8,
                ?9, ?10, ?11,
                ?12, ?13, ?14, ?15, ?16, ?17,
                ?18, ?19
            )
            ON CONFLICT(id) DO UPDATE SET
                isbn = excluded.isbn,
                title = excluded.title,
                author = excluded.author,
                description = excluded.description,
                subject_codes = excluded.subject_codes,
                format = excluded.format,
                protection = excluded.protection,
                remote_product_id = excluded.remote_product_id,
                updated = excluded.updated,
                exchange_rate = excluded.exchange_rate,
                price_amount_cents = excluded.price_amount_cents,
                price_currency = excluded.price_currency,
                price_country = excluded.price_country,
                price_type = excluded.price_type,
                price_role = excluded.price_role,
                price_migrated = excluded.price_migrated,
                media_path = excluded.media_path,
                publisher_id = excluded.publisher_id
            "#,
        )
        .bind(&publication.id)
        .bind(&publication.isbn)
        .bind(&publication.title)
        .bind(&publication.author)
        .bind(&publication.description)
        .bind(&publication.subject_codes)
        .bind(&publication.format)
        .bind(&publication.protection)
        .bind(publication.remote_product_id)
        .bind(publication.updated)
        .bind(publication.exchange_rate)
        .bind(publication.price.amount.cents())
        .bind(&publication.price.currency)
        .bind(&publication.price.country)
        .bind(&publication.price.price_type)
        .bind(publication.price.role)
        .bind(publication.price.migrated)
        .bind(&publication.media.path)
        .bind(&publication.publisher_id)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}

/// Maps a database row into a [`Publication`] with its owned price and media.
fn map_publication(row: &SqliteRow) -> DbResult<Publication> {
    Ok(Publication {
        id: row.try_get("id")?,
        isbn: row.try_get("isbn")?,
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        description: row.try_get("description")?,
        subject_codes: row.try_get("subject_codes")?,
        format: row.try_get("format")?,
        protection: row.try_get("protection")?,
        remote_product_id: row.try_get("remote_product_id")?,
        updated: row.try_get("updated")?,
        exchange_rate: row.try_get("exchange_rate")?,
        price: Price {
            amount: Money::from_cents(row.try_get("price_amount_cents")?),
            currency: row.try_get("price_currency")?,
            country: row.try_get("price_country")?,
            price_type: row.try_get("price_type")?,
            role: row.try_get("price_role")?,
            migrated: row.try_get("price_migrated")?,
        },
        media: Media {
            path: row.try_get("media_path")?,
        },
        publisher_id: row.try_get("publisher_id")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::publisher::PublisherRepository;
    use folio_core::Publisher;

    fn sample_publication(id: &str, isbn: &str) -> Publication {
        Publication {
            id: id.to_string(),
            isbn: isbn.to_string(),
            title: "The Silent Library".to_string(),
            author: "A. Archivist".to_string(),
            description: "A story about shelves.".to_string(),
            subject_codes: "FBA|FYB".to_string(),
            format: "EPUB".to_string(),
            protection: "ACS4".to_string(),
            remote_product_id: None,
            updated: false,
            exchange_rate: None,
            price: Price {
                amount: Money::from_cents(10000),
                currency: "USD".to_string(),
                country: "BO".to_string(),
                price_type: "02".to_string(),
                role: None,
                migrated: false,
            },
            media: Media {
                path: "https://covers.example/silent.jpg".to_string(),
            },
            publisher_id: "publisher-1".to_string(),
        }
    }

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut tx = db.begin().await.unwrap();
        PublisherRepository::persist(
            &mut tx,
            &Publisher {
                id: "publisher-1".to_string(),
                name: "Acme Press".to_string(),
                tag_id: None,
            },
        )
        .await
        .unwrap();
        tx.commit().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_persist_and_find_pending() {
        let db = seeded_db().await;
        let mut tx = db.begin().await.unwrap();

        PublicationRepository::persist(&mut tx, &sample_publication("pub-1", "9780000000001"))
            .await
            .unwrap();
        PublicationRepository::persist(&mut tx, &sample_publication("pub-2", "9780000000002"))
            .await
            .unwrap();

        let pending = PublicationRepository::find_pending(&mut tx).await.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].price.amount.cents(), 10000);
        assert!(!pending[0].price.migrated);
    }

    #[tokio::test]
    async fn test_fully_synchronized_not_pending() {
        let db = seeded_db().await;
        let mut tx = db.begin().await.unwrap();

        let mut publication = sample_publication("pub-1", "9780000000001");
        publication.price.migrated = true;
        publication.updated = true;
        publication.remote_product_id = Some(42);
        PublicationRepository::persist(&mut tx, &publication)
            .await
            .unwrap();

        let pending = PublicationRepository::find_pending(&mut tx).await.unwrap();
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_remote_product_id() {
        let db = seeded_db().await;
        let mut tx = db.begin().await.unwrap();

        let mut publication = sample_publication("pub-1", "9780000000001");
        publication.remote_product_id = Some(42);
        publication.price.migrated = true;
        PublicationRepository::persist(&mut tx, &publication)
            .await
            .unwrap();

        let found = PublicationRepository::find_by_remote_product_id(&mut tx, 42)
            .await
            .unwrap()
            .expect("publication exists");
        assert_eq!(found.id, "pub-1");
        assert_eq!(found.exchange_rate, None);

        let missing = PublicationRepository::find_by_remote_product_id(&mut tx, 999)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_pending_subject_codes_distinct() {
        let db = seeded_db().await;
        let mut tx = db.begin().await.unwrap();

        let mut first = sample_publication("pub-1", "9780000000001");
        first.subject_codes = "FBA|FYB".to_string();
        let mut second = sample_publication("pub-2", "9780000000002");
        second.subject_codes = "FYB|FJH".to_string();

        PublicationRepository::persist(&mut tx, &first).await.unwrap();
        PublicationRepository::persist(&mut tx, &second).await.unwrap();

        let codes = PublicationRepository::pending_subject_codes(&mut tx)
            .await
            .unwrap();
        assert_eq!(codes, vec!["FBA", "FYB", "FJH"]);
    }

    #[tokio::test]
    async fn test_upsert_overwrites() {
        let db = seeded_db().await;
        let mut tx = db.begin().await.unwrap();

        let mut publication = sample_publication("pub-1", "9780000000001");
        PublicationRepository::persist(&mut tx, &publication)
            .await
            .unwrap();

        publication.remote_product_id = Some(7);
        publication.price.migrated = true;
        publication.exchange_rate = Some(6.96);
        PublicationRepository::persist(&mut tx, &publication)
            .await
            .unwrap();

        let found = PublicationRepository::find_by_remote_product_id(&mut tx, 7)
            .await
            .unwrap()
            .expect("publication exists");
        assert!(found.price.migrated);
        assert_eq!(found.exchange_rate, Some(6.96));
    }
}
