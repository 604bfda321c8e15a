//! # Publisher Repository
//!
//! Database operations for publisher reference data.
//!
//! A publisher is "pending" while it has no remote tag identifier. The
//! reconciler persists each obtained tag id immediately, so ids survive a
//! sibling's failed creation in the same pass.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::debug;

use folio_core::Publisher;

use crate::error::DbResult;

/// Repository for publisher rows.
pub struct PublisherRepository;

impl PublisherRepository {
    /// Fetches publishers that still need a remote tag created.
    pub async fn find_pending(conn: &mut SqliteConnection) -> DbResult<Vec<Publisher>> {
        let rows = sqlx::query(
            "SELECT id, name, tag_id FROM publishers WHERE tag_id IS NULL ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;

        debug!(count = rows.len(), "Fetched publishers pending tag creation");

        rows.iter().map(map_publisher).collect()
    }

    /// Looks up a publisher by its internal identifier.
    pub async fn get(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Publisher>> {
        let row = sqlx::query("SELECT id, name, tag_id FROM publishers WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        row.as_ref().map(map_publisher).transpose()
    }

    /// Upserts a publisher.
    pub async fn persist(conn: &mut SqliteConnection, publisher: &Publisher) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO publishers (id, name, tag_id) VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                tag_id = excluded.tag_id
            "#,
        )
        .bind(&publisher.id)
        .bind(&publisher.name)
        .bind(publisher.tag_id)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}

fn map_publisher(row: &SqliteRow) -> DbResult<Publisher> {
    Ok(Publisher {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        tag_id: row.try_get("tag_id")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
