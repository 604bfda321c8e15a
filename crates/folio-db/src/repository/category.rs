//! # Category Repository
//!
//! Database operations for subject-code categories.
//!
//! Categories are shared reference data: one row per distinct subject
//! classification code. The reconciler creates the remote counterpart for
//! every pending code, and the publisher resolves codes through the
//! [`CategoryRepository::index`] map when building product payloads.

use std::collections::HashMap;

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};
use tracing::debug;

use folio_core::Category;

use crate::error::DbResult;

/// Repository for category rows.
pub struct CategoryRepository;

impl CategoryRepository {
    /// Fetches categories among the given subject codes that still need a
    /// remote category created.
    pub async fn find_pending(
        conn: &mut SqliteConnection,
        codes: &[String],
    ) -> DbResult<Vec<Category>> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT code, description, category_id FROM categories \
             WHERE category_id IS NULL AND code IN (",
        );
        let mut separated = builder.separated(", ");
        for code in codes {
            separated.push_bind(code);
        }
        separated.push_unseparated(") ORDER BY code");

        let rows = builder.build().fetch_all(&mut *conn).await?;

        debug!(count = rows.len(), "Fetched categories pending creation");

        rows.iter().map(map_category).collect()
    }

    /// Upserts a category.
    pub async fn persist(conn: &mut SqliteConnection, category: &Category) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (code, description, category_id) VALUES (?1, ?2, ?3)
            ON CONFLICT(code) DO UPDATE SET
                description = excluded.description,
                category_id = excluded.category_id
            "#,
        )
        .bind(&category.code)
        .bind(&category.description)
        .bind(category.category_id)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Returns the subject-code → remote-category-id map for every
    /// reconciled category.
    ///
    /// Refreshed by callers after each reconciliation pass so product
    /// payloads always resolve against current identifiers.
    pub async fn index(conn: &mut SqliteConnection) -> DbResult<HashMap<String, i64>> {
        let rows = sqlx::query(
            "SELECT code, category_id FROM categories WHERE category_id IS NOT NULL",
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut index = HashMap::with_capacity(rows.len());
        for row in rows {
            let code: String = row.try_get("code")?;
            let category_id: i64 = row.try_get("category_id")?;
            index.insert(code, category_id);
        }

        Ok(index)
    }
}

fn map_category(row: &SqliteRow) -> DbResult<Category> {
    Ok(Category {
        code: row.try_get("code")?,
        description: row.try_get("description")?,
        category_id: row.try_get("category_id")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
