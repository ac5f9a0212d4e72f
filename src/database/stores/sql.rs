use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use super::{DOCUMENT_KEY, LeagueStore, StoreResult, decode};
use crate::database::models::LeagueDocument;

/// Durable tier: one row per document in `league_documents`.
#[derive(Clone)]
pub struct DatabaseStore {
    pool: SqlitePool,
}

impl DatabaseStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl LeagueStore for DatabaseStore {
    fn name(&self) -> &str {
        "database"
    }

    async fn try_load(&self) -> StoreResult<Option<LeagueDocument>> {
        let row = sqlx::query(
            r#"
            SELECT
                body
            FROM
                league_documents
            WHERE
                id = ?
            "#,
        )
        .bind(DOCUMENT_KEY)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let body: String = row.try_get("body")?;
                decode(&body)
            }
            None => Ok(None),
        }
    }

    async fn try_save(&self, document: &LeagueDocument) -> StoreResult<()> {
        let body = serde_json::to_string(document)?;
        let updated_at = document.last_update.unwrap_or_else(Utc::now).to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO
                league_documents (id, body, updated_at)
            VALUES
                (?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(DOCUMENT_KEY)
        .bind(body)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
