//! Link row operations: insert, lookup, click counting, listing.

use anyhow::Result;
use sqlx::Row;

use super::db::{unix_timestamp, LinkDb};
use super::types::{LinkId, LinkRecord, LinkSummary};

impl LinkDb {
    /// Insert a new URL or text value and return its row id.
    pub async fn insert_value(&self, value: &str) -> Result<LinkId> {
        let row_id = sqlx::query(
            r#"
            INSERT INTO links (value, clicks, created_at)
            VALUES (?1, 0, ?2)
            "#,
        )
        .bind(value)
        .bind(unix_timestamp())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(row_id)
    }

    /// Look up a stored value by id.
    pub async fn get_value(&self, id: LinkId) -> Result<Option<LinkRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, value, clicks
            FROM links
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| LinkRecord {
            id: row.get("id"),
            value: row.get("value"),
            clicks: row.get("clicks"),
        }))
    }

    /// Count one more follow of the short link. Unknown ids are ignored.
    pub async fn increment_clicks(&self, id: LinkId) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE links
            SET clicks = clicks + 1
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn row_count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM links")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }

    /// List all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<LinkSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT id, value, clicks, created_at
            FROM links
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(LinkSummary {
                id: row.get("id"),
                value: row.get("value"),
                clicks: row.get("clicks"),
                created_at: row.get("created_at"),
            });
        }

        Ok(out)
    }

    /// Permanently remove a link row. Returns false if no such row existed.
    pub async fn remove_link(&self, id: LinkId) -> Result<bool> {
        let done = sqlx::query("DELETE FROM links WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(done.rows_affected() > 0)
    }
}
