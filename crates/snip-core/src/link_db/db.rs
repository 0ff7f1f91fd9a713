//! SQLite-backed link database: connection, migrations, timestamp helper.
//!
//! Row CRUD lives in `links`.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Percent-encode a path for a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the SQLite-backed link database.
///
/// The default file lives under the XDG state directory:
/// `~/.local/state/snip/links.db`.
#[derive(Clone)]
pub struct LinkDb {
    pub(crate) pool: Pool<Sqlite>,
}

impl LinkDb {
    /// Open (or create) the default link database and run migrations.
    pub async fn open_default() -> Result<Self> {
        let db_path = crate::logging::state_file("links.db")?;
        Self::open_at(db_path).await
    }

    /// Open (or create) the database at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect(&uri)
            .await?;
        let db = LinkDb { pool };
        db.migrate().await?;
        tracing::debug!(path = %path.display(), "link database opened");
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        // AUTOINCREMENT: ids of deleted rows are never reissued, so a short
        // code never silently starts pointing at a different value.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS links (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                value TEXT NOT NULL,
                clicks INTEGER NOT NULL DEFAULT 0,
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Current time as Unix seconds (for DB timestamps).
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Open an in-memory database (no disk I/O). Used by tests across the crate.
#[cfg(test)]
pub(crate) async fn open_memory() -> Result<LinkDb> {
    // Single connection so the pool never hands back a different empty DB.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let db = LinkDb { pool };
    db.migrate().await?;
    Ok(db)
}

#[cfg(test)]
mod uri_tests {
    use super::path_to_sqlite_uri;
    use std::path::Path;

    #[test]
    fn special_chars_are_escaped() {
        assert_eq!(
            path_to_sqlite_uri(Path::new("/tmp/my links#1.db")),
            "sqlite:///tmp/my%20links%231.db"
        );
    }
}
