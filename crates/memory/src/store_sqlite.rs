use std::{path::Path, str::FromStr};

use {
    async_trait::async_trait,
    sqlx::{
        SqlitePool,
        sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    },
    tracing::debug,
};

use crate::{
    schema::{FragmentRow, run_migrations},
    store::VectorStore,
};

const FRAGMENT_COLUMNS: &str =
    "id, source, ordinal, start_line, end_line, hash, model, text, embedding, created_at";

pub struct SqliteVectorStore {
    pool: SqlitePool,
}

impl SqliteVectorStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database file and its parent directory,
    /// then run migrations.
    pub async fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;
        run_migrations(&pool).await?;
        debug!(path = %path.display(), "opened vector store");
        Ok(Self::new(pool))
    }

    /// A private in-memory database. A single connection keeps every query
    /// on the same database.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl VectorStore for SqliteVectorStore {
    async fn ids_for_source(&self, source: &str) -> anyhow::Result<Vec<String>> {
        let ids = sqlx::query_scalar::<_, String>(
            "SELECT id FROM fragments WHERE source = ? ORDER BY ordinal",
        )
        .bind(source)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn replace_source(&self, source: &str, rows: &[FragmentRow]) -> anyhow::Result<u64> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM fragments WHERE source = ?")
            .bind(source)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        for row in rows {
            sqlx::query(
                "INSERT INTO fragments
                    (id, source, ordinal, start_line, end_line, hash, model, text, embedding, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&row.id)
            .bind(&row.source)
            .bind(row.ordinal)
            .bind(row.start_line)
            .bind(row.end_line)
            .bind(&row.hash)
            .bind(&row.model)
            .bind(&row.text)
            .bind(row.embedding.as_deref())
            .bind(&row.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }

    async fn delete_source(&self, source: &str) -> anyhow::Result<u64> {
        let deleted = sqlx::query("DELETE FROM fragments WHERE source = ?")
            .bind(source)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted)
    }

    async fn fragments(&self, source: Option<&str>) -> anyhow::Result<Vec<FragmentRow>> {
        let rows = match source {
            Some(source) => {
                sqlx::query_as::<_, FragmentRow>(&format!(
                    "SELECT {FRAGMENT_COLUMNS} FROM fragments WHERE source = ? ORDER BY ordinal"
                ))
                .bind(source)
                .fetch_all(&self.pool)
                .await?
            },
            None => {
                sqlx::query_as::<_, FragmentRow>(&format!(
                    "SELECT {FRAGMENT_COLUMNS} FROM fragments ORDER BY source, ordinal"
                ))
                .fetch_all(&self.pool)
                .await?
            },
        };
        Ok(rows)
    }

    async fn sources(&self) -> anyhow::Result<Vec<String>> {
        let sources =
            sqlx::query_scalar::<_, String>("SELECT DISTINCT source FROM fragments ORDER BY source")
                .fetch_all(&self.pool)
                .await?;
        Ok(sources)
    }

    async fn count(&self) -> anyhow::Result<u64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM fragments")
            .fetch_one(&self.pool)
            .await?;
        Ok(n as u64)
    }
}
