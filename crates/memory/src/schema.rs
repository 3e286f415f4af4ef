//! SQLite schema for embedded fragments.

use sqlx::SqlitePool;

/// One embedded piece of a source file.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct FragmentRow {
    pub id: String,
    /// Source tag: the file path the fragment was read from.
    pub source: String,
    pub ordinal: i64,
    pub start_line: i64,
    pub end_line: i64,
    pub hash: String,
    pub model: String,
    pub text: String,
    /// Little-endian f32 vector.
    pub embedding: Option<Vec<u8>>,
    pub created_at: String,
}

pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS fragments (
            id          TEXT PRIMARY KEY,
            source      TEXT NOT NULL,
            ordinal     INTEGER NOT NULL,
            start_line  INTEGER NOT NULL,
            end_line    INTEGER NOT NULL,
            hash        TEXT NOT NULL,
            model       TEXT NOT NULL,
            text        TEXT NOT NULL,
            embedding   BLOB,
            created_at  TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_fragments_source ON fragments(source)")
        .execute(pool)
        .await?;

    Ok(())
}
