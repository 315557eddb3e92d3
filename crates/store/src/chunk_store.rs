//! Operations on the `document_chunks` table.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use docdex_core::ChunkRecord;

// ── Types ──────────────────────────────────────────

/// Per-document aggregate, grouped by filename and strategy.
#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub filename: String,
    pub strategy: String,
    pub chunk_count: i64,
    /// Chunks that actually carry a vector.
    pub vector_count: i64,
    pub first_indexed: DateTime<Utc>,
    pub last_indexed: DateTime<Utc>,
}

/// One stored chunk as returned by listing/search.
#[derive(Debug, Serialize)]
pub struct ChunkRow {
    pub text: String,
    pub embedding_dim: Option<usize>,
    pub created_at: DateTime<Utc>,
}

// ── Operations ─────────────────────────────────────

/// Insert a batch of chunk records. Not transactional across chunks by
/// design: a failure partway through leaves earlier rows in place and is
/// reported to the caller.
pub async fn insert_chunks(pool: &PgPool, records: &[ChunkRecord]) -> Result<usize, sqlx::Error> {
    for rec in records {
        sqlx::query(
            "INSERT INTO document_chunks \
             (id, chunk_text, embedding, filename, split_strategy, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(Uuid::new_v4())
        .bind(&rec.text)
        .bind(rec.embedding.as_deref())
        .bind(&rec.filename)
        .bind(&rec.strategy)
        .bind(rec.created_at)
        .execute(pool)
        .await?;
    }
    Ok(records.len())
}

/// Total chunks stored.
pub async fn count_chunks(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM document_chunks")
        .fetch_one(pool)
        .await
}

/// Distinct source documents stored.
pub async fn count_documents(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(DISTINCT filename) FROM document_chunks")
        .fetch_one(pool)
        .await
}

/// List documents grouped by filename and strategy, most recently indexed
/// first, with chunk/vector counts and first/last index timestamps.
pub async fn list_documents(pool: &PgPool) -> Result<Vec<DocumentSummary>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT filename, split_strategy, \
         COUNT(*) as chunk_count, \
         COUNT(embedding) as vector_count, \
         MIN(created_at) as first_indexed, \
         MAX(created_at) as last_indexed \
         FROM document_chunks \
         GROUP BY filename, split_strategy \
         ORDER BY last_indexed DESC",
    )
    .fetch_all(pool)
    .await?;

    let docs = rows
        .iter()
        .map(|row| DocumentSummary {
            filename: row.get("filename"),
            strategy: row.get("split_strategy"),
            chunk_count: row.get("chunk_count"),
            vector_count: row.get("vector_count"),
            first_indexed: row.get("first_indexed"),
            last_indexed: row.get("last_indexed"),
        })
        .collect();
    Ok(docs)
}

/// List chunks for one document, optionally filtered by a case-insensitive
/// substring of the chunk text.
pub async fn search_chunks(
    pool: &PgPool,
    filename: &str,
    query: Option<&str>,
    limit: i64,
) -> Result<Vec<ChunkRow>, sqlx::Error> {
    let rows = match query {
        Some(q) => {
            sqlx::query(
                "SELECT chunk_text, embedding, created_at \
                 FROM document_chunks \
                 WHERE filename = $1 AND chunk_text ILIKE $2 \
                 ORDER BY created_at \
                 LIMIT $3",
            )
            .bind(filename)
            .bind(format!("%{q}%"))
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(
                "SELECT chunk_text, embedding, created_at \
                 FROM document_chunks \
                 WHERE filename = $1 \
                 ORDER BY created_at \
                 LIMIT $2",
            )
            .bind(filename)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    let chunks = rows
        .iter()
        .map(|row| {
            let embedding: Option<Vec<f32>> = row.get("embedding");
            ChunkRow {
                text: row.get("chunk_text"),
                embedding_dim: embedding.map(|v| v.len()),
                created_at: row.get("created_at"),
            }
        })
        .collect();
    Ok(chunks)
}

/// Delete every chunk belonging to one document. Returns rows removed.
pub async fn delete_document(pool: &PgPool, filename: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM document_chunks WHERE filename = $1")
        .bind(filename)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
