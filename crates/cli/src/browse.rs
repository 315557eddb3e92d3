//! Read-side subcommands over the chunk store: stats, search, delete.

use docdex_core::Config;
use docdex_store::chunk_store;

macro_rules! require_pool {
    ($config:expr) => {
        match docdex_store::init_pg_pool(&$config.postgres).await {
            Some(pool) => pool,
            None => anyhow::bail!("POSTGRES_URL not configured or database unreachable"),
        }
    };
}

pub async fn stats(config: &Config) -> anyhow::Result<()> {
    let pool = require_pool!(config);

    let total_chunks = chunk_store::count_chunks(&pool).await?;
    let total_docs = chunk_store::count_documents(&pool).await?;
    println!("Documents: {total_docs}");
    println!("Chunks:    {total_chunks}");

    let documents = chunk_store::list_documents(&pool).await?;
    if documents.is_empty() {
        println!("\nNo documents indexed yet.");
        return Ok(());
    }

    println!("\n{:<32} {:<10} {:>7} {:>8}  last indexed", "filename", "strategy", "chunks", "vectors");
    for doc in documents {
        println!(
            "{:<32} {:<10} {:>7} {:>8}  {}",
            doc.filename,
            doc.strategy,
            doc.chunk_count,
            doc.vector_count,
            doc.last_indexed.format("%Y-%m-%d %H:%M"),
        );
    }
    Ok(())
}

pub async fn search(
    config: &Config,
    filename: &str,
    query: &str,
    limit: i64,
) -> anyhow::Result<()> {
    let pool = require_pool!(config);

    let query = if query.is_empty() { None } else { Some(query) };
    let chunks = chunk_store::search_chunks(&pool, filename, query, limit).await?;
    println!("{} chunk(s) matched in '{}'", chunks.len(), filename);

    for (i, chunk) in chunks.iter().enumerate() {
        let vector = match chunk.embedding_dim {
            Some(dim) => format!("{dim} dims"),
            None => "no vector".to_string(),
        };
        println!(
            "\n[{}] {} ({})",
            i + 1,
            chunk.created_at.format("%Y-%m-%d %H:%M"),
            vector,
        );
        println!("{}", preview(&chunk.text, 200));
    }
    Ok(())
}

pub async fn delete(config: &Config, filename: &str) -> anyhow::Result<()> {
    let pool = require_pool!(config);

    let removed = chunk_store::delete_document(&pool, filename).await?;
    if removed == 0 {
        println!("No chunks found for '{filename}'");
    } else {
        println!("Deleted {removed} chunk(s) of '{filename}'");
    }
    Ok(())
}

fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}
