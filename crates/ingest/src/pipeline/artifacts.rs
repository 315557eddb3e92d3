//! Filesystem artifacts: converted markdown, chunk files, embeddings index.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use docdex_core::ChunkRecord;

use crate::document::rtl::{RTL_CLOSE, RTL_OPEN};

/// Number of preview characters stored per chunk in embeddings.json.
const PREVIEW_CHARS: usize = 200;

pub fn write_markdown(output_dir: &Path, stem: &str, markdown: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{stem}.md"));
    fs::write(&path, markdown)?;
    Ok(path)
}

/// Write each chunk as `chunk_{i}.md` inside a folder named after the
/// document stem, wrapped in the RTL div with a position heading.
pub fn write_chunks(
    output_dir: &Path,
    stem: &str,
    records: &[ChunkRecord],
) -> io::Result<PathBuf> {
    let dir = output_dir.join(stem);
    fs::create_dir_all(&dir)?;

    let total = records.len();
    for rec in records {
        let body = format!(
            "{RTL_OPEN}\n\n# Chunk {}/{}\n\n{}\n\n{RTL_CLOSE}",
            rec.ordinal, total, rec.text,
        );
        fs::write(dir.join(format!("chunk_{}.md", rec.ordinal)), body)?;
    }
    Ok(dir)
}

/// One row of embeddings.json.
#[derive(Debug, Serialize)]
pub struct EmbeddingIndexEntry {
    pub chunk_id: usize,
    pub chunk_file: String,
    /// Truncated text preview, not the full chunk.
    pub text: String,
    pub embedding: Vec<f32>,
    pub embedding_dim: usize,
}

/// Write `embeddings.json` next to the chunk files, listing every chunk that
/// received a vector. Nothing is written when no vectors were produced.
pub fn write_embeddings_index(
    chunks_dir: &Path,
    records: &[ChunkRecord],
) -> io::Result<Option<PathBuf>> {
    let entries: Vec<EmbeddingIndexEntry> = records
        .iter()
        .filter_map(|rec| {
            rec.embedding.as_ref().map(|vector| EmbeddingIndexEntry {
                chunk_id: rec.ordinal,
                chunk_file: format!("chunk_{}.md", rec.ordinal),
                text: preview(&rec.text, PREVIEW_CHARS),
                embedding: vector.clone(),
                embedding_dim: vector.len(),
            })
        })
        .collect();

    if entries.is_empty() {
        return Ok(None);
    }

    let path = chunks_dir.join("embeddings.json");
    let json = serde_json::to_string_pretty(&entries)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&path, json)?;
    Ok(Some(path))
}

/// Char-safe truncation with an ellipsis marker.
fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}
