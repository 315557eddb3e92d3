//! Document pipeline: extract, convert, chunk, embed, write artifacts.
//!
//! Persistence is the caller's job — the pipeline returns the finished
//! `ChunkRecord` batch and never touches the database, so a store failure
//! can never invalidate artifacts that were already written.

mod artifacts;

pub use artifacts::EmbeddingIndexEntry;

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use docdex_core::ChunkRecord;

use crate::chunker::{self, ChunkError, ChunkStrategy};
use crate::document::{self, markdown, rtl, ExtractionError};
use crate::embedding::Embedder;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Chunk(#[from] ChunkError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Directory for converted markdown and chunk folders.
    pub output_dir: PathBuf,
    /// None converts to markdown only and keeps the `.md` file.
    pub chunking: Option<ChunkStrategy>,
}

/// Outcome of one document run.
#[derive(Debug)]
pub struct IndexedDocument {
    /// Document base name, used as the chunk folder name and the
    /// persistence filename key.
    pub stem: String,
    /// Set when chunking was disabled and the converted file was kept.
    pub markdown_path: Option<PathBuf>,
    /// Set when chunking ran.
    pub chunks_dir: Option<PathBuf>,
    pub records: Vec<ChunkRecord>,
    /// How many records carry a vector.
    pub embedded: usize,
}

/// Run one document through the pipeline.
///
/// An embedding failure for one chunk marks that chunk vector-absent and
/// moves on; it never aborts the document. Chunking always completes before
/// the first embedding call is issued.
pub async fn index_document(
    bytes: &[u8],
    filename: &str,
    options: &PipelineOptions,
    embedder: Option<&dyn Embedder>,
) -> Result<IndexedDocument, PipelineError> {
    let doc = document::extract(bytes, filename)?;
    let md = markdown::to_markdown(&doc);
    let stem = document_stem(filename);

    let Some(strategy) = options.chunking else {
        let path = artifacts::write_markdown(&options.output_dir, &stem, &md)?;
        info!("Converted '{}' -> {}", filename, path.display());
        return Ok(IndexedDocument {
            stem,
            markdown_path: Some(path),
            chunks_dir: None,
            records: Vec::new(),
            embedded: 0,
        });
    };

    // The chunker sees sanitized text only; the directional wrapper goes
    // back on when chunk files are written.
    let content = rtl::strip_rtl_wrapper(&md);
    let chunks = chunker::chunk(&content, strategy)?;
    let total = chunks.len();

    let mut records = Vec::with_capacity(total);
    let mut embedded = 0;
    for (i, text) in chunks.into_iter().enumerate() {
        let ordinal = i + 1;
        let embedding = match embedder {
            Some(e) => match e.embed(&text).await {
                Ok(vector) => {
                    embedded += 1;
                    Some(vector)
                }
                Err(err) => {
                    warn!(
                        "Embedding failed for chunk {}/{} of '{}': {}",
                        ordinal, total, filename, err
                    );
                    None
                }
            },
            None => None,
        };
        records.push(ChunkRecord {
            ordinal,
            text,
            embedding,
            filename: stem.clone(),
            strategy: strategy.tag().to_string(),
            created_at: Utc::now(),
        });
    }

    let chunks_dir = artifacts::write_chunks(&options.output_dir, &stem, &records)?;
    artifacts::write_embeddings_index(&chunks_dir, &records)?;

    info!(
        "Chunked '{}': {} chunks ({}), {} embedded",
        filename,
        total,
        strategy.tag(),
        embedded
    );

    Ok(IndexedDocument {
        stem,
        markdown_path: None,
        chunks_dir: Some(chunks_dir),
        records,
        embedded,
    })
}

fn document_stem(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::EmbeddingError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock embedder that fails on specific calls (1-based).
    struct FlakyEmbedder {
        calls: AtomicUsize,
        fail_on: Vec<usize>,
    }

    impl FlakyEmbedder {
        fn failing_on(fail_on: Vec<usize>) -> Self {
            Self { calls: AtomicUsize::new(0), fail_on }
        }
    }

    #[async_trait]
    impl Embedder for FlakyEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on.contains(&n) {
                Err(EmbeddingError::Api("simulated outage".to_string()))
            } else {
                Ok(vec![0.1, 0.2, 0.3])
            }
        }
    }

    fn options(dir: &Path, chunking: Option<ChunkStrategy>) -> PipelineOptions {
        PipelineOptions { output_dir: dir.to_path_buf(), chunking }
    }

    #[tokio::test]
    async fn conversion_without_chunking_keeps_markdown() {
        let tmp = tempfile::tempdir().unwrap();
        let result = index_document(b"Some text content.", "notes.txt", &options(tmp.path(), None), None)
            .await
            .unwrap();

        let md_path = result.markdown_path.unwrap();
        assert!(md_path.exists());
        assert!(result.records.is_empty());
        let content = std::fs::read_to_string(md_path).unwrap();
        assert!(content.contains("Some text content."));
        assert!(content.contains("dir=\"rtl\""));
    }

    #[tokio::test]
    async fn chunking_writes_numbered_chunk_files() {
        let tmp = tempfile::tempdir().unwrap();
        let opts = options(tmp.path(), Some(ChunkStrategy::Paragraph));
        let result = index_document(b"A.\n\nB.\n\nC.", "doc.txt", &opts, None)
            .await
            .unwrap();

        let dir = result.chunks_dir.unwrap();
        assert_eq!(dir, tmp.path().join("doc"));
        for i in 1..=3 {
            let body = std::fs::read_to_string(dir.join(format!("chunk_{i}.md"))).unwrap();
            assert!(body.contains(&format!("# Chunk {i}/3")));
        }
        // No embedder, so no index file.
        assert!(!dir.join("embeddings.json").exists());
    }

    #[tokio::test]
    async fn ordinals_are_dense_and_one_based() {
        let tmp = tempfile::tempdir().unwrap();
        let opts = options(tmp.path(), Some(ChunkStrategy::Sentence));
        let result = index_document(b"One. Two. Three. Four.", "s.txt", &opts, None)
            .await
            .unwrap();

        let ordinals: Vec<usize> = result.records.iter().map(|r| r.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4]);
        assert!(result.records.iter().all(|r| r.strategy == "sentence"));
        assert!(result.records.iter().all(|r| r.filename == "s"));
    }

    #[tokio::test]
    async fn wrapper_is_stripped_before_chunking() {
        let tmp = tempfile::tempdir().unwrap();
        let opts = options(tmp.path(), Some(ChunkStrategy::Paragraph));
        let result = index_document(b"plain paragraph", "p.txt", &opts, None)
            .await
            .unwrap();

        assert_eq!(result.records.len(), 1);
        assert!(!result.records[0].text.contains("<div"));
        assert!(!result.records[0].text.contains("</div>"));
    }

    #[tokio::test]
    async fn embedding_failure_degrades_single_chunk_only() {
        let tmp = tempfile::tempdir().unwrap();
        let opts = options(tmp.path(), Some(ChunkStrategy::Paragraph));
        let embedder = FlakyEmbedder::failing_on(vec![2]);

        let result = index_document(b"A.\n\nB.\n\nC.", "doc.txt", &opts, Some(&embedder))
            .await
            .unwrap();

        assert_eq!(result.records.len(), 3);
        assert!(result.records[0].has_vector());
        assert!(!result.records[1].has_vector());
        assert!(result.records[2].has_vector());
        assert_eq!(result.embedded, 2);

        // The index lists only the chunks that got vectors.
        let index = std::fs::read_to_string(result.chunks_dir.unwrap().join("embeddings.json"))
            .unwrap();
        let entries: serde_json::Value = serde_json::from_str(&index).unwrap();
        assert_eq!(entries.as_array().unwrap().len(), 2);
        assert_eq!(entries[0]["chunk_id"], 1);
        assert_eq!(entries[1]["chunk_id"], 3);
    }

    #[tokio::test]
    async fn total_embedding_outage_still_produces_all_chunks() {
        let tmp = tempfile::tempdir().unwrap();
        let opts = options(tmp.path(), Some(ChunkStrategy::Paragraph));
        let embedder = FlakyEmbedder::failing_on(vec![1, 2, 3]);

        let result = index_document(b"A.\n\nB.\n\nC.", "doc.txt", &opts, Some(&embedder))
            .await
            .unwrap();

        assert_eq!(result.records.len(), 3);
        assert_eq!(result.embedded, 0);
        assert!(result.records.iter().all(|r| !r.has_vector()));
        assert!(!result.chunks_dir.unwrap().join("embeddings.json").exists());
    }

    #[tokio::test]
    async fn invalid_fixed_config_fails_before_any_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let opts = options(tmp.path(), Some(ChunkStrategy::Fixed { size: 100, overlap: 200 }));
        let err = index_document(b"text", "bad.txt", &opts, None).await.unwrap_err();

        assert!(matches!(err, PipelineError::Chunk(ChunkError::InvalidConfig { .. })));
        assert!(!tmp.path().join("bad").exists());
    }

    #[tokio::test]
    async fn unsupported_file_type_is_an_extraction_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = index_document(b"x", "img.png", &options(tmp.path(), None), None)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Extraction(ExtractionError::UnsupportedType(_))));
    }
}
