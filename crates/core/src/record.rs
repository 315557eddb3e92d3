use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One chunk produced by a single pipeline run, ready for persistence.
///
/// The embedding is `None` when the embedding step was skipped or failed for
/// this chunk — never an empty vector that could be mistaken for a real one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// 1-based position within the document, dense and emission-ordered.
    pub ordinal: usize,
    pub text: String,
    pub embedding: Option<Vec<f32>>,
    /// Base name of the source document (no extension).
    pub filename: String,
    /// Strategy tag: "fixed", "sentence" or "paragraph".
    pub strategy: String,
    pub created_at: DateTime<Utc>,
}

impl ChunkRecord {
    pub fn has_vector(&self) -> bool {
        self.embedding.is_some()
    }
}
