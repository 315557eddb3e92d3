use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("unexpected response shape: {0}")]
    Parse(String),
}

/// Trait for embedding backends (Gemini, Ollama, ...).
///
/// One call per chunk; failures are independent and the pipeline recovers
/// from them per-chunk. A request timeout counts as a failure here.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one text, returning a fixed-dimension vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}
