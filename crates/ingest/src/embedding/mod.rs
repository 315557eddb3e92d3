pub mod gemini;
pub mod ollama;
pub mod traits;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

pub use gemini::GeminiEmbedder;
pub use ollama::OllamaEmbedder;
pub use traits::{Embedder, EmbeddingError};

/// Build an embedder from config. Returns None (with a warning) when the
/// configured provider is unusable; embedding is then skipped, never fatal.
pub fn build_embedder(config: &docdex_core::Config) -> Option<Arc<dyn Embedder>> {
    let timeout = Duration::from_secs(config.embedding.timeout_secs);

    match config.embedding.provider.as_str() {
        "gemini" => {
            let Some(api_key) = config.embedding.gemini_api_key.clone() else {
                tracing::warn!("GEMINI_API_KEY not set — embeddings disabled");
                return None;
            };
            let embedder =
                GeminiEmbedder::new(api_key, config.embedding.model.clone(), timeout);
            info!("Embedding provider ready: gemini (model: {})", config.embedding.model);
            Some(Arc::new(embedder))
        }
        "ollama" => {
            let embedder = OllamaEmbedder::new(
                config.ollama.url.clone(),
                config.ollama.embedding_model.clone(),
                timeout,
            );
            info!(
                "Embedding provider ready: ollama (model: {})",
                config.ollama.embedding_model
            );
            Some(Arc::new(embedder))
        }
        other => {
            tracing::warn!("Unknown embedding provider '{}' — embeddings disabled", other);
            None
        }
    }
}
