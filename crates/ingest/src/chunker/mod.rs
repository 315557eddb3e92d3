//! Character-based chunking engine.
//!
//! Splits sanitized document text into retrieval-sized chunks using one of
//! three strategies: fixed-size windows with overlap, sentence splitting,
//! or paragraph splitting. The engine is pure and synchronous; metadata
//! (ordinals, timestamps) is attached by the pipeline.

mod strategies;
mod types;

pub use strategies::{chunk, chunk_by_paragraphs, chunk_by_sentences, chunk_fixed};
pub use types::{ChunkError, ChunkStrategy};
