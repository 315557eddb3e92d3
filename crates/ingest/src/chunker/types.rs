//! Strategy selection and chunking error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("unsupported chunking strategy: {0}")]
    UnsupportedStrategy(String),
    #[error("invalid chunk config: size {size} must be positive and greater than overlap {overlap}")]
    InvalidConfig { size: usize, overlap: usize },
}

/// A chunking strategy. Sizing parameters exist only on the fixed variant;
/// the sentence and paragraph strategies take no configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStrategy {
    /// Overlapping windows of `size` characters advancing by `size - overlap`.
    Fixed { size: usize, overlap: usize },
    /// Split at sentence-ending punctuation or newline followed by whitespace.
    Sentence,
    /// Split at blank-line boundaries.
    Paragraph,
}

impl ChunkStrategy {
    /// Resolve a strategy by name. `size` and `overlap` apply to "fixed"
    /// only and are ignored for the other two. Fixed sizing is validated
    /// here so callers fail before any document is processed.
    pub fn from_name(name: &str, size: usize, overlap: usize) -> Result<Self, ChunkError> {
        match name {
            "fixed" => {
                if size == 0 || size <= overlap {
                    return Err(ChunkError::InvalidConfig { size, overlap });
                }
                Ok(Self::Fixed { size, overlap })
            }
            "sentence" => Ok(Self::Sentence),
            "paragraph" => Ok(Self::Paragraph),
            other => Err(ChunkError::UnsupportedStrategy(other.to_string())),
        }
    }

    /// Tag stored alongside persisted chunks.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Fixed { .. } => "fixed",
            Self::Sentence => "sentence",
            Self::Paragraph => "paragraph",
        }
    }
}
