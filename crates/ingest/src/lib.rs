pub mod chunker;
pub mod document;
pub mod embedding;
pub mod pipeline;
