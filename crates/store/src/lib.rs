pub mod chunk_store;
pub mod db;

pub use chunk_store::{ChunkRow, DocumentSummary};
pub use db::init_pg_pool;
