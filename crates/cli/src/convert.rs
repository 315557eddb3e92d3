//! The `convert` subcommand: the full pipeline for one file or a directory.

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{error, info, warn};

use docdex_core::Config;
use docdex_ingest::chunker::ChunkStrategy;
use docdex_ingest::embedding;
use docdex_ingest::pipeline::{self, PipelineOptions};
use docdex_store::chunk_store;

const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Source file or directory.
    pub path: PathBuf,

    /// Output directory (defaults to OUTPUT_DIR from the environment).
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Split the converted markdown into chunks.
    #[arg(long)]
    pub chunk: bool,

    /// Chunking strategy: fixed, sentence or paragraph.
    #[arg(long, default_value = "fixed")]
    pub strategy: String,

    /// Chunk size in characters (fixed strategy only).
    #[arg(long, default_value_t = 1000)]
    pub chunk_size: usize,

    /// Overlap in characters (fixed strategy only).
    #[arg(long, default_value_t = 200)]
    pub overlap: usize,

    /// Generate an embedding per chunk.
    #[arg(long)]
    pub embed: bool,

    /// Persist chunk records to PostgreSQL.
    #[arg(long)]
    pub save: bool,
}

pub async fn run(config: &Config, args: ConvertArgs) -> anyhow::Result<()> {
    let files = collect_files(&args.path)?;
    if files.is_empty() {
        anyhow::bail!(
            "no supported files (pdf, docx, txt) at {}",
            args.path.display()
        );
    }

    // Strategy and sizing problems are configuration errors: fail the whole
    // run up front, before touching any file.
    let chunking = if args.chunk {
        Some(ChunkStrategy::from_name(&args.strategy, args.chunk_size, args.overlap)?)
    } else {
        None
    };

    let embedder = if args.chunk && args.embed {
        embedding::build_embedder(config)
    } else {
        None
    };

    let pool = if args.chunk && args.save {
        docdex_store::init_pg_pool(&config.postgres).await
    } else {
        None
    };

    let options = PipelineOptions {
        output_dir: args
            .out_dir
            .clone()
            .unwrap_or_else(|| config.storage.output_dir.clone()),
        chunking,
    };

    let mut succeeded = 0usize;
    for file in &files {
        let filename = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed");
        info!("Processing {}", filename);

        let bytes = match std::fs::read(file) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to read {}: {}", file.display(), e);
                continue;
            }
        };

        match pipeline::index_document(&bytes, filename, &options, embedder.as_deref()).await {
            Ok(result) => {
                succeeded += 1;
                if let Some(pool) = &pool {
                    if !result.records.is_empty() {
                        match chunk_store::insert_chunks(pool, &result.records).await {
                            Ok(n) => info!("Saved {} chunks of '{}' to PostgreSQL", n, filename),
                            Err(e) => warn!(
                                "Failed to save chunks of '{}': {} (file artifacts kept)",
                                filename, e
                            ),
                        }
                    }
                }
            }
            // One bad file never aborts the batch.
            Err(e) => error!("Failed to convert {}: {}", filename, e),
        }
    }

    info!("Converted {}/{} file(s)", succeeded, files.len());
    Ok(())
}

fn collect_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("path not found: {}", path.display());
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_only_supported_extensions() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["a.pdf", "b.txt", "c.docx", "d.exe", "e.PDF"] {
            std::fs::write(tmp.path().join(name), b"x").unwrap();
        }
        let files = collect_files(tmp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.txt", "c.docx", "e.PDF"]);
    }

    #[test]
    fn single_file_passes_through() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("doc.txt");
        std::fs::write(&file, b"x").unwrap();
        assert_eq!(collect_files(&file).unwrap(), vec![file]);
    }

    #[test]
    fn missing_path_is_an_error() {
        assert!(collect_files(Path::new("/no/such/path")).is_err());
    }

    #[tokio::test]
    async fn invalid_fixed_sizing_aborts_before_any_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("doc.txt"), b"some text").unwrap();
        let out = tmp.path().join("out");

        let config = docdex_core::Config::from_env();
        let args = ConvertArgs {
            path: tmp.path().to_path_buf(),
            out_dir: Some(out.clone()),
            chunk: true,
            strategy: "fixed".to_string(),
            chunk_size: 100,
            overlap: 200,
            embed: false,
            save: false,
        };

        assert!(run(&config, args).await.is_err());
        assert!(!out.exists());
    }
}
