//! docdex — document to markdown converter and RAG chunk indexer.
//!
//! Converts PDF/DOCX/TXT sources to RTL-aware markdown, splits them into
//! retrieval-sized chunks, optionally embeds each chunk, and persists the
//! results to PostgreSQL.

mod browse;
mod convert;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "docdex", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a file or directory of files (pdf, docx, txt) to markdown,
    /// optionally chunking, embedding and saving.
    Convert(convert::ConvertArgs),
    /// Show database totals and the indexed document list.
    Stats,
    /// Search chunk text within one indexed document.
    Search {
        /// Document base name the search is scoped to.
        filename: String,
        /// Substring to match (case-insensitive).
        query: String,
        /// Maximum rows returned.
        #[arg(long, default_value_t = 50)]
        limit: i64,
    },
    /// Delete every stored chunk of one document.
    Delete { filename: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    docdex_core::config::load_dotenv();
    let config = docdex_core::Config::from_env();
    config.log_summary();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert(args) => convert::run(&config, args).await,
        Command::Stats => browse::stats(&config).await,
        Command::Search { filename, query, limit } => {
            browse::search(&config, &filename, &query, limit).await
        }
        Command::Delete { filename } => browse::delete(&config, &filename).await,
    }
}
