// crates/sembench-cli/src/main.rs
//
// CLI entrypoint for the sembench embedding benchmark.
//
// Initializes tracing, merges the TOML config with command line flags,
// and dispatches to the subcommand handlers.

mod commands;
mod config;
mod sink;

use clap::{Parser, Subcommand};
use config::BenchConfig;

/// Sentence-embedding ingestion and retrieval benchmark.
#[derive(Parser, Debug)]
#[command(
    name = "sembench",
    version = "0.1.0",
    about = "Benchmark sentence-embedding ingestion and brute-force nearest-neighbor retrieval"
)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<String>,

    /// Storage backend: "memory" or "rocks".
    #[arg(long, global = true)]
    store: Option<String>,

    /// Directory for the RocksDB backend's data.
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Rows per storage write and per embedding-bridge call.
    #[arg(long, global = true)]
    batch_size: Option<usize>,

    /// Embedding dimensionality.
    #[arg(long, global = true)]
    dimensions: Option<usize>,

    /// Emit JSON lines instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Load a corpus file and insert it into storage in timed batches.
    Ingest {
        /// Corpus file: one sentence per line, blank lines skipped.
        #[arg(long)]
        file: String,
    },

    /// Embed all rows still missing an embedding.
    Embed,

    /// Query the embedded corpus under both metrics.
    Query {
        /// Query sentences given directly on the command line.
        text: Vec<String>,

        /// File of query sentences, one per line.
        #[arg(long)]
        file: Option<String>,

        /// Matches to retain per query (default from config).
        #[arg(long)]
        top_k: Option<usize>,
    },

    /// Per-batch closest-pair scan over a corpus file.
    Monitor {
        #[arg(long)]
        file: String,
    },

    /// Ingest, embed, and query in one process.
    Run {
        /// Corpus file to ingest.
        #[arg(long)]
        file: String,

        /// File of query sentences.
        #[arg(long)]
        queries: String,

        /// Matches to retain per query (default from config).
        #[arg(long)]
        top_k: Option<usize>,
    },

    /// Show row counts for the selected backend.
    Status,
}

impl Cli {
    /// Resolve the effective configuration: file values first, then
    /// command line overrides.
    fn resolve_config(&self) -> Result<BenchConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::load(path)?,
            None => BenchConfig::default(),
        };
        if let Some(store) = &self.store {
            config.store = store.clone();
        }
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(dimensions) = self.dimensions {
            config.dimensions = dimensions;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level.clone())),
        )
        .init();

    match &cli.command {
        Commands::Ingest { file } => commands::ingest::run(&config, file, cli.json).await?,
        Commands::Embed => commands::embed::run(&config, cli.json).await?,
        Commands::Query { text, file, top_k } => {
            commands::query::run(&config, text, file.as_deref(), *top_k, cli.json).await?
        }
        Commands::Monitor { file } => commands::monitor::run(&config, file, cli.json).await?,
        Commands::Run {
            file,
            queries,
            top_k,
        } => commands::run::run(&config, file, queries, *top_k, cli.json).await?,
        Commands::Status => commands::status::run(&config, cli.json).await?,
    }

    Ok(())
}
