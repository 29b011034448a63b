// crates/sembench-cli/src/commands/mod.rs

pub mod embed;
pub mod ingest;
pub mod monitor;
pub mod query;
pub mod run;
pub mod status;

use sembench_core::embedder::HashEmbedder;
use sembench_core::error::BenchError;
use sembench_core::traits::SentenceStore;
use sembench_store::{MemoryStore, RocksStore};

use crate::config::BenchConfig;

/// Construct the storage backend named by the configuration.
///
/// The memory backend lives for one process only, so the separate
/// ingest / embed / query subcommands are useful with "rocks"; with
/// "memory" use `run` to drive the whole pipeline in one invocation.
pub fn open_store(config: &BenchConfig) -> Result<Box<dyn SentenceStore>, BenchError> {
    match config.store.as_str() {
        "memory" => Ok(Box::new(MemoryStore::new())),
        "rocks" => Ok(Box::new(RocksStore::open(&config.data_dir)?)),
        other => Err(BenchError::Storage(format!(
            "Unknown store backend: {} (expected \"memory\" or \"rocks\")",
            other
        ))),
    }
}

/// Construct the embedding bridge for this run.
pub fn embedder(config: &BenchConfig) -> HashEmbedder {
    HashEmbedder::new(config.dimensions)
}
