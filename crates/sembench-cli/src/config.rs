// crates/sembench-cli/src/config.rs
//
// Runtime configuration for the sembench CLI.
// Loaded from a TOML file or populated with sensible defaults; command
// line flags override file values.

use serde::Deserialize;
use std::fs;

/// Runtime configuration for a benchmark run.
#[derive(Debug, Clone, Deserialize)]
pub struct BenchConfig {
    /// Storage backend: "memory" or "rocks".
    #[serde(default = "default_store")]
    pub store: String,

    /// Directory for the RocksDB backend's data.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Rows per storage write and per embedding-bridge call. Shapes I/O
    /// only; similarity results are independent of this value.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Matches retained per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Embedding dimensionality of the hash embedder.
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_store() -> String {
    "memory".to_string()
}

fn default_data_dir() -> String {
    "./sembench-data".to_string()
}

fn default_batch_size() -> usize {
    1000
}

fn default_top_k() -> usize {
    2
}

fn default_dimensions() -> usize {
    384
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            store: default_store(),
            data_dir: default_data_dir(),
            batch_size: default_batch_size(),
            top_k: default_top_k(),
            dimensions: default_dimensions(),
            log_level: default_log_level(),
        }
    }
}

impl BenchConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: BenchConfig = toml::from_str(&contents)?;
        Ok(config)
    }
}
