// crates/sembench-cli/src/commands/monitor.rs
//
// `sembench monitor --file <path>` — ingestion-quality mode: per batch,
// report the single most-similar sentence pair under each metric.

use std::path::Path;

use sembench_bench::{load_sentences, monitor};

use crate::config::BenchConfig;
use crate::sink::ConsoleSink;

pub async fn run(
    config: &BenchConfig,
    file: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let texts = load_sentences(Path::new(file))?;
    let embedder = super::embedder(config);
    let mut sink = ConsoleSink::new(json);

    monitor(&embedder, &texts, config.batch_size, &mut sink).await?;
    Ok(())
}
