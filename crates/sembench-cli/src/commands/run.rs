// crates/sembench-cli/src/commands/run.rs
//
// `sembench run --file <corpus> --queries <queries>` — the full pipeline
// in one process: ingest, embed, then query under both metrics. The only
// way to exercise the memory backend end to end.

use std::path::Path;

use tracing::info;

use sembench_bench::{embed_pending, ingest, load_sentences, query};

use crate::config::BenchConfig;
use crate::sink::ConsoleSink;

pub async fn run(
    config: &BenchConfig,
    file: &str,
    queries_file: &str,
    top_k: Option<usize>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let texts = load_sentences(Path::new(file))?;
    let queries = load_sentences(Path::new(queries_file))?;
    let store = super::open_store(config)?;
    let embedder = super::embedder(config);
    let mut sink = ConsoleSink::new(json);

    let ingested = ingest(store.as_ref(), &texts, config.batch_size, &mut sink).await?;
    info!(rows = ingested.rows, batches = ingested.batches, "ingest complete");

    let embedded = embed_pending(store.as_ref(), &embedder, config.batch_size, &mut sink).await?;
    info!(rows = embedded.rows, "embedding complete");

    query(
        store.as_ref(),
        &embedder,
        &queries,
        top_k.unwrap_or(config.top_k),
        &mut sink,
    )
    .await?;
    Ok(())
}
