// crates/sembench-cli/src/commands/query.rs
//
// `sembench query [<text>... | --file <path>]` — retrieve the top-k most
// similar corpus sentences for each query, under both metrics.

use std::path::Path;

use sembench_bench::{load_sentences, query};

use crate::config::BenchConfig;
use crate::sink::ConsoleSink;

pub async fn run(
    config: &BenchConfig,
    text: &[String],
    file: Option<&str>,
    top_k: Option<usize>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let queries = match file {
        Some(path) => load_sentences(Path::new(path))?,
        None => text.to_vec(),
    };
    if queries.is_empty() {
        return Err("No query sentences given: pass text arguments or --file".into());
    }

    let store = super::open_store(config)?;
    let embedder = super::embedder(config);
    let mut sink = ConsoleSink::new(json);

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
