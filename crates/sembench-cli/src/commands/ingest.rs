// crates/sembench-cli/src/commands/ingest.rs
//
// `sembench ingest --file <path>` — load a corpus file and insert it into
// storage in timed batches.

use std::path::Path;

use sembench_bench::{ingest, load_sentences};

use crate::config::BenchConfig;
use crate::sink::ConsoleSink;

pub async fn run(
    config: &BenchConfig,
    file: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let texts = load_sentences(Path::new(file))?;
    let store = super::open_store(config)?;
    let mut sink = ConsoleSink::new(json);

    let report = ingest(store.as_ref(), &texts, config.batch_size, &mut sink).await?;
    println!(
        "Ingested {} sentences in {} batches.",
        report.rows, report.batches
    );
    Ok(())
}
