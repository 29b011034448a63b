// crates/sembench-cli/src/commands/embed.rs
//
// `sembench embed` — embed every row still missing an embedding and
// write the vectors back, one page per bridge call.

use sembench_bench::embed_pending;

use crate::config::BenchConfig;
use crate::sink::ConsoleSink;

pub async fn run(config: &BenchConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store(config)?;
    let embedder = super::embedder(config);
    let mut sink = ConsoleSink::new(json);

    let report = embed_pending(store.as_ref(), &embedder, config.batch_size, &mut sink).await?;
    if report.rows == 0 {
        println!("No rows pending an embedding.");
    } else {
        println!(
            "Embedded {} rows in {} batches.",
            report.rows, report.batches
        );
    }
    Ok(())
}
