// crates/sembench-cli/src/commands/status.rs
//
// `sembench status` — row counts for the selected backend.

use sembench_core::traits::SentenceStore;

use crate::config::BenchConfig;

pub async fn run(config: &BenchConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store(config)?;
    let total = store.count().await?;
    let embedded = store.fetch_embedded().await?.len();

    if json {
        println!(
            "{}",
            serde_json::json!({
                "store": config.store,
                "rows": total,
                "embedded": embedded,
                "pending": total - embedded,
            })
        );
    } else {
        println!("Store:    {}", config.store);
        println!("Rows:     {}", total);
        println!("Embedded: {}", embedded);
        println!("Pending:  {}", total - embedded);
    }
    Ok(())
}
