// crates/sembench-bench/src/lib.rs
//
// sembench-bench: Batch orchestration for the sembench embedding
// benchmark.
//
// Drives the pipeline strictly sequentially: pull batches, invoke the
// embedding bridge, write to storage, run the similarity engine, and
// forward results and timing summaries to the reporting collaborator.
// Batch boundaries shape I/O only and never affect similarity results.

pub mod loader;
pub mod orchestrator;

// Re-export the pipeline entry points.
pub use loader::load_sentences;
pub use orchestrator::{embed_pending, ingest, monitor, query, StageReport};
