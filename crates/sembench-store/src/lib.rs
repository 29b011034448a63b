// crates/sembench-store/src/lib.rs
//
// sembench-store: Storage backends for the sembench embedding benchmark.
//
// Two implementations of the `SentenceStore` trait: an in-memory store
// for single-process runs, and a RocksDB-backed store that persists rows
// across the ingest / embed / query subcommands. Both expose the same
// keyset-paged missing-embedding scan so the orchestrator is backend
// agnostic.

pub mod memory;
pub mod rocks;

// Re-export the backends for ergonomic access from downstream crates.
pub use memory::MemoryStore;
pub use rocks::RocksStore;
