// crates/sembench-core/src/lib.rs
//
// sembench-core: Core types, traits, and timing primitives for the
// sembench embedding benchmark.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the record and match types, the error taxonomy, the collaborator
// traits for storage / embedding / reporting, and the scoped-timing helpers.

pub mod embedder;
pub mod error;
pub mod record;
pub mod timing;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use sembench_core::SentenceRecord;`

// Record types
pub use record::{ClosestPair, Metric, QueryEmbedding, SentenceRecord, SimilarityMatch};

// Timing types
pub use timing::{summarize, time, time_stage, Stage, TimingSample, TimingSummary};

// Embedder
pub use embedder::{Embedder, HashEmbedder};

// Error type
pub use error::BenchError;

// Traits
pub use traits::{ReportSink, SentenceStore};
