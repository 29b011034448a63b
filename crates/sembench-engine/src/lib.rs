// crates/sembench-engine/src/lib.rs
//
// sembench-engine: Brute-force similarity engine.
//
// Computes query-vs-corpus top-k retrieval and the intra-batch
// closest-pair scan under cosine similarity and Euclidean distance.
// Exhaustive O(N×M) comparison is the intended algorithm: this crate is
// the measured baseline, not a search index.

pub mod compare;
pub mod metric;
pub mod pairwise;

// Re-export key entry points for ergonomic access from downstream crates.
pub use compare::{compare_queries, ComparisonReport, QueryMatches};
pub use metric::{cosine_similarity, euclidean_distance, score};
pub use pairwise::closest_pair;
