// crates/sembench-core/src/record.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single corpus sentence with its optional embedding.
///
/// The embedding is absent until the embedding-update stage computes it;
/// once set it is only ever replaced wholesale, never partially updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRecord {
    /// Unique, immutable identifier: the 0-based ordinal of the sentence
    /// among non-blank lines of its source file.
    pub id: i64,
    /// Trimmed, non-empty sentence text.
    pub text: String,
    /// Fixed-length embedding vector, absent until computed.
    pub embedding: Option<Vec<f32>>,
}

impl SentenceRecord {
    /// Create a record with no embedding yet.
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            embedding: None,
        }
    }

    /// Whether this record participates in similarity comparison.
    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }
}

/// The two comparison metrics supported by the similarity engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Normalized dot product; higher score = more similar.
    Cosine,
    /// L2 norm of the difference vector; lower score = more similar.
    Euclidean,
}

impl Metric {
    /// Both metrics, in the order the orchestrator runs them.
    pub const ALL: [Metric; 2] = [Metric::Cosine, Metric::Euclidean];

    /// Whether score `a` is strictly closer than score `b` under this
    /// metric's direction.
    pub fn closer(self, a: f64, b: f64) -> bool {
        match self {
            Metric::Cosine => a > b,
            Metric::Euclidean => a < b,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Cosine => write!(f, "cosine similarity"),
            Metric::Euclidean => write!(f, "euclidean distance"),
        }
    }
}

/// A query sentence paired with its embedding vector.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryEmbedding {
    /// Trimmed query text.
    pub text: String,
    /// Embedding produced by the same bridge that embedded the corpus.
    pub vector: Vec<f32>,
}

/// One retrieved corpus entry for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatch {
    /// 0-based index of the query this match belongs to.
    pub query_index: usize,
    /// Identifier of the matched corpus record.
    pub candidate_id: i64,
    /// Literal text of the matched corpus record.
    pub candidate_text: String,
    /// Scalar score under `metric`; direction depends on the metric.
    pub score: f64,
    /// Metric the score was computed under.
    pub metric: Metric,
}

/// The single most-similar unordered pair found by the intra-batch scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClosestPair {
    /// Batch index of the first member; always `left < right`.
    pub left: usize,
    /// Batch index of the second member.
    pub right: usize,
    /// Score of the pair under the metric the scan ran with.
    pub score: f64,
}
