use thiserror::Error;

/// Benchmark-wide error types.
///
/// Every error is fatal to the current run: the orchestrator propagates it
/// to the caller, releases the storage session, and does not retry the
/// failed batch. Already-committed batches stay committed.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Storage layer error (schema, insert, fetch, or update failure).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Embedding bridge error (output shape or generation failure).
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Embedding vectors of inconsistent length reached the similarity
    /// engine. Indicates an upstream embedder contract violation.
    #[error("Embedding dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The corpus has zero entries with a present embedding.
    #[error("Corpus has no embedded entries to compare against")]
    EmptyCorpus,

    /// Statistics were requested over zero timing samples. Callers must
    /// guard with a non-empty check before summarizing.
    #[error("Cannot summarize an empty set of timing samples")]
    EmptySample,

    /// The flat-file corpus path does not exist.
    #[error("Source file not found: {0}")]
    MissingSourceFile(String),

    /// Batch size must be a positive integer.
    #[error("Batch size must be at least 1, got {0}")]
    InvalidBatchSize(usize),

    /// I/O error while reading a source file.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for BenchError {
    fn from(e: serde_json::Error) -> Self {
        BenchError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for BenchError {
    fn from(e: std::io::Error) -> Self {
        BenchError::Io(e.to_string())
    }
}
