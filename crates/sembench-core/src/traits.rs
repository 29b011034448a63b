// crates/sembench-core/src/traits.rs

use async_trait::async_trait;

use crate::error::BenchError;
use crate::record::{ClosestPair, Metric, SentenceRecord, SimilarityMatch};
use crate::timing::{Stage, TimingSummary};

/// Trait for persistent sentence storage.
///
/// Implemented by sembench-store (in-memory and RocksDB backends).
/// All operations may fail with `BenchError::Storage`; the orchestrator
/// treats that as fatal for the current run.
#[async_trait]
pub trait SentenceStore: Send + Sync {
    /// Create the backing schema. Idempotent.
    async fn create_schema(&self) -> Result<(), BenchError>;

    /// Insert a batch of raw sentences without embeddings.
    ///
    /// Ids are assigned sequentially from 0 in insertion order and
    /// returned in the same order as `texts`.
    async fn insert_batch(&self, texts: &[String]) -> Result<Vec<i64>, BenchError>;

    /// Fetch one page of records that have no embedding yet, in ascending
    /// id order, starting strictly after `after_id` (or from the beginning
    /// when `None`). An empty page means the scan is complete.
    async fn fetch_missing_embedding(
        &self,
        after_id: Option<i64>,
        page_size: usize,
    ) -> Result<Vec<SentenceRecord>, BenchError>;

    /// Replace the embeddings of the given records wholesale.
    ///
    /// Every id must exist; an unknown id is a `Storage` error.
    async fn update_embeddings(&self, pairs: &[(i64, Vec<f32>)]) -> Result<(), BenchError>;

    /// Fetch all records with a present embedding, in ascending id order.
    async fn fetch_embedded(&self) -> Result<Vec<SentenceRecord>, BenchError>;

    /// Total number of stored records.
    async fn count(&self) -> Result<usize, BenchError>;
}

/// Trait for the reporting collaborator the orchestrator forwards to.
///
/// Implemented by the CLI console sink; tests implement collecting sinks.
pub trait ReportSink {
    /// One timed storage write (insert or embedding-update batch).
    fn batch_timing(&mut self, stage: Stage, batch_index: usize, rows: usize, seconds: f64);

    /// The ordered top-k match list for one query under one metric.
    fn query_matches(
        &mut self,
        metric: Metric,
        query_index: usize,
        query_text: &str,
        matches: &[SimilarityMatch],
    );

    /// The most-similar pair found within one batch (intra-batch mode).
    fn closest_pair(
        &mut self,
        metric: Metric,
        batch_index: usize,
        pair: &ClosestPair,
        left_text: &str,
        right_text: &str,
    );

    /// The {min, max, mean, stddev} summary for one logical stage. The
    /// metric is present for comparison stages, absent for storage stages.
    fn stage_summary(&mut self, stage: Stage, metric: Option<Metric>, summary: &TimingSummary);
}
