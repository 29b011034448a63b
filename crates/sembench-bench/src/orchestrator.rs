// crates/sembench-bench/src/orchestrator.rs
//
// The pipeline driver. Every phase runs strictly sequentially: each batch
// write is timed in isolation, and the comparison phase depends on all
// earlier embedding updates having committed. Any collaborator failure
// aborts the run; already-committed batches stay committed (neither
// backend offers a transactional scope).

use std::time::Instant;

use tracing::info;

use sembench_core::embedder::Embedder;
use sembench_core::error::BenchError;
use sembench_core::record::{Metric, QueryEmbedding};
use sembench_core::timing::{summarize, Stage, TimingSummary};
use sembench_core::traits::{ReportSink, SentenceStore};
use sembench_engine::{closest_pair, compare_queries, ComparisonReport};

/// What one orchestrated stage processed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageReport {
    /// Number of batches driven through the collaborator.
    pub batches: usize,
    /// Number of rows processed across all batches.
    pub rows: usize,
    /// Timing summary over the per-batch samples; `None` when the stage
    /// had nothing to do (zero samples would be an `EmptySample` error).
    pub summary: Option<TimingSummary>,
}

/// Summarize and forward a stage's samples, guarding the non-empty check
/// that `summarize` requires.
fn finish_stage(
    stage: Stage,
    metric: Option<Metric>,
    seconds: &[f64],
    sink: &mut dyn ReportSink,
) -> Result<Option<TimingSummary>, BenchError> {
    if seconds.is_empty() {
        return Ok(None);
    }
    let summary = summarize(seconds)?;
    sink.stage_summary(stage, metric, &summary);
    Ok(Some(summary))
}

/// Ingest raw sentences into storage in fixed-size batches.
///
/// One `insert_batch` call per chunk; the final partial batch is still
/// processed. Each write is timed in isolation and reported per batch,
/// with a four-number summary at the end.
pub async fn ingest(
    store: &dyn SentenceStore,
    texts: &[String],
    batch_size: usize,
    sink: &mut dyn ReportSink,
) -> Result<StageReport, BenchError> {
    if batch_size == 0 {
        return Err(BenchError::InvalidBatchSize(0));
    }

    store.create_schema().await?;

    let mut seconds = Vec::new();
    for (batch_index, chunk) in texts.chunks(batch_size).enumerate() {
        let start = Instant::now();
        store.insert_batch(chunk).await?;
        let elapsed = start.elapsed().as_secs_f64();

        seconds.push(elapsed);
        sink.batch_timing(Stage::Insert, batch_index, chunk.len(), elapsed);
        info!(
            batch = batch_index,
            rows = chunk.len(),
            seconds = elapsed,
            "inserted batch"
        );
    }

    let summary = finish_stage(Stage::Insert, None, &seconds, sink)?;
    Ok(StageReport {
        batches: seconds.len(),
        rows: texts.len(),
        summary,
    })
}

/// Embed every row that has no embedding yet and write the vectors back.
///
/// Pages through the store's missing-embedding scan, embeds one page per
/// bridge call (batching amortizes the model overhead), and times only the
/// storage write, not the embedding generation.
pub async fn embed_pending(
    store: &dyn SentenceStore,
    embedder: &dyn Embedder,
    batch_size: usize,
    sink: &mut dyn ReportSink,
) -> Result<StageReport, BenchError> {
    if batch_size == 0 {
        return Err(BenchError::InvalidBatchSize(0));
    }

    let mut seconds = Vec::new();
    let mut after_id = None;
    let mut rows = 0usize;
    let mut batch_index = 0usize;

    loop {
        let page = store.fetch_missing_embedding(after_id, batch_size).await?;
        if page.is_empty() {
            break;
        }

        let texts: Vec<String> = page.iter().map(|r| r.text.clone()).collect();
        let vectors = embedder.embed(&texts)?;
        if vectors.len() != page.len() {
            return Err(BenchError::Embedding(format!(
                "Embedder returned {} vectors for {} texts",
                vectors.len(),
                page.len()
            )));
        }
        let pairs: Vec<(i64, Vec<f32>)> =
            page.iter().map(|r| r.id).zip(vectors).collect();

        let start = Instant::now();
        store.update_embeddings(&pairs).await?;
        let elapsed = start.elapsed().as_secs_f64();

        seconds.push(elapsed);
        sink.batch_timing(Stage::EmbedUpdate, batch_index, page.len(), elapsed);
        info!(
            batch = batch_index,
            rows = page.len(),
            seconds = elapsed,
            "updated embeddings"
        );

        rows += page.len();
        after_id = page.last().map(|r| r.id);
        batch_index += 1;
    }

    let summary = finish_stage(Stage::EmbedUpdate, None, &seconds, sink)?;
    Ok(StageReport {
        batches: batch_index,
        rows,
        summary,
    })
}

/// Query the embedded corpus under both metrics.
///
/// Loads the full embedded corpus once, embeds the query set once, then
/// runs the comparison pass once per metric, forwarding ordered match
/// lists and a per-metric timing summary to the sink.
pub async fn query(
    store: &dyn SentenceStore,
    embedder: &dyn Embedder,
    queries: &[String],
    top_k: usize,
    sink: &mut dyn ReportSink,
) -> Result<Vec<ComparisonReport>, BenchError> {
    let corpus = store.fetch_embedded().await?;
    info!(corpus = corpus.len(), queries = queries.len(), "loaded corpus");

    let trimmed: Vec<String> = queries.iter().map(|q| q.trim().to_string()).collect();
    let vectors = embedder.embed(&trimmed)?;
    if vectors.len() != trimmed.len() {
        return Err(BenchError::Embedding(format!(
            "Embedder returned {} vectors for {} queries",
            vectors.len(),
            trimmed.len()
        )));
    }
    let embedded: Vec<QueryEmbedding> = trimmed
        .into_iter()
        .zip(vectors)
        .map(|(text, vector)| QueryEmbedding { text, vector })
        .collect();

    let mut reports = Vec::with_capacity(Metric::ALL.len());
    for metric in Metric::ALL {
        let report = compare_queries(&embedded, &corpus, metric, top_k)?;
        for per_query in &report.matches {
            sink.query_matches(
                metric,
                per_query.query_index,
                &embedded[per_query.query_index].text,
                &per_query.matches,
            );
        }

        let seconds: Vec<f64> = report.samples.iter().map(|s| s.seconds).collect();
        finish_stage(Stage::Compare, Some(metric), &seconds, sink)?;
        reports.push(report);
    }

    Ok(reports)
}

/// Ingestion-quality monitor: per batch, embed and report the single
/// most-similar pair under each metric.
///
/// This is a reporting mode distinct from top-k retrieval; no storage is
/// involved. One timing sample per batch per metric wraps the pairwise
/// computation.
pub async fn monitor(
    embedder: &dyn Embedder,
    texts: &[String],
    batch_size: usize,
    sink: &mut dyn ReportSink,
) -> Result<(), BenchError> {
    if batch_size == 0 {
        return Err(BenchError::InvalidBatchSize(0));
    }

    let mut cosine_seconds = Vec::new();
    let mut euclidean_seconds = Vec::new();

    for (batch_index, chunk) in texts.chunks(batch_size).enumerate() {
        let vectors = embedder.embed(chunk)?;

        for metric in Metric::ALL {
            let (pair, sample) = closest_pair(&vectors, metric)?;
            if let Some(pair) = pair {
                sink.closest_pair(
                    metric,
                    batch_index,
                    &pair,
                    &chunk[pair.left],
                    &chunk[pair.right],
                );
            }
            match metric {
                Metric::Cosine => cosine_seconds.push(sample.seconds),
                Metric::Euclidean => euclidean_seconds.push(sample.seconds),
            }
        }
        info!(batch = batch_index, rows = chunk.len(), "scanned batch");
    }

    finish_stage(Stage::Compare, Some(Metric::Cosine), &cosine_seconds, sink)?;
    finish_stage(
        Stage::Compare,
        Some(Metric::Euclidean),
        &euclidean_seconds,
        sink,
    )?;
    Ok(())
}
