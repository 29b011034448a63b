// crates/sembench-engine/src/compare.rs
//
// Query-vs-corpus top-k retrieval.
//
// For each query, scan every embedded corpus entry, score it, drop entries
// whose trimmed text equals the trimmed query text, and keep the top-k
// under the metric's direction. One timing sample per query wraps only the
// comparison scan.

use std::cmp::Ordering;

use serde::Serialize;

use sembench_core::error::BenchError;
use sembench_core::record::{Metric, QueryEmbedding, SentenceRecord, SimilarityMatch};
use sembench_core::timing::{time_stage, Stage, TimingSample};

use crate::metric::{check_dims, score};

/// The ordered match list for one query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryMatches {
    /// 0-based index into the query sequence.
    pub query_index: usize,
    /// Up to top-k matches, closest first.
    pub matches: Vec<SimilarityMatch>,
}

/// Result of one full comparison pass under one metric.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    /// Metric the pass ran under.
    pub metric: Metric,
    /// Per-query match lists, in query input order.
    pub matches: Vec<QueryMatches>,
    /// One sample per query, wrapping only that query's corpus scan.
    pub samples: Vec<TimingSample>,
}

/// Compare every query against the full corpus and keep the top `top_k`
/// matches per query.
///
/// Only corpus entries with a present embedding participate. An entry
/// whose trimmed text equals the trimmed query text is excluded regardless
/// of its identifier, so a duplicate row sharing the query's text never
/// matches either. Ties on equal scores keep first-seen corpus order (the
/// sort is stable); that is the documented tie-break policy.
///
/// Fails with `DimensionMismatch` before producing any results if any
/// participating embedding's length differs from the first length
/// encountered, and with `EmptyCorpus` if no corpus entry has an
/// embedding. A corpus merely smaller than `top_k` yields shorter match
/// lists, not an error.
pub fn compare_queries(
    queries: &[QueryEmbedding],
    corpus: &[SentenceRecord],
    metric: Metric,
    top_k: usize,
) -> Result<ComparisonReport, BenchError> {
    // Validate all dimensions up front so a mismatch produces no partial
    // results.
    let mut expected: Option<usize> = None;
    for query in queries {
        check_dims(&mut expected, &query.vector)?;
    }
    let mut eligible = 0usize;
    for record in corpus {
        if let Some(vector) = &record.embedding {
            check_dims(&mut expected, vector)?;
            eligible += 1;
        }
    }
    if eligible == 0 {
        return Err(BenchError::EmptyCorpus);
    }

    let mut matches = Vec::with_capacity(queries.len());
    let mut samples = Vec::with_capacity(queries.len());

    for (query_index, query) in queries.iter().enumerate() {
        let query_text = query.text.trim();

        let (scored, sample) = time_stage(Stage::Compare, || {
            let mut scored: Vec<SimilarityMatch> = Vec::new();
            for record in corpus {
                let Some(vector) = &record.embedding else {
                    continue;
                };
                // Self-match exclusion is by text, not identifier.
                if record.text.trim() == query_text {
                    continue;
                }
                scored.push(SimilarityMatch {
                    query_index,
                    candidate_id: record.id,
                    candidate_text: record.text.clone(),
                    score: score(metric, &query.vector, vector),
                    metric,
                });
            }

            scored.sort_by(|a, b| {
                let ord = a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal);
                match metric {
                    Metric::Cosine => ord.reverse(),
                    Metric::Euclidean => ord,
                }
            });
            scored.truncate(top_k);
            scored
        });

        samples.push(sample);
        matches.push(QueryMatches {
            query_index,
            matches: scored,
        });
    }

    Ok(ComparisonReport {
        metric,
        matches,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, text: &str, embedding: Vec<f32>) -> SentenceRecord {
        SentenceRecord {
            id,
            text: text.to_string(),
            embedding: Some(embedding),
        }
    }

    fn query(text: &str, vector: Vec<f32>) -> QueryEmbedding {
        QueryEmbedding {
            text: text.to_string(),
            vector,
        }
    }

    #[test]
    fn excludes_corpus_entries_sharing_query_text() {
        // Duplicate text, same vector: both copies must be excluded even
        // though their ids differ from each other and from the query.
        let corpus = vec![
            record(0, "a cat sleeps", vec![1.0, 0.0]),
            record(1, "a dog runs", vec![0.6, 0.8]),
            record(2, "a cat sleeps", vec![1.0, 0.0]),
        ];
        let queries = vec![query("a cat sleeps", vec![1.0, 0.0])];

        let report = compare_queries(&queries, &corpus, Metric::Cosine, 2).unwrap();
        let matches = &report.matches[0].matches;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].candidate_id, 1);
        assert_eq!(matches[0].candidate_text, "a dog runs");
        // v1 · v2 for unit vectors (1,0) and (0.6,0.8).
        assert!((matches[0].score - 0.6).abs() < 1e-6);
    }

    #[test]
    fn exclusion_compares_trimmed_text() {
        let corpus = vec![
            record(0, "  hello there  ", vec![1.0, 0.0]),
            record(1, "something else", vec![0.0, 1.0]),
        ];
        let queries = vec![query("hello there", vec![1.0, 0.0])];

        let report = compare_queries(&queries, &corpus, Metric::Cosine, 5).unwrap();
        let matches = &report.matches[0].matches;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].candidate_id, 1);
    }

    #[test]
    fn cosine_matches_are_ordered_descending() {
        let corpus = vec![
            record(0, "far", vec![0.0, 1.0]),
            record(1, "near", vec![1.0, 0.1]),
            record(2, "mid", vec![1.0, 1.0]),
        ];
        let queries = vec![query("probe", vec![1.0, 0.0])];

        let report = compare_queries(&queries, &corpus, Metric::Cosine, 3).unwrap();
        let matches = &report.matches[0].matches;
        assert_eq!(matches.len(), 3);
        for pair in matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(matches[0].candidate_id, 1);
        assert_eq!(matches[2].candidate_id, 0);
    }

    #[test]
    fn euclidean_matches_are_ordered_ascending() {
        let corpus = vec![
            record(0, "far", vec![10.0, 0.0]),
            record(1, "near", vec![1.1, 0.0]),
            record(2, "mid", vec![3.0, 0.0]),
        ];
        let queries = vec![query("probe", vec![1.0, 0.0])];

        let report = compare_queries(&queries, &corpus, Metric::Euclidean, 3).unwrap();
        let matches = &report.matches[0].matches;
        assert_eq!(matches.len(), 3);
        for pair in matches.windows(2) {
            assert!(pair[0].score <= pair[1].score);
        }
        assert_eq!(matches[0].candidate_id, 1);
        assert_eq!(matches[2].candidate_id, 0);
    }

    #[test]
    fn match_list_length_is_min_of_top_k_and_eligible() {
        let corpus = vec![
            record(0, "one", vec![1.0, 0.0]),
            record(1, "two", vec![0.0, 1.0]),
        ];
        let queries = vec![query("probe", vec![1.0, 1.0])];

        let report = compare_queries(&queries, &corpus, Metric::Cosine, 10).unwrap();
        assert_eq!(report.matches[0].matches.len(), 2);

        let report = compare_queries(&queries, &corpus, Metric::Cosine, 1).unwrap();
        assert_eq!(report.matches[0].matches.len(), 1);
    }

    #[test]
    fn ties_keep_first_seen_corpus_order() {
        // Two candidates at the exact same distance from the probe.
        let corpus = vec![
            record(7, "left twin", vec![0.0, 1.0]),
            record(3, "right twin", vec![0.0, -1.0]),
        ];
        let queries = vec![query("probe", vec![1.0, 0.0])];

        let report = compare_queries(&queries, &corpus, Metric::Euclidean, 2).unwrap();
        let matches = &report.matches[0].matches;
        assert_eq!(matches[0].candidate_id, 7);
        assert_eq!(matches[1].candidate_id, 3);
    }

    #[test]
    fn dimension_mismatch_fails_without_partial_results() {
        let corpus = vec![
            record(0, "one", vec![1.0, 0.0]),
            record(1, "two", vec![1.0, 0.0, 0.0]),
        ];
        let queries = vec![query("probe", vec![1.0, 0.0])];

        let err = compare_queries(&queries, &corpus, Metric::Cosine, 2).unwrap_err();
        assert!(matches!(
            err,
            BenchError::DimensionMismatch {
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn corpus_without_embeddings_is_empty_corpus() {
        let corpus = vec![SentenceRecord::new(0, "bare"), SentenceRecord::new(1, "rows")];
        let queries = vec![query("probe", vec![1.0, 0.0])];

        let err = compare_queries(&queries, &corpus, Metric::Cosine, 2).unwrap_err();
        assert!(matches!(err, BenchError::EmptyCorpus));
    }

    #[test]
    fn records_one_timing_sample_per_query() {
        let corpus = vec![record(0, "one", vec![1.0, 0.0])];
        let queries = vec![
            query("probe a", vec![1.0, 0.0]),
            query("probe b", vec![0.0, 1.0]),
            query("probe c", vec![1.0, 1.0]),
        ];

        let report = compare_queries(&queries, &corpus, Metric::Cosine, 1).unwrap();
        assert_eq!(report.samples.len(), 3);
        assert!(report
            .samples
            .iter()
            .all(|s| s.stage == Stage::Compare && s.seconds >= 0.0));
    }

    #[test]
    fn unembedded_corpus_entries_are_skipped() {
        let corpus = vec![
            SentenceRecord::new(0, "no vector yet"),
            record(1, "has vector", vec![1.0, 0.0]),
        ];
        let queries = vec![query("probe", vec![1.0, 0.0])];

        let report = compare_queries(&queries, &corpus, Metric::Cosine, 5).unwrap();
        let matches = &report.matches[0].matches;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].candidate_id, 1);
    }
}
