// crates/sembench-engine/src/pairwise.rs
//
// Intra-batch closest-pair scan: a monitoring mode that reports the
// single most-similar unordered pair within one batch of embeddings.

use sembench_core::error::BenchError;
use sembench_core::record::{ClosestPair, Metric};
use sembench_core::timing::{time_stage, Stage, TimingSample};

use crate::metric::{check_dims, score};

/// Find the globally most-similar unordered pair (j, k), j < k, within one
/// batch of embeddings.
///
/// Builds the full N×N score matrix first and then scans the upper
/// triangle, so the timing sample covers the whole pairwise computation
/// for the batch. Ties keep the first pair encountered in (j, k) scan
/// order. Fewer than two vectors yields `None`. Fails with
/// `DimensionMismatch` if the vectors disagree on length.
pub fn closest_pair(
    embeddings: &[Vec<f32>],
    metric: Metric,
) -> Result<(Option<ClosestPair>, TimingSample), BenchError> {
    let mut expected: Option<usize> = None;
    for vector in embeddings {
        check_dims(&mut expected, vector)?;
    }

    let (best, sample) = time_stage(Stage::Compare, || {
        let n = embeddings.len();
        let mut matrix = vec![0.0_f64; n * n];
        for j in 0..n {
            for k in 0..n {
                matrix[j * n + k] = score(metric, &embeddings[j], &embeddings[k]);
            }
        }

        let mut best: Option<ClosestPair> = None;
        for j in 0..n {
            for k in (j + 1)..n {
                let pair_score = matrix[j * n + k];
                let closer = match best {
                    Some(current) => metric.closer(pair_score, current.score),
                    None => true,
                };
                if closer {
                    best = Some(ClosestPair {
                        left: j,
                        right: k,
                        score: pair_score,
                    });
                }
            }
        }
        best
    });

    Ok((best, sample))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_most_similar_cosine_pair() {
        let embeddings = vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.99, 0.05],
        ];
        let (pair, sample) = closest_pair(&embeddings, Metric::Cosine).unwrap();
        let pair = pair.unwrap();
        assert_eq!((pair.left, pair.right), (0, 2));
        assert!(pair.score > 0.9);
        assert_eq!(sample.stage, Stage::Compare);
    }

    #[test]
    fn finds_closest_euclidean_pair() {
        let embeddings = vec![
            vec![0.0, 0.0],
            vec![10.0, 10.0],
            vec![0.1, 0.0],
        ];
        let (pair, _) = closest_pair(&embeddings, Metric::Euclidean).unwrap();
        let pair = pair.unwrap();
        assert_eq!((pair.left, pair.right), (0, 2));
        assert!((pair.score - 0.1).abs() < 1e-6);
    }

    #[test]
    fn fewer_than_two_vectors_yields_none() {
        let (pair, _) = closest_pair(&[], Metric::Cosine).unwrap();
        assert!(pair.is_none());

        let (pair, _) = closest_pair(&[vec![1.0, 0.0]], Metric::Cosine).unwrap();
        assert!(pair.is_none());
    }

    #[test]
    fn ties_keep_first_pair_in_scan_order() {
        // Three identical vectors: every pair scores the same.
        let embeddings = vec![vec![1.0, 0.0]; 3];
        let (pair, _) = closest_pair(&embeddings, Metric::Euclidean).unwrap();
        let pair = pair.unwrap();
        assert_eq!((pair.left, pair.right), (0, 1));
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let embeddings = vec![vec![1.0, 0.0], vec![1.0, 0.0, 0.0]];
        let err = closest_pair(&embeddings, Metric::Cosine).unwrap_err();
        assert!(matches!(err, BenchError::DimensionMismatch { .. }));
    }
}
