// crates/sembench-engine/src/metric.rs
//
// Scalar scoring kernels. Accumulation happens in f64 so that long
// vectors of small f32 components do not lose precision.

use sembench_core::error::BenchError;
use sembench_core::record::Metric;

/// Compute cosine similarity between two vectors of equal length.
///
/// Returns a value in [-1.0, 1.0]. Returns 0.0 if either vector has zero
/// magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }

    dot / denom
}

/// Compute the L2 norm of the difference between two vectors of equal
/// length.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    let mut sum = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let d = *x as f64 - *y as f64;
        sum += d * d;
    }
    sum.sqrt()
}

/// Score a pair of vectors under the given metric.
pub fn score(metric: Metric, a: &[f32], b: &[f32]) -> f64 {
    match metric {
        Metric::Cosine => cosine_similarity(a, b),
        Metric::Euclidean => euclidean_distance(a, b),
    }
}

/// Validate a vector's length against the first length encountered.
///
/// `expected` starts as `None`; the first vector seen sets it. Any later
/// vector of a different length is a `DimensionMismatch`.
pub(crate) fn check_dims(expected: &mut Option<usize>, vector: &[f32]) -> Result<(), BenchError> {
    match *expected {
        Some(dim) if dim != vector.len() => Err(BenchError::DimensionMismatch {
            expected: dim,
            found: vector.len(),
        }),
        Some(_) => Ok(()),
        None => {
            *expected = Some(vector.len());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_identical_vectors() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-10);
    }

    #[test]
    fn cosine_orthogonal_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-10);
    }

    #[test]
    fn cosine_opposite_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-10);
    }

    #[test]
    fn cosine_zero_vector() {
        let a = vec![1.0, 2.0];
        let b = vec![0.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn euclidean_identical_vectors_is_zero() {
        let v = vec![0.5, -0.5, 2.0];
        assert_eq!(euclidean_distance(&v, &v), 0.0);
    }

    #[test]
    fn euclidean_unit_axes() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!((euclidean_distance(&a, &b) - 2.0f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn euclidean_known_distance() {
        let a = vec![0.0, 0.0];
        let b = vec![3.0, 4.0];
        assert!((euclidean_distance(&a, &b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn check_dims_first_vector_sets_expectation() {
        let mut expected = None;
        check_dims(&mut expected, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(expected, Some(3));
        check_dims(&mut expected, &[4.0, 5.0, 6.0]).unwrap();
        let err = check_dims(&mut expected, &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            BenchError::DimensionMismatch {
                expected: 3,
                found: 1
            }
        ));
    }
}
