// crates/sembench-core/src/embedder.rs

use crate::error::BenchError;

/// The embedding bridge: text in, fixed-dimension vectors out.
///
/// Output must have the same length and order as the input, with constant
/// dimensionality for the lifetime of one instance, and must be
/// deterministic per instance. Determinism is assumed by the benchmark,
/// not verified.
pub trait Embedder: Send + Sync {
    /// Output dimensionality of every vector this instance produces.
    fn dimensions(&self) -> usize;

    /// Embed a batch of texts in order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, BenchError>;
}

/// Deterministic pseudo-embedder: hash text + dimension index to produce a
/// reproducible float vector, then L2-normalize. Identical text always
/// yields an identical vector (cosine similarity ~1.0). No ML model
/// required, which keeps the benchmark self-contained and repeatable.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    /// Create an embedder producing vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        use sha2::{Digest, Sha256};

        let mut raw = Vec::with_capacity(self.dimensions);
        for i in 0..self.dimensions {
            let mut hasher = Sha256::new();
            hasher.update(text.as_bytes());
            hasher.update(i.to_le_bytes());
            let hash = hasher.finalize();
            // Interpret first 4 bytes as u32, map to [-1, 1]
            let bits = u32::from_le_bytes([hash[0], hash[1], hash[2], hash[3]]);
            let val = (bits as f64 / u32::MAX as f64) * 2.0 - 1.0;
            raw.push(val as f32);
        }

        // L2-normalize
        let norm: f32 = raw.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in raw.iter_mut() {
                *v /= norm;
            }
        }

        raw
    }
}

impl Embedder for HashEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, BenchError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}
