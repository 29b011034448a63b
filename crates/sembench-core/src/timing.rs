// crates/sembench-core/src/timing.rs
//
// Scoped wall-clock timing and the four-number latency summary
// ({min, max, mean, stddev}) reported per pipeline stage.

use std::fmt;
use std::time::Instant;

use serde::Serialize;

use crate::error::BenchError;

/// The pipeline stage a timing sample was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    /// Raw sentence rows written to storage.
    Insert,
    /// Embedding vectors written back to storage.
    EmbedUpdate,
    /// A similarity comparison pass (per query, or per batch in the
    /// intra-batch mode).
    Compare,
}

impl Stage {
    /// Stable short tag for logs and report keys.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Insert => "insertion",
            Stage::EmbedUpdate => "embedding-update",
            Stage::Compare => "comparison",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single non-negative duration in seconds, tagged with its stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingSample {
    pub stage: Stage,
    pub seconds: f64,
}

/// Run `body` and measure only its execution on the monotonic clock.
///
/// Returns the body's result together with the elapsed seconds. Setup and
/// teardown around the call site are deliberately outside the measurement.
pub fn time<T>(body: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let out = body();
    (out, start.elapsed().as_secs_f64())
}

/// Like [`time`], but tags the elapsed duration with its stage.
pub fn time_stage<T>(stage: Stage, body: impl FnOnce() -> T) -> (T, TimingSample) {
    let (out, seconds) = time(body);
    (out, TimingSample { stage, seconds })
}

/// Four-number summary of a set of timing samples, all in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub stddev: f64,
}

/// Summarize a non-empty set of durations.
///
/// `stddev` is the sample (N-1 denominator) standard deviation and is
/// defined as 0.0 when there is exactly one sample. That single-sample rule
/// is a deliberate choice, not a degenerate case to reject. Zero samples is
/// an `EmptySample` error; callers guard with a non-empty check.
pub fn summarize(samples: &[f64]) -> Result<TimingSummary, BenchError> {
    if samples.is_empty() {
        return Err(BenchError::EmptySample);
    }

    let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;

    let stddev = if samples.len() > 1 {
        let variance = samples
            .iter()
            .map(|s| (s - mean) * (s - mean))
            .sum::<f64>()
            / (samples.len() - 1) as f64;
        variance.sqrt()
    } else {
        0.0
    };

    Ok(TimingSummary {
        min,
        max,
        mean,
        stddev,
    })
}
