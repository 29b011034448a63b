// crates/sembench-cli/src/sink.rs
//
// Console implementation of the reporting collaborator.
// Supports table and JSON-lines output modes.

use tabled::{Table, Tabled};

use sembench_core::record::{ClosestPair, Metric, SimilarityMatch};
use sembench_core::timing::{Stage, TimingSummary};
use sembench_core::traits::ReportSink;

/// One row of a per-query match table.
#[derive(Tabled)]
struct MatchRow {
    rank: usize,
    id: i64,
    score: String,
    sentence: String,
}

/// One row of a stage summary table.
#[derive(Tabled)]
struct SummaryRow {
    stage: String,
    min: String,
    max: String,
    mean: String,
    stddev: String,
}

/// Report sink that prints to stdout.
pub struct ConsoleSink {
    json: bool,
}

impl ConsoleSink {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl ReportSink for ConsoleSink {
    fn batch_timing(&mut self, stage: Stage, batch_index: usize, rows: usize, seconds: f64) {
        if self.json {
            println!(
                "{}",
                serde_json::json!({
                    "event": "batch",
                    "stage": stage.label(),
                    "batch": batch_index,
                    "rows": rows,
                    "seconds": seconds,
                })
            );
        } else {
            println!(
                "{} batch {} ({} rows): {:.4} s",
                stage, batch_index, rows, seconds
            );
        }
    }

    fn query_matches(
        &mut self,
        metric: Metric,
        query_index: usize,
        query_text: &str,
        matches: &[SimilarityMatch],
    ) {
        if self.json {
            println!(
                "{}",
                serde_json::json!({
                    "event": "matches",
                    "metric": metric,
                    "query_index": query_index,
                    "query_text": query_text,
                    "matches": matches,
                })
            );
            return;
        }

        println!();
        println!("Query {}: \"{}\" ({})", query_index + 1, query_text, metric);
        if matches.is_empty() {
            println!("  (no matches)");
            return;
        }

        let rows: Vec<MatchRow> = matches
            .iter()
            .enumerate()
            .map(|(rank, m)| MatchRow {
                rank: rank + 1,
                id: m.candidate_id,
                score: format!("{:.4}", m.score),
                sentence: m.candidate_text.clone(),
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    fn closest_pair(
        &mut self,
        metric: Metric,
        batch_index: usize,
        pair: &ClosestPair,
        left_text: &str,
        right_text: &str,
    ) {
        if self.json {
            println!(
                "{}",
                serde_json::json!({
                    "event": "closest_pair",
                    "metric": metric,
                    "batch": batch_index,
                    "left": pair.left,
                    "right": pair.right,
                    "score": pair.score,
                    "left_text": left_text,
                    "right_text": right_text,
                })
            );
            return;
        }

        println!();
        println!(
            "Batch {} — closest pair under {} (score {:.4}):",
            batch_index, metric, pair.score
        );
        println!("  [{}] \"{}\"", pair.left + 1, left_text);
        println!("  [{}] \"{}\"", pair.right + 1, right_text);
    }

    fn stage_summary(&mut self, stage: Stage, metric: Option<Metric>, summary: &TimingSummary) {
        let label = match metric {
            Some(metric) => format!("{} ({})", stage, metric),
            None => stage.to_string(),
        };

        if self.json {
            println!(
                "{}",
                serde_json::json!({
                    "event": "summary",
                    "stage": stage.label(),
                    "metric": metric,
                    "min": summary.min,
                    "max": summary.max,
                    "mean": summary.mean,
                    "stddev": summary.stddev,
                })
            );
            return;
        }

        let row = SummaryRow {
            stage: label,
            min: format!("{:.4} s", summary.min),
            max: format!("{:.4} s", summary.max),
            mean: format!("{:.4} s", summary.mean),
            stddev: format!("{:.4} s", summary.stddev),
        };
        println!();
        println!("{}", Table::new([row]));
    }
}
