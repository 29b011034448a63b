// crates/sembench-bench/src/loader.rs
//
// Flat-file corpus loading: one sentence per line, trimmed, blank lines
// skipped. Identifiers are assigned by the store as the 0-based ordinal
// among non-blank lines in file order, so re-reading the same file keeps
// identifier-based joins valid.

use std::fs;
use std::path::Path;

use sembench_core::error::BenchError;

/// Load a corpus file into ordered, trimmed, non-empty sentences.
///
/// Fails with `MissingSourceFile` when the path does not exist, and the
/// run ends without partial work.
pub fn load_sentences(path: &Path) -> Result<Vec<String>, BenchError> {
    if !path.exists() {
        return Err(BenchError::MissingSourceFile(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
