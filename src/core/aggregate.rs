// LogTally - core/aggregate.rs
//
// Per-level record counting. Core layer: pure logic.

use crate::core::model::{LevelCounts, LogRecord};

/// Count records by their stored level in a single pass.
///
/// Levels are keyed verbatim (no case folding) and appear in the order they
/// were first seen. Levels absent from `records` are absent from the result.
pub fn count_by_level(records: &[LogRecord]) -> LevelCounts {
    let mut counts = LevelCounts::default();
    for record in records {
        counts.increment(&record.level);
    }
    counts
}
