// LogTally - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies. These types are the shared vocabulary across
// all layers.

use serde::Serialize;
use std::collections::HashMap;

// =============================================================================
// Log Record (output of parsing)
// =============================================================================

/// A single parsed log line.
///
/// All fields are stored verbatim: `date` and `time` are never validated and
/// `level` keeps whatever casing the source line used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// 1-based line number in the input. Diagnostic metadata only.
    pub line_number: u64,

    /// First token of the line.
    pub date: String,

    /// Second token of the line.
    pub time: String,

    /// Third token of the line (severity level).
    pub level: String,

    /// Remaining tokens joined by single spaces; empty when there are none.
    pub message: String,
}

/// Ordered records from one load, in input order.
pub type LogBatch = Vec<LogRecord>;

// =============================================================================
// Level counts
// =============================================================================

/// Occurrence count for one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelCount {
    pub level: String,
    pub count: usize,
}

/// Per-level record counts, iterated in the order levels were first seen.
///
/// Built by `core::aggregate::count_by_level` (or collected from pairs) and
/// never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelCounts {
    entries: Vec<LevelCount>,
    index: HashMap<String, usize>,
}

impl LevelCounts {
    /// Add one occurrence of `level`, appending it if unseen.
    pub(crate) fn increment(&mut self, level: &str) {
        self.add(level, 1);
    }

    fn add(&mut self, level: &str, n: usize) {
        match self.index.get(level) {
            Some(&pos) => self.entries[pos].count += n,
            None => {
                self.index.insert(level.to_string(), self.entries.len());
                self.entries.push(LevelCount {
                    level: level.to_string(),
                    count: n,
                });
            }
        }
    }

    /// Count for `level` (exact, case-sensitive), `None` if never seen.
    pub fn get(&self, level: &str) -> Option<usize> {
        self.index.get(level).map(|&pos| self.entries[pos].count)
    }

    /// Iterate `(level, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|e| (e.level.as_str(), e.count))
    }

    /// Number of distinct levels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

impl<S: AsRef<str>> FromIterator<(S, usize)> for LevelCounts {
    /// Collect pairs in order; a repeated level adds to its earlier entry.
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut counts = LevelCounts::default();
        for (level, n) in iter {
            counts.add(level.as_ref(), n);
        }
        counts
    }
}

impl Serialize for LevelCounts {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

// =============================================================================
// Report summary
// =============================================================================

/// Summary statistics for one processed input.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportSummary {
    /// Physical lines read from the input.
    pub total_lines: u64,

    /// Lines that produced a record.
    pub parsed: usize,

    /// Lines rejected as malformed.
    pub malformed: usize,

    /// Records per level, first-seen order.
    pub counts: LevelCounts,
}
