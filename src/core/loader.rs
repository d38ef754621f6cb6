// LogTally - core/loader.rs
//
// Turns a sequence of raw lines into a `LogBatch`.
// Malformed lines are handed to a `DiagnosticSink` and skipped; they never
// abort the load or discard records already collected.

use crate::core::model::LogBatch;
use crate::core::parser::LineFormat;
use crate::util::constants;
use crate::util::error::ParseError;

/// Receiver for malformed-line reports, called in-line during a load.
pub trait DiagnosticSink {
    fn report(&mut self, failure: &ParseError);
}

/// Emits one WARN event per malformed line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, failure: &ParseError) {
        tracing::warn!(
            line_number = failure.line_number(),
            line = %preview(failure.line().trim()),
            "Invalid log line"
        );
    }
}

/// Keeps malformed-line reports in memory, up to `limit`.
/// `total` counts every report, including those past the limit.
#[derive(Debug, Clone)]
pub struct CollectingSink {
    pub failures: Vec<ParseError>,
    pub total: usize,
    limit: usize,
}

impl CollectingSink {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            failures: Vec::new(),
            total: 0,
            limit,
        }
    }
}

impl Default for CollectingSink {
    fn default() -> Self {
        Self::with_limit(constants::MAX_DIAGNOSTICS)
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, failure: &ParseError) {
        self.total += 1;
        if self.failures.len() < self.limit {
            self.failures.push(failure.clone());
        }
    }
}

/// Fan-out: both sinks see every report, first then second.
impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for (A, B) {
    fn report(&mut self, failure: &ParseError) {
        self.0.report(failure);
        self.1.report(failure);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, failure: &ParseError) {
        (**self).report(failure);
    }
}

/// Result of loading one input.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Parsed records in input order.
    pub batch: LogBatch,
    /// Lines consumed, valid or not.
    pub lines_processed: u64,
    /// Lines rejected as malformed.
    pub malformed: usize,
}

/// Parse every line with `format`, collecting records and reporting failures.
///
/// Lines are numbered from 1 in the order they are yielded.
pub fn load<I, S, D>(lines: I, format: &LineFormat, mut sink: D) -> LoadOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    D: DiagnosticSink,
{
    let mut outcome = LoadOutcome::default();

    for (idx, line) in lines.into_iter().enumerate() {
        let line_number = (idx as u64) + 1;
        outcome.lines_processed = line_number;

        match format.parse(line.as_ref(), line_number) {
            Ok(record) => outcome.batch.push(record),
            Err(failure) => {
                outcome.malformed += 1;
                sink.report(&failure);
            }
        }
    }

    tracing::debug!(
        format = format.name(),
        records = outcome.batch.len(),
        malformed = outcome.malformed,
        lines = outcome.lines_processed,
        "Load complete"
    );

    outcome
}

/// Truncate `line` to the configured preview length on a char boundary.
fn preview(line: &str) -> String {
    match line.char_indices().nth(constants::DEBUG_MAX_LINE_PREVIEW) {
        Some((cut, _)) => format!("{}...", &line[..cut]),
        None => line.to_string(),
    }
}
