// LogTally - app/pipeline.rs
//
// Orchestrates one run: read input, load records, count, render, filter,
// and optionally export. All configuration arrives explicitly through
// `RunRequest` and `AppConfig`; nothing here reads global state.
//
// Failure policy:
//   - Malformed lines are non-fatal; they are logged and counted.
//   - An unrecognised filter level does not prevent the table from being
//     produced; it is carried in `Report::details` for the caller to report.
//   - Only input acquisition, an invalid line pattern, and export I/O are fatal.

use crate::core::aggregate::count_by_level;
use crate::core::export;
use crate::core::filter::{filter_checked, LevelPolicy};
use crate::core::loader::{self, CollectingSink, TracingSink};
use crate::core::model::{LogBatch, ReportSummary};
use crate::core::parser::LineFormat;
use crate::core::table::render_counts;
use crate::platform::config::AppConfig;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{ExportError, FilterError, FormatError, ParseError, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// What the caller asked for on this run.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Input file; falls back to `AppConfig::default_input`.
    pub input: Option<PathBuf>,

    /// Level to show detail lines for.
    pub level: Option<String>,

    /// Line pattern overriding the configured one.
    pub line_pattern: Option<String>,

    /// Write parsed records as CSV here.
    pub export_csv: Option<PathBuf>,

    /// Write the summary as JSON here.
    pub export_json: Option<PathBuf>,
}

/// Detail lines for one accepted level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDetails {
    /// Upper-cased level that was matched.
    pub level: String,
    /// `<date> <time> - <message>` lines in input order.
    pub lines: Vec<String>,
}

/// Everything produced by one run.
#[derive(Debug)]
pub struct Report {
    /// Input file that was processed.
    pub input: PathBuf,

    /// Rendered level-count table.
    pub table: String,

    /// Line and per-level statistics.
    pub summary: ReportSummary,

    /// Parsed records in input order.
    pub records: LogBatch,

    /// `None` when no level was requested; `Err` when it was rejected.
    pub details: Option<std::result::Result<LevelDetails, FilterError>>,

    /// Retained malformed-line reports (capped at `MAX_DIAGNOSTICS`).
    pub diagnostics: Vec<ParseError>,
}

/// Pick the line format: request override, then config, then whitespace.
pub fn resolve_line_format(
    request: &RunRequest,
    config: &AppConfig,
) -> std::result::Result<LineFormat, FormatError> {
    match request
        .line_pattern
        .as_deref()
        .or(config.line_pattern.as_deref())
    {
        Some(pattern) => LineFormat::pattern(pattern),
        None => Ok(LineFormat::Whitespace),
    }
}

/// Run the whole pipeline against the file system.
pub fn run(request: &RunRequest, config: &AppConfig) -> Result<Report> {
    let input = request
        .input
        .clone()
        .unwrap_or_else(|| config.default_input.clone());
    let format = resolve_line_format(request, config)?;
    let policy = LevelPolicy::new(&config.recognised_levels);

    tracing::info!(
        path = %input.display(),
        format = format.name(),
        requested_level = request.level.as_deref().unwrap_or("-"),
        "Processing log file"
    );

    let lines = fs::read_lines(&input, constants::MAX_INPUT_FILE_SIZE)?;
    let report = process(input, &lines, &format, request.level.as_deref(), &policy);

    if let Some(path) = &request.export_csv {
        write_csv(&report, path)?;
    }
    if let Some(path) = &request.export_json {
        write_json(&report, path)?;
    }

    Ok(report)
}

/// Run the in-memory part of the pipeline over already-read lines.
///
/// An empty `level` counts as no level requested.
pub fn process<S: AsRef<str>>(
    input: PathBuf,
    lines: &[S],
    format: &LineFormat,
    level: Option<&str>,
    policy: &LevelPolicy,
) -> Report {
    let mut collected = CollectingSink::with_limit(constants::MAX_DIAGNOSTICS);
    let outcome = loader::load(lines, format, (TracingSink, &mut collected));

    let counts = count_by_level(&outcome.batch);
    let table = render_counts(&counts);

    let details = level.filter(|l| !l.is_empty()).map(|requested| {
        filter_checked(&outcome.batch, requested, policy).map(|lines| LevelDetails {
            level: requested.to_uppercase(),
            lines,
        })
    });

    if let Some(Err(e)) = &details {
        tracing::warn!(error = %e, "Detail level rejected");
    }

    let summary = ReportSummary {
        total_lines: outcome.lines_processed,
        parsed: outcome.batch.len(),
        malformed: outcome.malformed,
        counts,
    };

    tracing::info!(
        parsed = summary.parsed,
        malformed = summary.malformed,
        levels = summary.counts.len(),
        "Processing complete"
    );

    Report {
        input,
        table,
        summary,
        records: outcome.batch,
        details,
        diagnostics: collected.failures,
    }
}

/// Terminal output for a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutput {
    /// Table, then the detail heading and lines when a level was accepted.
    pub stdout: String,
    /// Rejection message for an unrecognised level.
    pub stderr: Option<String>,
    /// `EXIT_SUCCESS` or `EXIT_UNRECOGNISED_LEVEL`.
    pub exit_code: i32,
}

/// Lay out a report for the terminal and pick the process exit code.
pub fn format_report(report: &Report) -> ReportOutput {
    let mut stdout = report.table.clone();
    stdout.push('\n');

    match &report.details {
        None => ReportOutput {
            stdout,
            stderr: None,
            exit_code: constants::EXIT_SUCCESS,
        },
        Some(Ok(details)) => {
            stdout.push_str(&format!("\nLog details for level '{}':\n", details.level));
            for line in &details.lines {
                stdout.push_str(line);
                stdout.push('\n');
            }
            ReportOutput {
                stdout,
                stderr: None,
                exit_code: constants::EXIT_SUCCESS,
            }
        }
        Some(Err(e)) => ReportOutput {
            stdout,
            stderr: Some(format!("Error: {e}")),
            exit_code: constants::EXIT_UNRECOGNISED_LEVEL,
        },
    }
}

fn create_export(path: &Path) -> std::result::Result<BufWriter<File>, ExportError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| ExportError::Io {
            path: path.to_path_buf(),
            source: e,
        })
}

fn write_csv(report: &Report, path: &Path) -> Result<()> {
    let writer = create_export(path)?;
    let count = export::export_records_csv(&report.records, writer, path)?;
    tracing::info!(path = %path.display(), records = count, "CSV export written");
    Ok(())
}

fn write_json(report: &Report, path: &Path) -> Result<()> {
    let mut writer = create_export(path)?;
    export::export_summary_json(&report.summary, &mut writer, path)?;
    std::io::Write::flush(&mut writer).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), "JSON export written");
    Ok(())
}
