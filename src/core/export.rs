// LogTally - core/export.rs
//
// CSV export of parsed records and JSON export of the report summary.
// Core layer: writes to any Write trait object.

use crate::core::model::{LogRecord, ReportSummary};
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export records to CSV.
///
/// Writes: line, date, time, level, message. Returns the number of records.
pub fn export_records_csv<W: Write>(
    records: &[LogRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["line", "date", "time", "level", "message"])
        .map_err(csv_err)?;

    for record in records {
        csv_writer
            .write_record([
                record.line_number.to_string().as_str(),
                record.date.as_str(),
                record.time.as_str(),
                record.level.as_str(),
                record.message.as_str(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(records.len())
}

/// Export the report summary as pretty-printed JSON.
pub fn export_summary_json<W: Write>(
    summary: &ReportSummary,
    writer: W,
    export_path: &Path,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, summary).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })
}
