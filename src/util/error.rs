// LogTally - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Each subsystem owns one enum; all of them convert into `LogTallyError`.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogTally operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogTallyError {
    /// A line format (pattern) is invalid.
    Format(FormatError),

    /// A filter request was rejected.
    Filter(FilterError),

    /// Export operation failed.
    Export(ExportError),

    /// The input path exists but is not a regular file.
    InputNotAFile { path: PathBuf },

    /// The input file exceeds the in-memory size limit.
    InputTooLarge { path: PathBuf, size: u64, max_size: u64 },

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LogTallyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(e) => write!(f, "Line format error: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::InputNotAFile { path } => {
                write!(f, "The specified path is not a valid file: {}", path.display())
            }
            Self::InputTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Input '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LogTallyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            Self::InputNotAFile { .. } | Self::InputTooLarge { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Errors related to parsing a single log line.
///
/// Never fatal: the loader reports and counts these, so they do not convert
/// into `LogTallyError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line does not yield date, time and level fields.
    /// `line` is the original, un-trimmed text.
    MalformedLine { line_number: u64, line: String },
}

impl ParseError {
    /// Original text of the offending line.
    pub fn line(&self) -> &str {
        match self {
            Self::MalformedLine { line, .. } => line,
        }
    }

    /// 1-based line number of the offending line (0 when parsed standalone).
    pub fn line_number(&self) -> u64 {
        match self {
            Self::MalformedLine { line_number, .. } => *line_number,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine { line_number, line } => {
                write!(f, "line {line_number}: invalid log line: {}", line.trim())
            }
        }
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Line format errors
// ---------------------------------------------------------------------------

/// Errors related to building a pattern-based line format.
#[derive(Debug)]
pub enum FormatError {
    /// The pattern string is empty.
    EmptyPattern,

    /// The pattern exceeds the maximum allowed length.
    PatternTooLong { length: usize, max_length: usize },

    /// The pattern does not compile.
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },

    /// A required named capture group is missing from the pattern.
    MissingGroup { pattern: String, group: &'static str },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPattern => write!(f, "line pattern is empty"),
            Self::PatternTooLong { length, max_length } => write!(
                f,
                "line pattern is {length} chars, exceeds maximum of {max_length}"
            ),
            Self::InvalidRegex { pattern, source } => {
                write!(f, "invalid line pattern '{pattern}': {source}")
            }
            Self::MissingGroup { pattern, group } => write!(
                f,
                "line pattern '{pattern}' has no named capture group '{group}'"
            ),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<FormatError> for LogTallyError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to filter requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The requested level is outside the recognised set.
    UnrecognizedLevel { level: String, allowed: Vec<String> },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedLevel { level, allowed } => write!(
                f,
                "unrecognised level '{level}' (expected one of: {})",
                allowed.join(", ")
            ),
        }
    }
}

impl std::error::Error for FilterError {}

impl From<FilterError> for LogTallyError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for LogTallyError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for LogTally results.
pub type Result<T> = std::result::Result<T, LogTallyError>;
