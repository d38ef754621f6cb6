// LogTally - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogTally";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogTally";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Input
// =============================================================================

/// Log file read when neither the CLI nor config.toml names one.
pub const DEFAULT_INPUT_PATH: &str = "files/logs.txt";

/// Hard upper bound on the input file size. The whole file is held in memory
/// while parsing, so anything larger is refused up front.
pub const MAX_INPUT_FILE_SIZE: u64 = 512 * 1024 * 1024; // 512 MB

// =============================================================================
// Parsing
// =============================================================================

/// Minimum number of whitespace tokens a line needs to become a record
/// (date, time, level).
pub const MIN_LINE_TOKENS: usize = 3;

/// Maximum length of a user-supplied line pattern.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4_096;

/// Capture groups every line pattern must define.
pub const REQUIRED_PATTERN_GROUPS: &[&str] = &["date", "time", "level"];

/// Maximum number of malformed-line diagnostics retained in a report.
/// Lines past this limit are still counted, just not kept.
pub const MAX_DIAGNOSTICS: usize = 1_000;

// =============================================================================
// Levels
// =============================================================================

/// Level names accepted by the detail filter unless config.toml overrides them.
pub const DEFAULT_RECOGNISED_LEVELS: &[&str] = &["INFO", "DEBUG", "ERROR", "WARNING"];

/// Upper bound on the number of recognised levels in config.toml.
pub const MAX_RECOGNISED_LEVELS: usize = 64;

// =============================================================================
// Table rendering
// =============================================================================

/// Header of the level column.
pub const TABLE_HEADER_LEVEL: &str = "level name";

/// Header of the count column.
pub const TABLE_HEADER_COUNT: &str = "count";

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config set one.
/// Diagnostics go to stderr; "warn" keeps malformed-line reports visible
/// without drowning the report on stdout.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Maximum characters of a malformed line echoed into a diagnostic.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Exit codes
// =============================================================================

/// Run completed.
pub const EXIT_SUCCESS: i32 = 0;

/// Input, line pattern or export failure.
pub const EXIT_FAILURE: i32 = 1;

/// The requested detail level is not in the recognised set.
pub const EXIT_UNRECOGNISED_LEVEL: i32 = 2;

// =============================================================================
// Files
// =============================================================================

/// Name of the configuration file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
