// LogTally - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Running the pipeline and printing the report
//
// Exit codes: 0 success, 1 fatal error, 2 unrecognised detail level.

use clap::Parser;
use logtally::app::pipeline::{self, RunRequest};
use logtally::platform::config::{self, PlatformPaths};
use logtally::util;
use std::path::PathBuf;

/// LogTally - count log lines per level and show details for one level.
///
/// Each input line is `<date> <time> <level> <message>...`. Lines with fewer
/// than three fields are reported and skipped.
#[derive(Parser, Debug)]
#[command(name = "logtally", version, about)]
struct Cli {
    /// Log file to read (defaults to [input] default_path, then files/logs.txt).
    path: Option<PathBuf>,

    /// Level to show detail lines for (case-insensitive, e.g. error).
    level: Option<String>,

    /// Config file to use instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Regex with named groups date, time, level and optional message.
    #[arg(short = 'p', long = "pattern")]
    pattern: Option<String>,

    /// Also write the parsed records as CSV to this path.
    #[arg(long = "export-csv")]
    export_csv: Option<PathBuf>,

    /// Also write the summary as JSON to this path.
    #[arg(long = "export-json")]
    export_json: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file);
    let (app_config, config_warnings) = config::load_config(&config_path);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::debug!(
        version = util::constants::APP_VERSION,
        config = %config_path.display(),
        "LogTally starting"
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    let request = RunRequest {
        input: cli.path,
        level: cli.level,
        line_pattern: cli.pattern,
        export_csv: cli.export_csv,
        export_json: cli.export_json,
    };

    let report = match pipeline::run(&request, &app_config) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("Error: {e}");
            std::process::exit(util::constants::EXIT_FAILURE);
        }
    };

    let output = pipeline::format_report(&report);
    print!("{}", output.stdout);
    if let Some(message) = &output.stderr {
        eprintln!("{message}");
    }
    std::process::exit(output.exit_code);
}
