// LogTally - core/parser.rs
//
// Single-line parsing into `LogRecord`s.
// Core layer: pure functions over `&str`, never touches the filesystem and
// never logs. Reporting failures is the loader's job.

use crate::core::model::LogRecord;
use crate::util::constants;
use crate::util::error::{FormatError, ParseError};
use regex::Regex;

/// Strategy used to split a raw line into record fields.
///
/// Chosen once by configuration and then applied to every line of a load.
#[derive(Debug, Clone, Default)]
pub enum LineFormat {
    /// `<date> <time> <level> <message>...` separated by runs of whitespace.
    #[default]
    Whitespace,

    /// A regex with named groups `date`, `time`, `level` and optionally
    /// `message`. Built through [`LineFormat::pattern`] so the groups are
    /// guaranteed to exist.
    Pattern(Regex),
}

impl LineFormat {
    /// Compile and validate a pattern-based line format.
    ///
    /// Rejects empty or over-long patterns, patterns that fail to compile,
    /// and patterns missing any of the required named groups.
    pub fn pattern(pattern: &str) -> Result<Self, FormatError> {
        if pattern.is_empty() {
            return Err(FormatError::EmptyPattern);
        }
        if pattern.len() > constants::MAX_REGEX_PATTERN_LENGTH {
            return Err(FormatError::PatternTooLong {
                length: pattern.len(),
                max_length: constants::MAX_REGEX_PATTERN_LENGTH,
            });
        }

        let regex = Regex::new(pattern).map_err(|e| FormatError::InvalidRegex {
            pattern: pattern.to_string(),
            source: e,
        })?;

        for &group in constants::REQUIRED_PATTERN_GROUPS {
            if !regex.capture_names().flatten().any(|name| name == group) {
                return Err(FormatError::MissingGroup {
                    pattern: pattern.to_string(),
                    group,
                });
            }
        }

        Ok(Self::Pattern(regex))
    }

    /// Short name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::Pattern(_) => "pattern",
        }
    }

    /// Parse one line. `line_number` is carried into the record or the error.
    pub fn parse(&self, line: &str, line_number: u64) -> Result<LogRecord, ParseError> {
        let parsed = match self {
            Self::Whitespace => split_whitespace_fields(line),
            Self::Pattern(regex) => capture_fields(regex, line),
        };

        parsed
            .map(|(date, time, level, message)| LogRecord {
                line_number,
                date,
                time,
                level,
                message,
            })
            .ok_or_else(|| ParseError::MalformedLine {
                line_number,
                line: line.to_string(),
            })
    }
}

type Fields = (String, String, String, String);

fn split_whitespace_fields(line: &str) -> Option<Fields> {
    let tokens: Vec<&str> = line
        .split(is_field_separator)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() < constants::MIN_LINE_TOKENS {
        return None;
    }
    let message = tokens[constants::MIN_LINE_TOKENS..].join(" ");
    Some((
        tokens[0].to_string(),
        tokens[1].to_string(),
        tokens[2].to_string(),
        message,
    ))
}

/// Unicode whitespace plus the ASCII information separators U+001C..=U+001F.
fn is_field_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

fn capture_fields(regex: &Regex, line: &str) -> Option<Fields> {
    let caps = regex.captures(line)?;
    let field = |name: &str| {
        caps.name(name)
            .map(|m| m.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    };
    let date = field("date")?;
    let time = field("time")?;
    let level = field("level")?;
    let message = caps
        .name("message")
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    Some((date, time, level, message))
}

/// Parse one line with the default whitespace format.
///
/// The record's `line_number` is 0; use [`LineFormat::parse`] or the loader
/// when line numbers matter.
pub fn parse_line(line: &str) -> Result<LogRecord, ParseError> {
    LineFormat::Whitespace.parse(line, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_line() {
        let record = parse_line("2024-01-10 14:32:01 ERROR disk write failed").unwrap();
        assert_eq!(record.date, "2024-01-10");
        assert_eq!(record.time, "14:32:01");
        assert_eq!(record.level, "ERROR");
        assert_eq!(record.message, "disk write failed");
    }

    #[test]
    fn test_parse_collapses_whitespace_runs_in_message() {
        let record = parse_line("  2024-01-10\t14:32:01   INFO   a \t b   c \n").unwrap();
        assert_eq!(record.date, "2024-01-10");
        assert_eq!(record.level, "INFO");
        assert_eq!(record.message, "a b c");
    }

    #[test]
    fn test_parse_exactly_three_tokens_gives_empty_message() {
        let record = parse_line("2024-01-10 14:32:01 DEBUG").unwrap();
        assert_eq!(record.level, "DEBUG");
        assert_eq!(record.message, "");
    }

    #[test]
    fn test_parse_keeps_level_casing() {
        let record = parse_line("d t warning something").unwrap();
        assert_eq!(record.level, "warning");
    }

    #[test]
    fn test_parse_short_lines_fail_with_original_text() {
        for line in ["", "   ", "bad line", "one", "2024-01-10 14:32:01\n"] {
            let err = parse_line(line).unwrap_err();
            assert_eq!(err.line(), line, "line {line:?} should fail verbatim");
        }
    }

    #[test]
    fn test_parse_message_matches_token_tail() {
        let lines = [
            "a b c",
            "a b c d",
            "a   b c d e f",
            "\ta b\tc  d  e",
        ];
        for line in lines {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let record = parse_line(line).unwrap();
            assert_eq!(record.message, tokens[3..].join(" "));
        }
    }

    #[test]
    fn test_line_number_is_carried() {
        let record = LineFormat::Whitespace.parse("d t INFO x", 42).unwrap();
        assert_eq!(record.line_number, 42);
        let err = LineFormat::Whitespace.parse("bad", 43).unwrap_err();
        assert_eq!(err.line_number(), 43);
    }

    #[test]
    fn test_pattern_format_extracts_groups() {
        let format = LineFormat::pattern(
            r"^\[(?P<date>[^ ]+) (?P<time>[^\]]+)\] (?P<level>\w+): ?(?P<message>.*)$",
        )
        .unwrap();
        let record = format
            .parse("[2024-01-10 10:00:00] WARNING: low disk", 1)
            .unwrap();
        assert_eq!(record.date, "2024-01-10");
        assert_eq!(record.time, "10:00:00");
        assert_eq!(record.level, "WARNING");
        assert_eq!(record.message, "low disk");
        assert_eq!(format.name(), "pattern");
    }

    #[test]
    fn test_pattern_format_without_message_group() {
        let format =
            LineFormat::pattern(r"^(?P<date>[^|]+)\|(?P<time>[^|]+)\|(?P<level>[^|]+)").unwrap();
        let record = format.parse("d|t|INFO|rest", 1).unwrap();
        assert_eq!(record.message, "");
    }

    #[test]
    fn test_pattern_format_non_matching_line_fails() {
        let format =
            LineFormat::pattern(r"^(?P<date>\S+) (?P<time>\S+) (?P<level>[A-Z]+)").unwrap();
        assert!(format.parse("not a log line", 5).is_err());
    }

    #[test]
    fn test_pattern_format_empty_required_capture_fails() {
        let format =
            LineFormat::pattern(r"^(?P<date>\S*),(?P<time>\S*),(?P<level>\S*)").unwrap();
        assert!(format.parse(",t,INFO", 1).is_err());
    }

    #[test]
    fn test_pattern_validation() {
        assert!(matches!(
            LineFormat::pattern(""),
            Err(FormatError::EmptyPattern)
        ));
        assert!(matches!(
            LineFormat::pattern("(?P<date>"),
            Err(FormatError::InvalidRegex { .. })
        ));
        assert!(matches!(
            LineFormat::pattern(r"(?P<date>\S+) (?P<time>\S+)"),
            Err(FormatError::MissingGroup { group: "level", .. })
        ));
        let long = "a".repeat(constants::MAX_REGEX_PATTERN_LENGTH + 1);
        assert!(matches!(
            LineFormat::pattern(&long),
            Err(FormatError::PatternTooLong { .. })
        ));
    }

    #[test]
    fn test_pattern_format_blank_level_capture_fails() {
        let format =
            LineFormat::pattern(r"^(?P<date>\S+) (?P<time>\S+) (?P<level>[A-Z ]+):(?P<message>.*)$")
                .unwrap();
        assert!(format.parse("d t  :x", 1).is_err());
        assert_eq!(format.parse("d t WARN:x", 2).unwrap().level, "WARN");
    }

    #[test]
    fn test_information_separators_split_fields() {
        let record = parse_line("a\u{1f}b c INFO x\u{1c}y").unwrap();
        assert_eq!(record.date, "a");
        assert_eq!(record.time, "b");
        assert_eq!(record.level, "c");
        assert_eq!(record.message, "INFO x y");

        let err = parse_line("a\u{1d}b").unwrap_err();
        assert_eq!(err.line(), "a\u{1d}b");
    }
}
