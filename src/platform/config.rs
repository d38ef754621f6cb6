// LogTally - platform/config.rs
//
// Platform-specific config directory resolution and config.toml loading
// with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogTally configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// config.toml inside the platform configuration directory
    /// (e.g. ~/.config/logtally/ or %APPDATA%\LogTally\).
    pub config_file: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        let config_dir = match ProjectDirs::from("", "", constants::APP_ID) {
            Some(proj_dirs) => proj_dirs.config_dir().to_path_buf(),
            None => {
                tracing::warn!(
                    "Could not determine platform directories, using current directory"
                );
                PathBuf::from(".")
            }
        };
        let config_file = config_dir.join(constants::CONFIG_FILE_NAME);

        tracing::debug!(
            config = %config_dir.display(),
            file = %config_file.display(),
            "Platform paths resolved"
        );

        Self { config_file }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[input]` section.
    pub input: InputSection,
    /// `[levels]` section.
    pub levels: LevelsSection,
    /// `[format]` section.
    pub format: FormatSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[input]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Log file read when no path is given on the command line.
    pub default_path: Option<String>,
}

/// `[levels]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LevelsSection {
    /// Level names accepted by the detail filter.
    pub recognised: Option<Vec<String>>,
}

/// `[format]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FormatSection {
    /// "whitespace" (default) or "pattern".
    pub kind: Option<String>,
    /// Regex with named groups date/time/level[/message]; used when kind = "pattern".
    pub line_pattern: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Input file used when the CLI names none.
    pub default_input: PathBuf,

    /// Level names accepted by the detail filter.
    pub recognised_levels: Vec<String>,

    /// Line pattern; `None` selects whitespace tokenising.
    /// Compiled (and rejected if invalid) by the app layer.
    pub line_pattern: Option<String>,

    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_input: PathBuf::from(constants::DEFAULT_INPUT_PATH),
            recognised_levels: constants::DEFAULT_RECOGNISED_LEVELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            line_pattern: None,
            log_level: None,
        }
    }
}

/// Load and validate a config file.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults plus a warning.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config file found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (AppConfig::default(), warnings);
        }
    };

    tracing::debug!(path = %config_path.display(), "Loaded config file");

    let (config, mut validation) = validate(raw);
    warnings.append(&mut validation);
    (config, warnings)
}

/// Validate each field of a raw config, accumulating all warnings.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Input: default_path --
    if let Some(path) = raw.input.default_path {
        if path.trim().is_empty() {
            warnings.push(format!(
                "[input] default_path is empty. Using default ({}).",
                constants::DEFAULT_INPUT_PATH
            ));
        } else {
            config.default_input = PathBuf::from(path);
        }
    }

    // -- Levels: recognised --
    if let Some(levels) = raw.levels.recognised {
        if levels.is_empty() || levels.len() > constants::MAX_RECOGNISED_LEVELS {
            warnings.push(format!(
                "[levels] recognised has {} entries, expected 1-{}. Using default ({}).",
                levels.len(),
                constants::MAX_RECOGNISED_LEVELS,
                constants::DEFAULT_RECOGNISED_LEVELS.join(", "),
            ));
        } else if let Some(bad) = levels
            .iter()
            .find(|l| l.is_empty() || l.chars().any(char::is_whitespace))
        {
            warnings.push(format!(
                "[levels] recognised contains \"{bad}\"; level names must be single non-empty \
                 tokens. Using default ({}).",
                constants::DEFAULT_RECOGNISED_LEVELS.join(", "),
            ));
        } else {
            config.recognised_levels = levels;
        }
    }

    // -- Format: kind / line_pattern --
    let kind = raw
        .format
        .kind
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_else(|| "whitespace".to_string());
    match kind.as_str() {
        "whitespace" => {
            if raw.format.line_pattern.is_some() {
                warnings.push(
                    "[format] line_pattern is ignored unless kind = \"pattern\".".to_string(),
                );
            }
        }
        "pattern" => match raw.format.line_pattern {
            Some(pattern) if !pattern.is_empty() => config.line_pattern = Some(pattern),
            _ => warnings.push(
                "[format] kind = \"pattern\" requires a non-empty line_pattern. \
                 Using whitespace tokenising."
                    .to_string(),
            ),
        },
        other => warnings.push(format!(
            "[format] kind = \"{other}\" is not recognised. Expected \"whitespace\" or \
             \"pattern\". Using whitespace tokenising.",
        )),
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(toml_text: &str) -> (AppConfig, Vec<String>) {
        validate(toml::from_str(toml_text).unwrap())
    }

    #[test]
    fn test_missing_file_gives_defaults_without_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(&dir.path().join("config.toml"));
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_full_config_is_applied() {
        let (config, warnings) = parse(
            r#"
            [input]
            default_path = "/var/log/app.log"

            [levels]
            recognised = ["INFO", "ERROR", "TRACE"]

            [format]
            kind = "pattern"
            line_pattern = '^(?P<date>\S+) (?P<time>\S+) (?P<level>\S+)'

            [logging]
            level = "debug"
            "#,
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.default_input, PathBuf::from("/var/log/app.log"));
        assert_eq!(config.recognised_levels, vec!["INFO", "ERROR", "TRACE"]);
        assert!(config.line_pattern.is_some());
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_values_fall_back_with_warnings() {
        let (config, warnings) = parse(
            r#"
            [input]
            default_path = ""

            [levels]
            recognised = ["INFO", "two words"]

            [format]
            kind = "json"

            [logging]
            level = "loud"
            "#,
        );
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 4, "{warnings:?}");
    }

    #[test]
    fn test_pattern_kind_without_pattern_warns() {
        let (config, warnings) = parse("[format]\nkind = \"pattern\"\n");
        assert!(config.line_pattern.is_none());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let (config, warnings) = parse("[future]\nthing = 1\n[input]\nunknown = true\n");
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unparseable_file_warns_and_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is = = not toml").unwrap();
        let (config, warnings) = load_config(&path);
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Failed to parse"));
    }

    #[test]
    fn test_platform_config_file_name() {
        let paths = PlatformPaths::resolve();
        assert!(paths.config_file.ends_with(constants::CONFIG_FILE_NAME));
    }
}
