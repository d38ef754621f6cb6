// LogTally - core/filter.rs
//
// Level filter producing detail lines, plus the recognised-level policy
// callers apply before filtering.
// Core layer: pure logic, no I/O.

use crate::core::model::LogRecord;
use crate::util::constants;
use crate::util::error::FilterError;

/// The set of level names a caller may request details for.
///
/// Stored upper-cased; requests are upper-cased before the lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelPolicy {
    recognised: Vec<String>,
}

impl LevelPolicy {
    /// Build a policy from level names. Names are upper-cased and
    /// de-duplicated, keeping first-seen order.
    pub fn new<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut recognised: Vec<String> = Vec::new();
        for level in levels {
            let upper = level.as_ref().trim().to_uppercase();
            if !upper.is_empty() && !recognised.contains(&upper) {
                recognised.push(upper);
            }
        }
        Self { recognised }
    }

    /// Recognised level names in display order.
    pub fn levels(&self) -> &[String] {
        &self.recognised
    }

    /// Validate a requested level, returning its upper-cased form.
    pub fn check(&self, level: &str) -> Result<String, FilterError> {
        let upper = level.to_uppercase();
        if self.recognised.contains(&upper) {
            Ok(upper)
        } else {
            Err(FilterError::UnrecognizedLevel {
                level: level.to_string(),
                allowed: self.recognised.clone(),
            })
        }
    }
}

impl Default for LevelPolicy {
    fn default() -> Self {
        Self::new(constants::DEFAULT_RECOGNISED_LEVELS)
    }
}

/// Render one record as a detail line: `<date> <time> - <message>`.
pub fn format_detail(record: &LogRecord) -> String {
    format!("{} {} - {}", record.date, record.time, record.message)
}

/// Detail lines for every record whose stored level equals the upper-cased
/// request, in batch order.
///
/// The stored level is compared verbatim, so a record logged as `error` is
/// never matched. An empty result is a normal outcome, not an error.
pub fn filter_by_level(records: &[LogRecord], level: &str) -> Vec<String> {
    let wanted = level.to_uppercase();
    records
        .iter()
        .filter(|record| record.level == wanted)
        .map(format_detail)
        .collect()
}

/// Policy-checked variant of [`filter_by_level`].
///
/// `Err` means the level itself was rejected; `Ok(vec![])` means it was
/// accepted but nothing matched.
pub fn filter_checked(
    records: &[LogRecord],
    level: &str,
    policy: &LevelPolicy,
) -> Result<Vec<String>, FilterError> {
    let level = policy.check(level)?;
    Ok(filter_by_level(records, &level))
}
