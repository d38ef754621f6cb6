// LogTally - platform/fs.rs
//
// Input file access. The only place the pipeline touches the filesystem
// for reading.

use crate::util::error::LogTallyError;
use std::path::Path;

/// Read a log file into memory and split it into lines.
///
/// Refuses paths that are not regular files and files larger than
/// `max_size` bytes. Invalid UTF-8 is replaced rather than rejected, so one
/// bad byte costs at most one malformed line instead of the whole file.
pub fn read_lines(path: &Path, max_size: u64) -> Result<Vec<String>, LogTallyError> {
    let metadata = std::fs::metadata(path).map_err(|e| LogTallyError::Io {
        path: path.to_path_buf(),
        operation: "stat",
        source: e,
    })?;

    if !metadata.is_file() {
        return Err(LogTallyError::InputNotAFile {
            path: path.to_path_buf(),
        });
    }
    if metadata.len() > max_size {
        return Err(LogTallyError::InputTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    let content = read_file_lossy(path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Input read");
    Ok(content.lines().map(str::to_string).collect())
}

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file_lossy(path: &Path) -> Result<String, LogTallyError> {
    let bytes = std::fs::read(path).map_err(|e| LogTallyError::Io {
        path: path.to_path_buf(),
        operation: "read",
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_read_lines_splits_and_handles_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.txt");
        fs::write(&path, "a b INFO x\r\nbad\n\nc d ERROR y").unwrap();
        let lines = read_lines(&path, 1024).unwrap();
        assert_eq!(lines, vec!["a b INFO x", "bad", "", "c d ERROR y"]);
    }

    #[test]
    fn test_read_lines_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.txt");
        fs::write(&path, b"d t INFO caf\xff\n").unwrap();
        let lines = read_lines(&path, 1024).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("d t INFO caf"));
    }

    #[test]
    fn test_read_lines_rejects_directory_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_lines(dir.path(), 1024),
            Err(LogTallyError::InputNotAFile { .. })
        ));
        assert!(matches!(
            read_lines(&dir.path().join("missing.log"), 1024),
            Err(LogTallyError::Io { operation: "stat", .. })
        ));
    }

    #[test]
    fn test_read_lines_enforces_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.log");
        fs::write(&path, "x".repeat(64)).unwrap();
        assert!(matches!(
            read_lines(&path, 16),
            Err(LogTallyError::InputTooLarge { size: 64, max_size: 16, .. })
        ));
    }
}
