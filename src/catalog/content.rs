//! Prompt text loading.

use std::io::ErrorKind;
use std::path::Path;

/// Reads a prompt file as sanitized text.
///
/// A missing file yields an empty string. Invalid UTF-8 is replaced rather
/// than rejected, so the only error left is an I/O failure on a file that
/// exists.
pub fn read_prompt(path: &Path) -> std::io::Result<String> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(sanitize(&String::from_utf8_lossy(&bytes))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e),
    }
}

/// Normalizes line endings to `\n`, replaces control characters other than
/// newline and tab with a space, and trims surrounding whitespace.
pub fn sanitize(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let cleaned: String = normalized
        .chars()
        .map(|c| {
            if (c as u32) < 32 && c != '\n' && c != '\t' {
                ' '
            } else {
                c
            }
        })
        .collect();
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(read_prompt(&dir.path().join("nope.md")).unwrap(), "");
    }

    #[test]
    fn test_directory_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        assert!(read_prompt(dir.path()).is_err());
    }

    #[test]
    fn test_line_endings_are_normalized() {
        assert_eq!(sanitize("a\r\nb\rc\n"), "a\nb\nc");
    }

    #[test]
    fn test_control_characters_become_spaces() {
        assert_eq!(sanitize("tab\there\x00nul\x1besc"), "tab\there nul esc");
        assert_eq!(sanitize("\x07\x08"), "");
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(sanitize("\n\n  # Usage\n\nRun it.\n\t"), "# Usage\n\nRun it.");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("selection.md");
        std::fs::write(&path, b"caf\xe9 \xff ok").unwrap();
        let text = read_prompt(&path).unwrap();
        assert!(text.starts_with("caf\u{FFFD}"));
        assert!(text.ends_with("ok"));
    }
}
