//! `@` references: text or file contents staged for the next prompt.

use std::path::Path;

use crate::input::InputReader;

const PREVIEW_CHARS: usize = 50;

/// Stages the reference in `text` into `pending` and returns the message to show.
///
/// Returns `None` when `text` is not a reference. An existing path is read as
/// a file; anything else is stored verbatim. A file that cannot be read
/// leaves `pending` untouched.
pub fn handle_reference(text: &str, pending: &mut String) -> Option<String> {
    let reference = text.strip_prefix('@')?.trim();
    let path = Path::new(reference);

    if !reference.is_empty() && path.exists() {
        let message = match InputReader::read_file(path) {
            Ok(content) => {
                let chars = content.chars().count();
                tracing::debug!(path = reference, chars, "referenced file");
                *pending = content;
                format!("Referenced file: {reference} ({chars} chars)")
            }
            Err(e) => format!("Error reading file: {e:#}"),
        };
        return Some(message);
    }

    reference.clone_into(pending);
    Some(format!("Referenced text: {}", preview(reference)))
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_not_a_reference() {
        let mut pending = "kept".to_string();
        assert_eq!(handle_reference("hello @world", &mut pending), None);
        assert_eq!(pending, "kept");
    }

    #[test]
    fn test_literal_text_round_trip() {
        let mut pending = String::new();
        let message = handle_reference("@foo", &mut pending).unwrap();
        assert_eq!(pending, "foo");
        assert_eq!(message, "Referenced text: foo");
    }

    #[test]
    fn test_literal_text_is_trimmed() {
        let mut pending = String::new();
        handle_reference("@   some context  ", &mut pending).unwrap();
        assert_eq!(pending, "some context");
    }

    #[test]
    fn test_nonexistent_path_is_literal() {
        let mut pending = String::new();
        let message = handle_reference("@/nonexistent/path", &mut pending).unwrap();
        assert_eq!(pending, "/nonexistent/path");
        assert!(message.starts_with("Referenced text: /nonexistent/path"));
    }

    #[test]
    fn test_long_text_preview_is_truncated() {
        let long = "a".repeat(60);
        let mut pending = String::new();
        let message = handle_reference(&format!("@{long}"), &mut pending).unwrap();

        assert_eq!(pending, long);
        assert_eq!(message, format!("Referenced text: {}...", "a".repeat(50)));
    }

    #[test]
    fn test_exactly_fifty_chars_has_no_ellipsis() {
        let text = "é".repeat(50);
        let mut pending = String::new();
        let message = handle_reference(&format!("@{text}"), &mut pending).unwrap();
        assert_eq!(message, format!("Referenced text: {text}"));
    }

    #[test]
    fn test_file_reference_reads_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.md");
        fs::write(&path, "# Notes\nünïcödé\n").unwrap();

        let mut pending = String::new();
        let message = handle_reference(&format!("@ {}", path.display()), &mut pending).unwrap();

        assert_eq!(pending, "# Notes\nünïcödé\n");
        assert_eq!(
            message,
            format!("Referenced file: {} (16 chars)", path.display())
        );
    }

    #[test]
    fn test_directory_is_read_failure() {
        let temp_dir = TempDir::new().unwrap();
        let mut pending = "previous".to_string();

        let message =
            handle_reference(&format!("@{}", temp_dir.path().display()), &mut pending).unwrap();

        assert!(message.starts_with("Error reading file:"));
        assert_eq!(pending, "previous");
    }

    #[test]
    fn test_unreadable_file_leaves_pending_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.bin");
        fs::write(&path, [0xff, 0xfe, 0xfd]).unwrap();
        let mut pending = "previous".to_string();

        let message = handle_reference(&format!("@{}", path.display()), &mut pending).unwrap();

        assert!(message.starts_with("Error reading file:"));
        assert_eq!(pending, "previous");
    }
}
