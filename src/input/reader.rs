use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Largest file or stdin payload accepted as prompt material.
pub const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

pub struct InputReader;

impl InputReader {
    /// Reads a whole text file, rejecting directories and oversized files.
    pub fn read_file(path: &Path) -> Result<String> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access file: {}", path.display()))?;

        if metadata.is_dir() {
            bail!("{} is a directory", path.display());
        }

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            bail!(
                "File size ({:.1} MB) exceeds maximum allowed size (1 MB)",
                size as f64 / 1024.0 / 1024.0
            );
        }

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Reads all of stdin as UTF-8, trimmed.
    #[allow(clippy::significant_drop_tightening)]
    pub fn read_stdin() -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];
        let mut stdin = io::stdin().lock();

        loop {
            let bytes_read = stdin
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);

            if buffer.len() > MAX_INPUT_SIZE {
                bail!(
                    "Error: Input size ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
                     Consider splitting the input into smaller parts.",
                    buffer.len() as f64 / 1024.0 / 1024.0
                );
            }
        }

        let text = String::from_utf8(buffer).context("Input is not valid UTF-8")?;
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "fn main() {{}}").unwrap();

        let content = InputReader::read_file(temp_file.path()).unwrap();
        assert_eq!(content, "fn main() {}\n");
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = InputReader::read_file(Path::new("/nonexistent/path/to/file.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_directory_fails() {
        let temp_dir = TempDir::new().unwrap();

        let err = InputReader::read_file(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("is a directory"));
    }

    #[test]
    fn test_read_file_invalid_utf8() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(&[0xff, 0xfe, 0x00, 0x41]).unwrap();

        assert!(InputReader::read_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_read_file_unicode() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let content = "こんにちは世界！🌍\n日本語テスト";
        write!(temp_file, "{content}").unwrap();

        let result = InputReader::read_file(temp_file.path()).unwrap();
        assert_eq!(result, content);
    }

    #[test]
    fn test_read_file_exceeds_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("large_file.txt");

        fs::write(&file_path, "x".repeat(MAX_INPUT_SIZE + 1)).unwrap();

        let err = InputReader::read_file(&file_path).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_read_file_at_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("max_file.txt");

        fs::write(&file_path, "x".repeat(MAX_INPUT_SIZE)).unwrap();

        let result = InputReader::read_file(&file_path).unwrap();
        assert_eq!(result.len(), MAX_INPUT_SIZE);
    }
}
