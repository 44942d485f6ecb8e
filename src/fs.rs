//! File system utilities.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Writes `content` to `path` through a sibling temp file and a rename.
///
/// Missing parent directories are created first. The temp file lives next to
/// the target so the rename stays on one filesystem.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write file: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("out.py");

        atomic_write(&file_path, "print('hi')\n").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "print('hi')\n");
    }

    #[test]
    fn test_atomic_write_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("out.rs");

        fs::write(&file_path, "fn old() {}").unwrap();
        atomic_write(&file_path, "fn new() {}").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "fn new() {}");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested").join("deeper").join("main.go");

        atomic_write(&file_path, "package main").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "package main");
    }

    #[test]
    fn test_atomic_write_no_temp_file_remains() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("out.txt");

        atomic_write(&file_path, "content").unwrap();

        assert!(!temp_dir.path().join(".out.txt.tmp").exists());
    }
}
