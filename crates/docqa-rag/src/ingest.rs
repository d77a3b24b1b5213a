//! Document ingestion from a directory of text files

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use docqa_core::Result;

/// File extensions recognized as ingestable text
const TEXT_EXTENSIONS: &[&str] = &["txt"];

/// A non-empty line of text paired with the file it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLine {
    pub text: String,
    pub source: PathBuf,
}

/// Read every recognized text file under `dir` and return one entry per
/// non-empty line, each carrying its originating file path.
///
/// Fail-fast: an unreadable directory or file aborts the whole ingestion.
/// Files are visited in sorted path order so downstream index insertion order
/// is deterministic across platforms.
pub fn read_documents(dir: &Path) -> Result<Vec<SourceLine>> {
    let mut paths: Vec<PathBuf> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let recognized = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext));
        if recognized {
            paths.push(path);
        }
    }

    paths.sort();

    let mut lines = Vec::new();
    for path in paths {
        let content = fs::read_to_string(&path)?;
        for line in content.lines() {
            if line.is_empty() {
                continue;
            }
            lines.push(SourceLine {
                text: line.to_string(),
                source: path.clone(),
            });
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_one_entry_per_non_empty_line() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", "first line\n\nthird line\n");

        let lines = read_documents(dir.path()).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "first line");
        assert_eq!(lines[1].text, "third line");
    }

    #[test]
    fn test_source_path_tracked_per_line() {
        let dir = TempDir::new().unwrap();
        let a = write_file(dir.path(), "a.txt", "from a\n");
        let b = write_file(dir.path(), "b.txt", "from b\n");

        let lines = read_documents(dir.path()).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].source, a);
        assert_eq!(lines[1].source, b);
    }

    #[test]
    fn test_unrecognized_extensions_skipped() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "notes.txt", "kept\n");
        write_file(dir.path(), "image.png", "binary-ish\n");
        write_file(dir.path(), "data.csv", "a,b,c\n");

        let lines = read_documents(dir.path()).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "kept");
    }

    #[test]
    fn test_files_visited_in_sorted_order() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "z.txt", "last\n");
        write_file(dir.path(), "a.txt", "first\n");

        let lines = read_documents(dir.path()).unwrap();
        assert_eq!(lines[0].text, "first");
        assert_eq!(lines[1].text, "last");
    }

    #[test]
    fn test_unreadable_directory_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does_not_exist");
        assert!(read_documents(&missing).is_err());
    }
}
