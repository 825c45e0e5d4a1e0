//! Source tree scanner
//!
//! Recursive discovery of candidate exam files with the eligibility filter:
//! a file is a candidate only if it is a regular file, is not an OS-generated
//! artifact, and sits
//! - directly in the source root, or
//! - in a first-level sub-folder (a course folder), or
//! - anywhere below a folder whose name matches the exam-folder pattern.
//!
//! Everything else is left untouched. Candidates are collected before any
//! file is moved, so the walk never observes its own renames.

use exam_common::RuleTables;
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Source scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Scan result with statistics
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Eligible candidate files, in walk order
    pub candidates: Vec<PathBuf>,
    /// Regular files rejected by the eligibility filter
    pub skipped: Vec<PathBuf>,
    /// Entries that could not be read
    pub errors: Vec<String>,
}

impl ScanResult {
    /// Every regular file seen
    pub fn discovered(&self) -> usize {
        self.candidates.len() + self.skipped.len()
    }
}

/// Source tree scanner
pub struct FileScanner {
    rules: RuleTables,
    test_folder: Regex,
    excluded_root: Option<PathBuf>,
}

impl FileScanner {
    /// Scanner using the ignore list and exam-folder pattern from `rules`
    pub fn new(rules: RuleTables) -> exam_common::Result<Self> {
        let test_folder = rules.test_folder_regex()?;
        Ok(Self {
            rules,
            test_folder,
            excluded_root: None,
        })
    }

    /// Never descend into `path` (the archive, when it lives inside the source tree)
    pub fn excluding(mut self, path: impl Into<PathBuf>) -> Self {
        self.excluded_root = Some(path.into());
        self
    }

    /// Walk `root_path` and split regular files into candidates and skipped
    pub fn scan(&self, root_path: &Path) -> Result<ScanResult, ScanError> {
        if !root_path.exists() {
            return Err(ScanError::PathNotFound(root_path.to_path_buf()));
        }

        if !root_path.is_dir() {
            return Err(ScanError::NotADirectory(root_path.to_path_buf()));
        }

        let mut result = ScanResult::default();

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Error accessing entry: {}", e);
                    result.errors.push(e.to_string());
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if self.is_eligible(root_path, path) {
                result.candidates.push(path.to_path_buf());
            } else {
                tracing::debug!(file = %path.display(), "Skipping: not in a course or exam folder");
                result.skipped.push(path.to_path_buf());
            }
        }

        tracing::info!(
            root = %root_path.display(),
            candidates = result.candidates.len(),
            skipped = result.skipped.len(),
            errors = result.errors.len(),
            "Source scan complete"
        );

        Ok(result)
    }

    /// Location and name filter for a regular file under `root`
    pub fn is_eligible(&self, root: &Path, path: &Path) -> bool {
        let file_name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };
        if self.rules.is_ignored_file_name(&file_name) {
            return false;
        }

        let Ok(relative) = path.strip_prefix(root) else {
            return false;
        };

        let folders: Vec<String> = relative
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .filter_map(|c| match c {
                        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let in_root = folders.is_empty();
        let in_course_folder = folders.len() == 1;
        let in_test_folder = folders.iter().any(|f| self.test_folder.is_match(f));

        in_root || in_course_folder || in_test_folder
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        match &self.excluded_root {
            Some(excluded) => entry.depth() > 0 && entry.path() == excluded.as_path(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scanner() -> FileScanner {
        FileScanner::new(RuleTables::default()).unwrap()
    }

    #[test]
    fn test_scan_nonexistent_path() {
        let result = scanner().scan(Path::new("/nonexistent/path"));
        match result {
            Err(ScanError::PathNotFound(_)) => {}
            other => panic!("Expected PathNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_file_as_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.pdf");
        fs::write(&file, b"%PDF").unwrap();

        match scanner().scan(&file) {
            Err(ScanError::NotADirectory(_)) => {}
            other => panic!("Expected NotADirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_location_rules() {
        let root = Path::new("/src");
        let s = scanner();

        assert!(s.is_eligible(root, Path::new("/src/scan.pdf")));
        assert!(s.is_eligible(root, Path::new("/src/חדוא/scan.pdf")));
        assert!(!s.is_eligible(root, Path::new("/src/חדוא/תרגולים/scan.pdf")));
        assert!(s.is_eligible(root, Path::new("/src/חדוא/מבחנים/scan.pdf")));
        assert!(s.is_eligible(root, Path::new("/src/חדוא/מבחנים/2021/a/scan.pdf")));
        assert!(s.is_eligible(root, Path::new("/src/x/y/בוחן אמצע/scan")));
    }

    #[test]
    fn test_system_artifacts_are_ignored() {
        let root = Path::new("/src");
        let s = scanner();
        assert!(!s.is_eligible(root, Path::new("/src/.DS_Store")));
        assert!(!s.is_eligible(root, Path::new("/src/course/Thumbs.db")));
        assert!(!s.is_eligible(root, Path::new("/src/._scan.pdf")));
    }

    #[test]
    fn test_scan_splits_candidates_and_skipped() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("course/notes")).unwrap();
        fs::create_dir_all(root.join("course/מבחנים/old")).unwrap();
        fs::write(root.join("top.pdf"), b"%PDF").unwrap();
        fs::write(root.join("course/one.pdf"), b"%PDF").unwrap();
        fs::write(root.join("course/notes/deep.pdf"), b"%PDF").unwrap();
        fs::write(root.join("course/מבחנים/old/exam.pdf"), b"%PDF").unwrap();
        fs::write(root.join(".DS_Store"), b"").unwrap();

        let result = scanner().scan(root).unwrap();

        assert_eq!(result.candidates.len(), 3);
        assert!(result.candidates.contains(&root.join("top.pdf")));
        assert!(result.candidates.contains(&root.join("course/one.pdf")));
        assert!(result.candidates.contains(&root.join("course/מבחנים/old/exam.pdf")));
        assert_eq!(result.skipped.len(), 2);
        assert_eq!(result.discovered(), 5);
    }

    #[test]
    fn test_excluded_subtree_is_not_walked() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("archive/not_a_test")).unwrap();
        fs::write(root.join("archive/not_a_test/x.pdf"), b"%PDF").unwrap();
        fs::write(root.join("new.pdf"), b"%PDF").unwrap();

        let result = scanner().excluding(root.join("archive")).scan(root).unwrap();

        assert_eq!(result.candidates, vec![root.join("new.pdf")]);
        assert!(result.skipped.is_empty());
    }
}
