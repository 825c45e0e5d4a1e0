//! In-memory index of course folders already present in the archive
//!
//! Built once at run start from `destination/<degree>/` listings and
//! refreshed incrementally as the classifier creates new course folders, so
//! the destination tree is not re-listed for every file.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Degree → existing course folder names
#[derive(Debug, Clone)]
pub struct CourseIndex {
    destination_root: PathBuf,
    folders: HashMap<String, Vec<String>>,
}

impl CourseIndex {
    /// Empty index; degrees are listed on first access
    pub fn new(destination_root: impl Into<PathBuf>) -> Self {
        Self {
            destination_root: destination_root.into(),
            folders: HashMap::new(),
        }
    }

    /// Index every listed degree up front
    ///
    /// A degree whose directory cannot be listed is left unindexed, so the
    /// error resurfaces from [`CourseIndex::existing`] for the file that needs it.
    pub fn build<'a>(
        destination_root: impl Into<PathBuf>,
        degrees: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut index = Self::new(destination_root);
        for degree in degrees {
            let degree_dir = index.destination_root.join(degree);
            match list_course_dirs(&degree_dir) {
                Ok(names) => {
                    index.folders.insert(degree.to_string(), names);
                }
                Err(e) => {
                    tracing::warn!(
                        degree_dir = %degree_dir.display(),
                        error = %e,
                        "Cannot list course folders, degree left unindexed"
                    );
                }
            }
        }

        tracing::debug!(
            degrees = index.folders.len(),
            folders = index.folders.values().map(Vec::len).sum::<usize>(),
            "Course folder index built"
        );

        index
    }

    /// Course folders known for `degree`, listing the directory if not yet indexed
    pub fn existing(&mut self, degree: &str) -> io::Result<&[String]> {
        if !self.folders.contains_key(degree) {
            let names = list_course_dirs(&self.destination_root.join(degree))?;
            self.folders.insert(degree.to_string(), names);
        }
        Ok(self
            .folders
            .get(degree)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Note a course folder created during this run
    pub fn record(&mut self, degree: &str, course: &str) {
        let names = self.folders.entry(degree.to_string()).or_default();
        if !names.iter().any(|n| n == course) {
            names.push(course.to_string());
        }
    }
}

/// Sorted names of the sub-directories of `degree_dir` (empty if it does not exist)
fn list_course_dirs(degree_dir: &Path) -> io::Result<Vec<String>> {
    let entries = match std::fs::read_dir(degree_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
