//! Temporary source/destination trees

use exam_common::config::{ClassifierConfig, Thresholds};
use exam_common::{OutputLayout, RuleTables};
use exam_sorter::{Classifier, CourseCatalog};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use super::fakes::fake_collaborators;

pub const CATALOG_JSON: &str = r#"{
    "מדעי המחשב": ["מבוא למדעי המחשב", "מבני נתונים", "אלגוריתמים"],
    "תעשייה וניהול": ["חקר ביצועים", "סטטיסטיקה"]
}"#;

/// Source and destination roots under one temp directory
pub struct TestTree {
    _temp: TempDir,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub catalog_path: PathBuf,
}

impl TestTree {
    /// `<tmp>/source`, `<tmp>/archive`, `<tmp>/courses.json`
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        let destination = temp.path().join("archive");
        Self::with_roots(temp, source, destination)
    }

    /// Archive located inside the source tree (`<tmp>/source/archive`)
    pub fn nested() -> Self {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        let destination = source.join("archive");
        Self::with_roots(temp, source, destination)
    }

    fn with_roots(temp: TempDir, source: PathBuf, destination: PathBuf) -> Self {
        fs::create_dir_all(&source).unwrap();
        let catalog_path = temp.path().join("courses.json");
        fs::write(&catalog_path, CATALOG_JSON).unwrap();
        Self {
            _temp: temp,
            source,
            destination,
            catalog_path,
        }
    }

    pub fn config(&self) -> ClassifierConfig {
        ClassifierConfig {
            source_root: self.source.clone(),
            destination_root: self.destination.clone(),
            catalog_path: self.catalog_path.clone(),
            pacing_delay: Duration::ZERO,
            text_line_limit: 60,
            thresholds: Thresholds::default(),
            rules: RuleTables::default(),
            layout: OutputLayout::default(),
        }
    }

    /// Classifier over this tree with fake collaborators
    pub fn classifier(&self) -> (Classifier, Arc<AtomicUsize>) {
        self.classifier_with(self.config())
    }

    /// Classifier over this tree with a caller-adjusted configuration
    pub fn classifier_with(&self, config: ClassifierConfig) -> (Classifier, Arc<AtomicUsize>) {
        let catalog = CourseCatalog::load(&config.catalog_path).unwrap();
        let (collaborators, calls) = fake_collaborators(&config.rules);
        (Classifier::new(config, catalog, collaborators), calls)
    }

    pub fn src(&self, relative: &str) -> PathBuf {
        self.source.join(relative)
    }

    pub fn dest(&self, relative: &str) -> PathBuf {
        self.destination.join(relative)
    }
}

/// Inline JSON the fake extractor will return
pub fn exam_json(course: &str, semester: &str, year: &str, moed: &str, degree: &str) -> String {
    format!(
        r#"{{"course_name": "{}", "semester": "{}", "year": "{}", "moed": "{}", "degree": "{}"}}"#,
        course, semester, year, moed, degree
    )
}

/// Write a fake scanned exam: PDF header, two exam keywords, then `body`
pub fn write_exam(path: &Path, body: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let content = format!("%PDF-1.4\nבחינה בקורס\nמועד א\n{}\n", body);
    fs::write(path, content).unwrap();
}

/// Write a fake PDF that does not look like an exam
pub fn write_non_exam(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "%PDF-1.4\nסיכום הרצאה 3\nהגדרות ומשפטים\n").unwrap();
}
