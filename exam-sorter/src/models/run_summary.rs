//! Classification run results and per-file failures

use super::ClassificationOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A file whose processing failed after discovery (filesystem error etc.)
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    /// File path that caused the error
    pub file_path: PathBuf,

    /// Human-readable error message
    pub error_message: String,

    /// When the error occurred
    pub occurred_at: DateTime<Utc>,
}

/// Aggregate statistics for one classification run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Regular files seen under the source root
    pub discovered: usize,
    /// Files left untouched by the eligibility filter
    pub skipped: usize,
    pub accepted: usize,
    pub not_pdf: usize,
    pub not_test: usize,
    pub incomplete: usize,

    /// Final paths of accepted files
    pub placed: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            discovered: 0,
            skipped: 0,
            accepted: 0,
            not_pdf: 0,
            not_test: 0,
            incomplete: 0,
            placed: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: &ClassificationOutcome) {
        match outcome {
            ClassificationOutcome::Accepted { destination_path } => {
                self.accepted += 1;
                self.placed.push(destination_path.clone());
            }
            ClassificationOutcome::RejectedNotTest => self.not_test += 1,
            ClassificationOutcome::RejectedIncompleteFields { .. } => self.incomplete += 1,
            ClassificationOutcome::RejectedNotPdf { .. } => self.not_pdf += 1,
        }
    }

    pub fn record_failure(&mut self, file_path: &Path, error_message: String) {
        self.failures.push(FileFailure {
            file_path: file_path.to_path_buf(),
            error_message,
            occurred_at: Utc::now(),
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Files that reached a gate (everything discovered and not skipped)
    pub fn processed(&self) -> usize {
        self.accepted + self.not_pdf + self.not_test + self.incomplete + self.failures.len()
    }

    pub fn duration_secs(&self) -> Option<f64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds() as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_each_outcome() {
        let mut summary = RunSummary::start();
        summary.record(&ClassificationOutcome::Accepted {
            destination_path: PathBuf::from("/a/b.pdf"),
        });
        summary.record(&ClassificationOutcome::RejectedNotTest);
        summary.record(&ClassificationOutcome::RejectedNotPdf {
            quarantine_path: PathBuf::from("/q/x.doc"),
        });
        summary.record_failure(Path::new("/src/y.pdf"), "disk full".to_string());

        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.not_test, 1);
        assert_eq!(summary.not_pdf, 1);
        assert_eq!(summary.incomplete, 0);
        assert_eq!(summary.processed(), 4);
        assert_eq!(summary.placed, vec![PathBuf::from("/a/b.pdf")]);
    }

    #[test]
    fn finish_sets_duration() {
        let mut summary = RunSummary::start();
        assert!(summary.duration_secs().is_none());
        summary.finish();
        assert!(summary.duration_secs().unwrap() >= 0.0);
    }
}
