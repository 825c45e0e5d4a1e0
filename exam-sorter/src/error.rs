//! Error types for exam-sorter
//!
//! Only configuration problems abort a run. Filesystem failures are scoped
//! to the file being processed: the classifier logs them, records them in
//! the run summary and moves on.

use crate::services::{ResolveError, ScanError};
use std::path::PathBuf;
use thiserror::Error;

/// Classifier error type
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Invalid or missing configuration (catalog, paths, rule tables)
    #[error("Configuration error: {0}")]
    Config(#[from] exam_common::Error),

    /// Extracted degree has no catalog entry
    #[error("Degree '{0}' is not present in the course catalog")]
    MissingDegree(String),

    /// Directory creation, rename or move failed for one file
    #[error("Filesystem error on {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source tree could not be walked
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
}

impl ClassifyError {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ClassifyError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// True if the whole run must stop
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ClassifyError::Filesystem { .. })
    }
}

impl From<ResolveError> for ClassifyError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::MissingDegree(degree) => ClassifyError::MissingDegree(degree),
        }
    }
}

/// Result type for classifier operations
pub type ClassifyResult<T> = Result<T, ClassifyError>;
