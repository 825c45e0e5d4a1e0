//! Per-file classification outcome

use serde::Serialize;
use std::path::PathBuf;

/// Where a single candidate file ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClassificationOutcome {
    /// Filed into the classified tree
    Accepted { destination_path: PathBuf },
    /// Keyword scan did not recognise an exam; file left in place
    RejectedNotTest,
    /// Fields failed validation; file moved to the `not_a_test` quarantine
    RejectedIncompleteFields { quarantine_path: PathBuf },
    /// Content is not a PDF; file moved to the `not_a_pdf` quarantine
    RejectedNotPdf { quarantine_path: PathBuf },
}

impl ClassificationOutcome {
    /// Short label for logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            ClassificationOutcome::Accepted { .. } => "accepted",
            ClassificationOutcome::RejectedNotTest => "not_test",
            ClassificationOutcome::RejectedIncompleteFields { .. } => "incomplete_fields",
            ClassificationOutcome::RejectedNotPdf { .. } => "not_pdf",
        }
    }
}
