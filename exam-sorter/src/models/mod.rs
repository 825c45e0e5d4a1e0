//! Data models for the exam sorter

pub mod catalog;
pub mod fields;
pub mod outcome;
pub mod run_summary;

pub use catalog::CourseCatalog;
pub use fields::{ExtractedFields, RejectionReason, ValidatedFields};
pub use outcome::ClassificationOutcome;
pub use run_summary::{FileFailure, RunSummary};
