//! exam-sorter library interface
//!
//! Classifies scanned exam PDFs into a
//! `<degree>/<course>/מבחנים/<year>/<year> סמסטר <s> מועד <m>.pdf` archive.
//! Exposes the pipeline for the binary and for integration tests.

pub mod error;
pub mod models;
pub mod services;
pub mod types;
pub mod validators;
pub mod workflow;

pub use crate::error::{ClassifyError, ClassifyResult};
pub use crate::models::{ClassificationOutcome, CourseCatalog, ExtractedFields, RunSummary};
pub use crate::workflow::{Classifier, Collaborators};
