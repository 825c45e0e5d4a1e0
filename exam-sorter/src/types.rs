//! Collaborator traits for the classification pipeline
//!
//! Each gate of the per-file pipeline talks to its backend through one of
//! these traits so the classifier can run against real PDF/LLM services in
//! production and against in-memory fakes in tests.
//!
//! | Gate                | Trait            | Production implementation |
//! |---------------------|------------------|---------------------------|
//! | content type        | `FileTypeProbe`  | `MagicPdfProbe`           |
//! | leading text        | `TextSource`     | `PdfTextSource`           |
//! | "is this a test"    | `TestPredicate`  | `KeywordTestDetector`     |
//! | metadata extraction | `FieldExtractor` | `LlmFieldExtractor`       |

use crate::models::ExtractedFields;
use crate::services::llm_client::LlmError;
use crate::services::response_parser::ResponseParseError;
use std::path::Path;
use thiserror::Error;

/// Decides whether a file's content is a PDF document
///
/// Only file content counts; the name and extension are ignored.
pub trait FileTypeProbe: Send + Sync {
    fn is_pdf(&self, path: &Path) -> bool;
}

/// Produces the leading text of a document
#[async_trait::async_trait]
pub trait TextSource: Send + Sync {
    /// Source name for logs
    fn name(&self) -> &'static str;

    /// Newline-joined text of the first `line_limit` non-empty lines
    ///
    /// # Errors
    /// `TextExtractionError` when the document cannot be opened or decoded.
    /// Callers treat this as "no text" rather than aborting the file.
    async fn leading_text(&self, path: &Path, line_limit: usize)
        -> Result<String, TextExtractionError>;
}

/// Keyword heuristic deciding whether text looks like an exam
pub trait TestPredicate: Send + Sync {
    fn is_test(&self, text: &str) -> bool;
}

/// Proposes exam metadata fields for a document's leading text
#[async_trait::async_trait]
pub trait FieldExtractor: Send + Sync {
    /// Extractor name for logs
    fn name(&self) -> &'static str;

    /// Extract course, semester, year, moed and degree
    ///
    /// Values the extractor could not determine are `"unknown"`. An `Err`
    /// means the extraction itself failed; the caller substitutes
    /// [`ExtractedFields::unknown`].
    async fn extract(&self, text: &str) -> Result<ExtractedFields, ExtractionError>;
}

/// Text extraction error
#[derive(Debug, Error)]
pub enum TextExtractionError {
    /// I/O error reading the document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document could not be parsed
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Blocking extraction task did not complete
    #[error("Extraction task failed: {0}")]
    Task(String),
}

/// Field extraction error
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Completion service unreachable or returned an error
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// Completion text was not the expected JSON object
    #[error(transparent)]
    Parse(#[from] ResponseParseError),
}
