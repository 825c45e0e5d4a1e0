//! First-page text extraction
//!
//! Reads the embedded text layer of page 1 with `lopdf`. Scans without a
//! text layer yield an empty string, which downstream gates treat as "no
//! keywords found".

use crate::types::{TextExtractionError, TextSource};
use lopdf::Document;
use std::path::{Path, PathBuf};

/// PDF text-layer reader
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl PdfTextSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl TextSource for PdfTextSource {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    async fn leading_text(
        &self,
        path: &Path,
        line_limit: usize,
    ) -> Result<String, TextExtractionError> {
        let path: PathBuf = path.to_path_buf();
        let page_text = tokio::task::spawn_blocking(move || first_page_text(&path))
            .await
            .map_err(|e| TextExtractionError::Task(e.to_string()))??;

        Ok(leading_lines(&page_text, line_limit))
    }
}

/// Raw text of the first page, empty for a document without pages
fn first_page_text(path: &Path) -> Result<String, TextExtractionError> {
    std::fs::metadata(path)?;
    let document = Document::load(path).map_err(|e| TextExtractionError::Pdf(e.to_string()))?;

    let first_page = match document.get_pages().keys().next() {
        Some(&number) => number,
        None => return Ok(String::new()),
    };

    document
        .extract_text(&[first_page])
        .map_err(|e| TextExtractionError::Pdf(e.to_string()))
}

/// First `limit` non-empty lines, trimmed and newline-joined
pub fn leading_lines(text: &str, limit: usize) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(limit)
        .collect::<Vec<_>>()
        .join("\n")
}
