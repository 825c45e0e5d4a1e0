//! In-memory collaborators
//!
//! Test "PDFs" are small text files starting with `%PDF-1.4`. Their body is
//! the leading text, and an inline JSON object in that text is what the fake
//! extractor returns.

use exam_common::RuleTables;
use exam_sorter::models::ExtractedFields;
use exam_sorter::services::{parse_fields_response, KeywordTestDetector};
use exam_sorter::types::{
    ExtractionError, FieldExtractor, FileTypeProbe, TextExtractionError, TextSource,
};
use exam_sorter::Collaborators;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// PDF iff the file starts with `%PDF`
pub struct ContentTypeProbe;

impl FileTypeProbe for ContentTypeProbe {
    fn is_pdf(&self, path: &Path) -> bool {
        std::fs::read(path)
            .map(|bytes| bytes.starts_with(b"%PDF"))
            .unwrap_or(false)
    }
}

/// File content as text, limited to the requested number of non-empty lines
pub struct PlainTextSource;

#[async_trait::async_trait]
impl TextSource for PlainTextSource {
    fn name(&self) -> &'static str {
        "plain-text"
    }

    async fn leading_text(
        &self,
        path: &Path,
        line_limit: usize,
    ) -> Result<String, TextExtractionError> {
        let content = std::fs::read_to_string(path)?;
        Ok(content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .take(line_limit)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Returns the JSON object embedded in the text; counts its calls
pub struct InlineJsonExtractor {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl FieldExtractor for InlineJsonExtractor {
    fn name(&self) -> &'static str {
        "inline-json"
    }

    async fn extract(&self, text: &str) -> Result<ExtractedFields, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(parse_fields_response(text)?)
    }
}

/// Fake collaborators plus the extractor call counter
pub fn fake_collaborators(rules: &RuleTables) -> (Collaborators, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let collaborators = Collaborators {
        file_type: Box::new(ContentTypeProbe),
        text_source: Box::new(PlainTextSource),
        test_predicate: Box::new(KeywordTestDetector::from_rules(rules)),
        field_extractor: Box::new(InlineJsonExtractor {
            calls: Arc::clone(&calls),
        }),
    };
    (collaborators, calls)
}
