//! Keyword-based exam detection

use crate::types::TestPredicate;
use exam_common::RuleTables;

/// Counts distinct exam keywords in the leading text of a document
#[derive(Debug, Clone)]
pub struct KeywordTestDetector {
    keywords: Vec<String>,
    min_hits: usize,
}

impl KeywordTestDetector {
    pub fn new(keywords: Vec<String>, min_hits: usize) -> Self {
        Self { keywords, min_hits }
    }

    pub fn from_rules(rules: &RuleTables) -> Self {
        Self::new(rules.test_keywords.clone(), rules.min_keyword_hits)
    }

    /// Keywords present in `text` (substring match, each counted once)
    pub fn matched_keywords<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.keywords
            .iter()
            .filter(|k| text.contains(k.as_str()))
            .map(String::as_str)
            .collect()
    }
}

impl TestPredicate for KeywordTestDetector {
    fn is_test(&self, text: &str) -> bool {
        let matched = self.matched_keywords(text);
        tracing::debug!(hits = matched.len(), required = self.min_hits, keywords = ?matched, "Keyword scan");
        matched.len() >= self.min_hits
    }
}
