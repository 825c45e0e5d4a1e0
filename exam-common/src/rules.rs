//! Classification rule tables
//!
//! The "is this a test" keyword heuristic, the exam-folder naming pattern and
//! the semester/moed vocabulary are inherently fuzzy. They live here as data
//! (overridable from the `[rules]` TOML section) rather than as branches in
//! the pipeline code.

use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel used by the extraction service for a field it could not find
pub const UNKNOWN: &str = "unknown";

/// Rule tables driving discovery, test detection and vocabulary mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTables {
    /// Words whose presence in the leading text marks a document as an exam
    pub test_keywords: Vec<String>,

    /// Minimum number of distinct keywords that must appear
    pub min_keyword_hits: usize,

    /// Regex matched against folder names that hold exams
    pub test_folder_pattern: String,

    /// OS-generated artifacts never treated as candidates
    pub ignored_file_names: Vec<String>,

    /// Semester synonyms → canonical semester label
    pub semester_aliases: BTreeMap<String, String>,

    /// Moed synonyms → canonical moed label
    pub moed_aliases: BTreeMap<String, String>,
}

impl Default for RuleTables {
    fn default() -> Self {
        let test_keywords = [
            "מבחן", "מבחנים", "בחינה", "מועד", "סמסטר", "שנה", "תשע", "תשפ", "נבחנים",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let semester_aliases = [
            ("א", "א"),
            ("ב", "ב"),
            ("חורף", "א"),
            ("אביב", "ב"),
            ("קיץ", "קיץ"),
            ("ק", "קיץ"),
            ("ג", "קיץ"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let moed_aliases = [("א", "א"), ("ב", "ב"), ("ג", "ג"), ("מיוחד", "מיוחד")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self {
            test_keywords,
            min_keyword_hits: 2,
            test_folder_pattern: "(מבח[ןנ]|בוח[ןנ])".to_string(),
            ignored_file_names: vec![
                ".DS_Store".to_string(),
                "Thumbs.db".to_string(),
                "desktop.ini".to_string(),
            ],
            semester_aliases,
            moed_aliases,
        }
    }
}

impl RuleTables {
    /// Compile the exam-folder pattern
    pub fn test_folder_regex(&self) -> Result<Regex> {
        Regex::new(&self.test_folder_pattern).map_err(|e| {
            Error::Config(format!(
                "Invalid test_folder_pattern '{}': {}",
                self.test_folder_pattern, e
            ))
        })
    }

    /// Check structural sanity of the tables
    pub fn validate(&self) -> Result<()> {
        if self.test_keywords.is_empty() {
            return Err(Error::Config("rules.test_keywords must not be empty".to_string()));
        }
        if self.min_keyword_hits == 0 {
            return Err(Error::Config("rules.min_keyword_hits must be at least 1".to_string()));
        }
        if self.min_keyword_hits > self.test_keywords.len() {
            return Err(Error::Config(format!(
                "rules.min_keyword_hits ({}) exceeds the number of keywords ({})",
                self.min_keyword_hits,
                self.test_keywords.len()
            )));
        }
        self.test_folder_regex()?;
        Ok(())
    }

    /// True for OS-generated sentinel files (`.DS_Store`, AppleDouble `._*`, ...)
    pub fn is_ignored_file_name(&self, name: &str) -> bool {
        name.starts_with("._") || self.ignored_file_names.iter().any(|n| n == name)
    }

    /// Map a raw semester value onto its canonical label
    pub fn canonical_semester(&self, raw: &str) -> String {
        canonicalize(raw, &self.semester_aliases)
    }

    /// Map a raw moed value onto its canonical label
    pub fn canonical_moed(&self, raw: &str) -> String {
        canonicalize(raw, &self.moed_aliases)
    }
}

/// Trim, drop trailing geresh/apostrophes and look the value up in `aliases`.
///
/// Blank input collapses to [`UNKNOWN`]; values absent from the table are
/// returned cleaned but otherwise untouched.
fn canonicalize(raw: &str, aliases: &BTreeMap<String, String>) -> String {
    let cleaned = raw
        .trim()
        .trim_end_matches(['׳', '\'', '"', '״'])
        .trim();

    if cleaned.is_empty() {
        return UNKNOWN.to_string();
    }

    match aliases.get(cleaned) {
        Some(canonical) => canonical.clone(),
        None => cleaned.to_string(),
    }
}
