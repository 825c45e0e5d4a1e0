//! Exam metadata fields
//!
//! `ExtractedFields` is what the extraction service proposes for one file.
//! `ValidatedFields` can only be obtained from the field validator and is
//! guaranteed to carry no `"unknown"` sentinel.

use exam_common::rules::UNKNOWN;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw field values proposed for one scanned exam
///
/// Every value is either meaningful text or the sentinel `"unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub course_name: String,
    pub semester: String,
    pub year: String,
    pub moed: String,
    pub degree: String,
}

impl ExtractedFields {
    pub fn new(
        course_name: impl Into<String>,
        semester: impl Into<String>,
        year: impl Into<String>,
        moed: impl Into<String>,
        degree: impl Into<String>,
    ) -> Self {
        Self {
            course_name: course_name.into(),
            semester: semester.into(),
            year: year.into(),
            moed: moed.into(),
            degree: degree.into(),
        }
    }

    /// All fields set to the sentinel, used when extraction fails
    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN, UNKNOWN, UNKNOWN, UNKNOWN)
    }

    /// Names of the fields currently holding the sentinel
    pub fn unknown_fields(&self) -> Vec<&'static str> {
        self.named()
            .into_iter()
            .filter(|(_, value)| *value == UNKNOWN)
            .map(|(name, _)| name)
            .collect()
    }

    /// Field names paired with their values, in reporting order
    pub fn named(&self) -> [(&'static str, &str); 5] {
        [
            ("course_name", self.course_name.as_str()),
            ("year", self.year.as_str()),
            ("semester", self.semester.as_str()),
            ("moed", self.moed.as_str()),
            ("degree", self.degree.as_str()),
        ]
    }
}

impl fmt::Display for ExtractedFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "course='{}' year='{}' semester='{}' moed='{}' degree='{}'",
            self.course_name, self.year, self.semester, self.moed, self.degree
        )
    }
}

/// Fields that passed year normalization and the completeness gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields(pub(crate) ExtractedFields);

impl ValidatedFields {
    pub fn course_name(&self) -> &str {
        &self.0.course_name
    }

    pub fn semester(&self) -> &str {
        &self.0.semester
    }

    pub fn year(&self) -> &str {
        &self.0.year
    }

    pub fn moed(&self) -> &str {
        &self.0.moed
    }

    pub fn degree(&self) -> &str {
        &self.0.degree
    }

    pub fn into_fields(self) -> ExtractedFields {
        self.0
    }
}

/// Why a file's fields were refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// One or more fields hold the sentinel after year normalization
    IncompleteFields { missing: Vec<&'static str> },
    /// A field cannot be used as a single path segment
    UnsafePath { fields: Vec<&'static str> },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::IncompleteFields { missing } => {
                write!(f, "incomplete fields: {}", missing.join(", "))
            }
            RejectionReason::UnsafePath { fields } => {
                write!(f, "not usable as folder or file names: {}", fields.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_lists_every_field() {
        let fields = ExtractedFields::unknown();
        assert_eq!(
            fields.unknown_fields(),
            vec!["course_name", "year", "semester", "moed", "degree"]
        );
    }

    #[test]
    fn sentinel_match_is_case_sensitive() {
        let fields = ExtractedFields::new("Unknown", "א", "2022", "UNKNOWN", "x");
        assert!(fields.unknown_fields().is_empty());
    }
}
