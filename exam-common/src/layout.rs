//! Output tree layout labels
//!
//! The literal words are Hebrew and must match an existing archive exactly:
//! `<degree>/<course>/מבחנים/<year>/<year> סמסטר <semester> מועד <moed>.pdf`

use serde::{Deserialize, Serialize};

/// Labels and quarantine folder names used when building destination paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputLayout {
    /// Folder between the course and the year ("exams")
    pub exams_label: String,
    /// Word preceding the semester in the file name
    pub semester_label: String,
    /// Word preceding the moed in the file name
    pub moed_label: String,
    /// Quarantine for files that are not PDFs
    pub not_pdf_dir: String,
    /// Quarantine for files whose fields failed validation
    pub not_test_dir: String,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            exams_label: "מבחנים".to_string(),
            semester_label: "סמסטר".to_string(),
            moed_label: "מועד".to_string(),
            not_pdf_dir: "not_a_pdf".to_string(),
            not_test_dir: "not_a_test".to_string(),
        }
    }
}

impl OutputLayout {
    /// File name encoding year, semester and moed
    pub fn file_name(&self, year: &str, semester: &str, moed: &str) -> String {
        format!(
            "{} {} {} {} {}.pdf",
            year, self.semester_label, semester, self.moed_label, moed
        )
    }
}
