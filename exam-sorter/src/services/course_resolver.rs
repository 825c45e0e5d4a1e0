//! Course name resolution
//!
//! Two passes:
//! 1. **Canonicalization**: the normalized extracted name is fuzzy-matched
//!    against the degree's catalog (cutoff 70). A match adopts the canonical
//!    name; otherwise the extracted name is kept as it was.
//! 2. **De-duplication**: the pass-1 result is fuzzy-matched against course
//!    folders already present under the degree's destination directory
//!    (cutoff 85). A match adopts that folder's exact name, so OCR-noise
//!    variants do not spawn near-duplicate folders across runs.

use super::fuzzy_matcher::best_match;
use super::text_normalizer::normalize;
use crate::models::CourseCatalog;
use exam_common::config::Thresholds;
use thiserror::Error;
use tracing::debug;

/// Course resolution errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Degree has no catalog entry (configuration/data error)
    #[error("Degree '{0}' is not present in the course catalog")]
    MissingDegree(String),
}

/// Settles the final course folder name for a file
#[derive(Debug, Clone, Copy)]
pub struct CourseResolver {
    course_cutoff: u8,
    folder_cutoff: u8,
}

impl CourseResolver {
    /// Resolver with the default cutoffs (70 catalog, 85 existing folders)
    pub fn new() -> Self {
        Self::with_cutoffs(70, 85)
    }

    pub fn with_cutoffs(course_cutoff: u8, folder_cutoff: u8) -> Self {
        Self {
            course_cutoff,
            folder_cutoff,
        }
    }

    pub fn from_thresholds(thresholds: &Thresholds) -> Self {
        Self::with_cutoffs(thresholds.course_cutoff, thresholds.folder_cutoff)
    }

    /// Resolve `course_name` for `degree`
    pub fn resolve<S: AsRef<str>>(
        &self,
        course_name: &str,
        degree: &str,
        catalog: &CourseCatalog,
        existing_course_dirs: &[S],
    ) -> Result<String, ResolveError> {
        let canonical = self.canonicalize(course_name, degree, catalog)?;

        match best_match(&canonical, existing_course_dirs, self.folder_cutoff) {
            Some(m) => {
                if m.value != canonical {
                    debug!(
                        course = %canonical,
                        folder = %m.value,
                        score = m.score,
                        "Reusing existing course folder"
                    );
                }
                Ok(m.value.to_string())
            }
            None => Ok(canonical),
        }
    }

    /// Pass 1: catalog match on the normalized name
    fn canonicalize(
        &self,
        course_name: &str,
        degree: &str,
        catalog: &CourseCatalog,
    ) -> Result<String, ResolveError> {
        let courses = catalog
            .courses(degree)
            .ok_or_else(|| ResolveError::MissingDegree(degree.to_string()))?;

        let normalized = normalize(course_name);
        debug!(original = %course_name, normalized = %normalized, "Normalized course name");

        match best_match(&normalized, courses, self.course_cutoff) {
            Some(m) => {
                debug!(course = %course_name, canonical = %m.value, score = m.score, "Catalog match");
                Ok(m.value.to_string())
            }
            None => {
                debug!(course = %course_name, degree = %degree, "No catalog match, keeping extracted name");
                Ok(course_name.to_string())
            }
        }
    }
}

impl Default for CourseResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn catalog() -> CourseCatalog {
        let mut degrees = HashMap::new();
        degrees.insert(
            "מדעי המחשב".to_string(),
            vec![
                "מבוא למדעי המחשב".to_string(),
                "מבני נתונים".to_string(),
                "אלגוריתמים".to_string(),
            ],
        );
        degrees.insert("תעשייה וניהול".to_string(), Vec::new());
        CourseCatalog::new(degrees)
    }

    const NO_DIRS: [&str; 0] = [];

    #[test]
    fn punctuated_name_snaps_to_catalog() {
        let resolved = CourseResolver::new()
            .resolve("מבוא למדעי-המחשב.", "מדעי המחשב", &catalog(), &NO_DIRS)
            .unwrap();
        assert_eq!(resolved, "מבוא למדעי המחשב");
    }

    #[test]
    fn unmatched_name_is_returned_unnormalized() {
        let resolved = CourseResolver::new()
            .resolve("תורת הקבוצות!", "מדעי המחשב", &catalog(), &NO_DIRS)
            .unwrap();
        assert_eq!(resolved, "תורת הקבוצות!");
    }

    #[test]
    fn empty_catalog_entry_keeps_name() {
        let resolved = CourseResolver::new()
            .resolve("מבוא למדעי המחשב", "תעשייה וניהול", &catalog(), &NO_DIRS)
            .unwrap();
        assert_eq!(resolved, "מבוא למדעי המחשב");
    }

    #[test]
    fn existing_folder_variant_is_reused() {
        let existing = vec!["מבוא למדעי המחשב א".to_string()];
        let resolved = CourseResolver::new()
            .resolve("מבוא למדעי המחשב", "תעשייה וניהול", &catalog(), &existing)
            .unwrap();
        assert_eq!(resolved, "מבוא למדעי המחשב א");
    }

    #[test]
    fn dissimilar_existing_folder_is_ignored() {
        let existing = ["אלגוריתמים"];
        let resolved = CourseResolver::new()
            .resolve("מבני נתונים", "מדעי המחשב", &catalog(), &existing)
            .unwrap();
        assert_eq!(resolved, "מבני נתונים");
    }

    #[test]
    fn missing_degree_is_an_error() {
        let result = CourseResolver::new().resolve("x", "רפואה", &catalog(), &NO_DIRS);
        assert_eq!(result, Err(ResolveError::MissingDegree("רפואה".to_string())));
    }

    #[test]
    fn result_is_catalog_name_or_original() {
        let catalog = catalog();
        let courses = catalog.courses("מדעי המחשב").unwrap().to_vec();
        for query in ["מבני  נתונים", "אלגוריתמים 1", "קומפילציה", "מבוא למדמ\"ח"] {
            let resolved = CourseResolver::new()
                .resolve(query, "מדעי המחשב", &catalog, &NO_DIRS)
                .unwrap();
            assert!(
                courses.contains(&resolved) || resolved == query,
                "'{}' resolved to '{}'",
                query,
                resolved
            );
        }
    }
}
