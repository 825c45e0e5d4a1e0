//! Field Validator
//!
//! Two-stage check of extracted exam fields:
//! 1. **Year normalization**: a year that does not parse as an integer, or
//!    falls outside the accepted range, is replaced with `"unknown"`. This
//!    step never rejects on its own.
//! 2. **Completeness gate**: any field equal to `"unknown"` (exact,
//!    case-sensitive) rejects the whole record.
//! 3. **Path safety**: every field becomes one segment of the destination
//!    path, so blank values, `.`, `..` and values holding a separator are
//!    rejected.
//!
//! A malformed year is therefore caught by the same gate as a genuinely
//! missing field. Validation is idempotent.

use crate::models::{ExtractedFields, RejectionReason, ValidatedFields};
use exam_common::config::Thresholds;
use exam_common::rules::UNKNOWN;
use tracing::debug;

/// Validates extracted exam fields
#[derive(Debug, Clone, Copy)]
pub struct FieldValidator {
    min_year: i32,
    max_year: i32,
}

impl FieldValidator {
    /// Validator accepting years 2000-2025
    pub fn new() -> Self {
        Self::with_year_range(2000, 2025)
    }

    /// Validator with a custom closed year range
    pub fn with_year_range(min_year: i32, max_year: i32) -> Self {
        Self { min_year, max_year }
    }

    pub fn from_thresholds(thresholds: &Thresholds) -> Self {
        Self::with_year_range(thresholds.min_year, thresholds.max_year)
    }

    /// Trimmed year if it parses and lies in range, otherwise `"unknown"`
    pub fn normalize_year(&self, year: &str) -> String {
        let trimmed = year.trim();
        match trimmed.parse::<i32>() {
            Ok(value) if (self.min_year..=self.max_year).contains(&value) => trimmed.to_string(),
            Ok(value) => {
                debug!(year = value, min = self.min_year, max = self.max_year, "Year out of range");
                UNKNOWN.to_string()
            }
            Err(_) => {
                if trimmed != UNKNOWN {
                    debug!(year = %year, "Year is not an integer");
                }
                UNKNOWN.to_string()
            }
        }
    }

    /// Normalize the year, then apply the completeness and path-safety gates
    pub fn validate(&self, fields: ExtractedFields) -> Result<ValidatedFields, RejectionReason> {
        let year = self.normalize_year(&fields.year);
        let fields = ExtractedFields { year, ..fields };

        let missing = fields.unknown_fields();
        if !missing.is_empty() {
            return Err(RejectionReason::IncompleteFields { missing });
        }

        let unsafe_fields: Vec<&'static str> = fields
            .named()
            .into_iter()
            .filter(|(_, value)| !is_single_segment(value))
            .map(|(name, _)| name)
            .collect();
        if !unsafe_fields.is_empty() {
            debug!(fields = %fields, "Field values are not single path segments");
            return Err(RejectionReason::UnsafePath {
                fields: unsafe_fields,
            });
        }

        Ok(ValidatedFields(fields))
    }
}

fn is_single_segment(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed != "."
        && trimmed != ".."
        && !value.contains(|c: char| c == '/' || c == '\\' || c == '\0')
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new()
    }
}
