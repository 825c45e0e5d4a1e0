//! Canonical course catalog
//!
//! JSON object mapping each degree name to its ordered list of canonical
//! course names. Loaded once per run; read-only afterwards.

use exam_common::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Degree → canonical course names (order preserved)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseCatalog {
    degrees: HashMap<String, Vec<String>>,
}

impl CourseCatalog {
    pub fn new(degrees: HashMap<String, Vec<String>>) -> Self {
        Self { degrees }
    }

    /// Load the catalog file; absence or malformed content is a configuration error
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read catalog {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{} ({})", msg, path.display())),
            other => other,
        })?;

        tracing::info!(
            catalog = %path.display(),
            degrees = catalog.degrees.len(),
            courses = catalog.degrees.values().map(Vec::len).sum::<usize>(),
            "Course catalog loaded"
        );

        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let degrees: HashMap<String, Vec<String>> = serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("Malformed course catalog: {}", e)))?;
        Ok(Self { degrees })
    }

    /// Canonical course names for a degree, `None` if the degree is not cataloged
    pub fn courses(&self, degree: &str) -> Option<&[String]> {
        self.degrees.get(degree).map(Vec::as_slice)
    }

    pub fn degrees(&self) -> impl Iterator<Item = &str> {
        self.degrees.keys().map(String::as_str)
    }
}
