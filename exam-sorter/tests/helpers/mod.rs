//! Test Helper Utilities
//!
//! Shared utilities for testing exam-sorter

pub mod fakes;
pub mod fixtures;
pub mod log_capture;

// Re-export commonly used items
pub use fakes::{fake_collaborators, ContentTypeProbe, InlineJsonExtractor, PlainTextSource};
pub use fixtures::{exam_json, write_exam, write_non_exam, TestTree};
pub use log_capture::LogCapture;
