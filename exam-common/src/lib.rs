//! # Exam Sorter Common Library
//!
//! Shared code for the exam sorter workspace:
//! - Error types
//! - TOML configuration model and resolution
//! - Classification rule tables (keywords, folder pattern, vocabulary)
//! - Output layout labels

pub mod config;
pub mod error;
pub mod layout;
pub mod rules;

pub use error::{Error, Result};
pub use layout::OutputLayout;
pub use rules::RuleTables;
