//! Validation layer
//!
//! Checks extracted exam fields before any filesystem placement happens.

pub mod field_validator;

pub use field_validator::FieldValidator;
