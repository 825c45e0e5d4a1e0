//! Completion response parsing
//!
//! The model is asked for a bare JSON object but sometimes wraps it in a
//! Markdown code fence or adds a sentence around it. The parser strips that
//! envelope, then deserializes against a strict schema: all five keys must be
//! present and hold strings. Extra keys are ignored.

use crate::models::ExtractedFields;
use exam_common::rules::UNKNOWN;
use serde::Deserialize;
use thiserror::Error;

/// Response parsing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseParseError {
    /// No JSON object could be located in the response
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// JSON object did not match the expected schema
    #[error("JSON parsing error: {0}")]
    JsonParsing(String),
}

#[derive(Deserialize)]
struct RawFields {
    course_name: String,
    semester: String,
    year: String,
    moed: String,
    degree: String,
}

/// Parse a completion into extracted fields; blank values become `"unknown"`
pub fn parse_fields_response(response: &str) -> Result<ExtractedFields, ResponseParseError> {
    let json_str = extract_json_object(response)?;

    let raw: RawFields =
        serde_json::from_str(json_str).map_err(|e| ResponseParseError::JsonParsing(e.to_string()))?;

    Ok(ExtractedFields::new(
        or_unknown(raw.course_name),
        or_unknown(raw.semester),
        or_unknown(raw.year),
        or_unknown(raw.moed),
        or_unknown(raw.degree),
    ))
}

/// Slice from the first `{` to the last `}`, after dropping an optional code fence
fn extract_json_object(response: &str) -> Result<&str, ResponseParseError> {
    let body = strip_code_fence(response.trim());

    let start = body
        .find('{')
        .ok_or_else(|| ResponseParseError::MalformedResponse("No JSON object found".into()))?;
    let end = body
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| ResponseParseError::MalformedResponse("Unclosed JSON object".into()))?;

    Ok(&body[start..=end])
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Skip the info string ("json") on the opening fence line
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn or_unknown(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE: &str = r#"{"course_name": "מבני נתונים", "semester": "א", "year": "2022", "moed": "ב", "degree": "מדעי המחשב"}"#;

    #[test]
    fn parses_bare_object() {
        let fields = parse_fields_response(BARE).unwrap();
        assert_eq!(fields, ExtractedFields::new("מבני נתונים", "א", "2022", "ב", "מדעי המחשב"));
    }

    #[test]
    fn strips_json_code_fence() {
        let fenced = format!("```json\n{}\n```", BARE);
        assert_eq!(parse_fields_response(&fenced).unwrap().year, "2022");

        let plain_fence = format!("```\n{}\n```\n", BARE);
        assert_eq!(parse_fields_response(&plain_fence).unwrap().moed, "ב");
    }

    #[test]
    fn tolerates_surrounding_prose() {
        let chatty = format!("Here is the metadata:\n{}\nLet me know if you need more.", BARE);
        assert_eq!(parse_fields_response(&chatty).unwrap().degree, "מדעי המחשב");
    }

    #[test]
    fn blank_values_become_unknown() {
        let response = r#"{"course_name": "x", "semester": "", "year": "  ", "moed": "א", "degree": "y"}"#;
        let fields = parse_fields_response(response).unwrap();
        assert_eq!(fields.semester, UNKNOWN);
        assert_eq!(fields.year, UNKNOWN);
    }

    #[test]
    fn missing_key_is_schema_error() {
        let response = r#"{"course_name": "x", "semester": "א", "year": "2022", "moed": "א"}"#;
        assert!(matches!(
            parse_fields_response(response),
            Err(ResponseParseError::JsonParsing(_))
        ));
    }

    #[test]
    fn numeric_year_is_schema_error() {
        let response = r#"{"course_name": "x", "semester": "א", "year": 2022, "moed": "א", "degree": "y"}"#;
        assert!(matches!(
            parse_fields_response(response),
            Err(ResponseParseError::JsonParsing(_))
        ));
    }

    #[test]
    fn no_object_is_malformed() {
        assert_eq!(
            parse_fields_response("I could not read the document."),
            Err(ResponseParseError::MalformedResponse("No JSON object found".into()))
        );
        assert!(matches!(
            parse_fields_response("{ \"course_name\": "),
            Err(ResponseParseError::MalformedResponse(_))
        ));
    }
}
